//! askama templates for the page and the htmx fragments it swaps in.

use askama::Template;
use axum::response::Html;

use super::error::AppError;
use crate::models::{Meal, ShoppingListItem};

/// The full page: meal plan plus the ordered shopping list.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub meals: Vec<Meal>,
    pub items: Vec<ShoppingListItem>,
}

/// One day's meal input, swapped in after an update.
#[derive(Template)]
#[template(path = "meal_input.html")]
pub struct MealInput {
    pub meal: Meal,
}

/// The `#shopping-list` element with every item in order.
#[derive(Template)]
#[template(path = "shopping_list.html")]
pub struct ShoppingListFragment {
    pub items: Vec<ShoppingListItem>,
}

/// A single shopping list row.
#[derive(Template)]
#[template(path = "shopping_list_item.html")]
pub struct ShoppingListItemFragment {
    pub entry: ShoppingListItem,
}

pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}
