mod meal_plan;
mod order;
mod shopping_item;

pub use meal_plan::{Meal, MealPlan, WEEKDAYS};
pub use order::{OrderEntry, OrderUpdate};
pub use shopping_item::{parse_item_id, InvalidItemId, ShoppingListItem};
