use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, QueryRejection},
        Query, State,
    },
    response::Html,
    Form, Json,
};
use serde::Serialize;

use super::error::AppError;
use super::forms::{DeleteQuery, EditForm, MealForm, NewItemForm, TickForm};
use super::views::{render, IndexPage, MealInput, ShoppingListFragment, ShoppingListItemFragment};
use super::AppState;
use crate::models::{parse_item_id, OrderUpdate};

fn bad_form(rejection: FormRejection) -> AppError {
    AppError::BadRequest(rejection.body_text())
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let (plan, items) = tokio::try_join!(state.meal_plans.get(), state.shopping.list())?;

    render(&IndexPage {
        meals: plan.meals,
        items,
    })
}

/// `POST /meal`
pub async fn update_meal(
    State(state): State<AppState>,
    form: Result<Form<MealForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(bad_form)?;

    let meal = state.meal_plans.update_meal(&form.day, &form.meal).await?;
    tracing::info!(day = %meal.day, "Meal updated");

    render(&MealInput { meal })
}

/// `GET /shopping-list`
pub async fn shopping_list(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let items = state.shopping.list().await?;
    render(&ShoppingListFragment { items })
}

/// `POST /shopping-list`
pub async fn add_item(
    State(state): State<AppState>,
    form: Result<Form<NewItemForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(bad_form)?;

    let entry = state.shopping.add(&form.item).await?;
    tracing::info!(id = %entry.id, "Shopping list item added");

    render(&ShoppingListItemFragment { entry })
}

/// `DELETE /shopping-list?item=<id>`
pub async fn delete_item(
    State(state): State<AppState>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> Result<Html<String>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let id = parse_item_id(&query.item)?;

    state.shopping.delete(id).await?;
    tracing::info!(id = %id, "Shopping list item deleted");

    let items = state.shopping.list().await?;
    render(&ShoppingListFragment { items })
}

/// `POST /shopping-list/tick`
pub async fn tick_item(
    State(state): State<AppState>,
    form: Result<Form<TickForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(bad_form)?;
    let id = parse_item_id(&form.id)?;
    let ticked = form.is_ticked()?;

    let entry = state.shopping.set_ticked(id, ticked).await?;
    render(&ShoppingListItemFragment { entry })
}

#[derive(Serialize)]
pub struct SortResponse {
    status: &'static str,
}

/// `POST /shopping-list/sort`
pub async fn sort_items(
    State(state): State<AppState>,
    body: Result<Json<OrderUpdate>, JsonRejection>,
) -> Result<Json<SortResponse>, AppError> {
    let Json(update) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let ids = update.ordered_ids()?;

    state.shopping.reorder(&ids).await?;

    Ok(Json(SortResponse { status: "success" }))
}

/// `POST /shopping-list/edit`
pub async fn edit_item(
    State(state): State<AppState>,
    form: Result<Form<EditForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form.map_err(bad_form)?;
    let id = parse_item_id(&form.id)?;

    let entry = state.shopping.set_text(id, &form.item).await?;
    render(&ShoppingListItemFragment { entry })
}

/// `POST /shopping-list/clear-ticked`
pub async fn clear_ticked(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let removed = state.shopping.clear_ticked().await?;
    tracing::info!(removed, "Cleared ticked items");

    let items = state.shopping.list().await?;
    render(&ShoppingListFragment { items })
}
