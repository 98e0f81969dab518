//! HTTP layer: routes, handlers and the fragments they render.
//!
//! Every handler makes one repository call (or a read after a write) and
//! answers with an HTML fragment for htmx to swap in. Handlers share the
//! repositories through [`AppState`]; nothing is global.

mod error;
mod forms;
mod handlers;
mod views;

pub use error::AppError;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::path::Path;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::db::{MealPlanRepository, ShoppingListRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub meal_plans: MealPlanRepository,
    pub shopping: ShoppingListRepository,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            meal_plans: MealPlanRepository::new(pool.clone()),
            shopping: ShoppingListRepository::new(pool),
        }
    }
}

/// Build the application router. Static files are served from `static_dir`
/// under `/public`.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/meal", post(handlers::update_meal))
        .route(
            "/shopping-list",
            get(handlers::shopping_list)
                .post(handlers::add_item)
                .delete(handlers::delete_item),
        )
        .route("/shopping-list/tick", post(handlers::tick_item))
        .route("/shopping-list/sort", post(handlers::sort_items))
        .route("/shopping-list/edit", post(handlers::edit_item))
        .route("/shopping-list/clear-ticked", post(handlers::clear_ticked))
        .nest_service("/public", ServeDir::new(static_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
