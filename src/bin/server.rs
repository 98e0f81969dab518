//! Meal Planner server
//!
//! Serves the weekly meal plan and shopping list as HTML fragments.
//!
//! # Configuration
//!
//! Read from `.env`, the YAML config file and environment variables:
//! - `MEALPLANNER_ENV`: `production` (default), `development` or `test`
//! - `MEALPLANNER_PORT`: Port to listen on (default: 8080)
//! - `MEALPLANNER_DATA_DIR`: Directory holding the database (default: ~/.local/share/mealplanner)
//! - `MEALPLANNER_DATABASE_PATH`: Explicit database file
//! - `MEALPLANNER_STATIC_DIR`: Directory served under `/public` (default: ./public)
//! - `MEALPLANNER_CONFIG`: Path to config file (default: ~/.config/mealplanner/config.yaml)

use std::net::SocketAddr;

use mealplanner::config::Config;
use mealplanner::db::init_db;
use mealplanner::logging;
use mealplanner::server::{router, AppState};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    logging::init(logging::SERVER_FILTER);

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(None)?;
    let db_path = config.database_path();

    tracing::info!("Starting in {} environment", config.environment);
    tracing::info!("Database: {}", db_path.display());

    // A database we cannot open is fatal before we start listening
    let pool = init_db(&db_path).await?;

    let app = router(AppState::new(pool), &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
