//! Household meal planner.
//!
//! A weekly meal plan and a shared shopping list, stored in SQLite and
//! served as server-rendered HTML fragments for an htmx frontend.

pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod server;
