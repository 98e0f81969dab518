//! Meal Planner Admin CLI
//!
//! Maintenance commands against the configured database.
//!
//! # Usage
//!
//! ```bash
//! mealplanner-admin seed
//! mealplanner-admin list
//! mealplanner-admin clear-ticked
//! mealplanner-admin copy --from ~/.local/share/mealplanner/mealplanner.db \
//!                        --to ~/.local/share/mealplanner/mealplanner-test.db
//! ```
//!
//! Uses the same configuration as the server (`MEALPLANNER_*` variables,
//! `.env`, config file).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mealplanner::config::Config;
use mealplanner::db::{init_db, MealPlanRepository, ShoppingListRepository};
use mealplanner::logging;
use mealplanner::models::WEEKDAYS;

#[derive(Parser)]
#[command(name = "mealplanner-admin")]
#[command(version)]
#[command(about = "Meal planner administration tool")]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the weekly meal plan rows that are missing
    Seed {
        /// Days to create, in display order (default: Monday to Sunday)
        #[arg(long, value_delimiter = ',')]
        days: Vec<String>,
    },
    /// Print the meal plan and shopping list
    List,
    /// Remove ticked shopping list items
    ClearTicked,
    /// Copy the meal plan and shopping list from one database into another,
    /// replacing the target's contents
    Copy {
        /// Source database file
        #[arg(long)]
        from: PathBuf,
        /// Target database file (created if missing)
        #[arg(long)]
        to: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    // Config fallbacks (e.g. an unknown MEALPLANNER_ENV) are reported as warnings
    logging::init(logging::ADMIN_FILTER);

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    match cli.command {
        Commands::Seed { days } => {
            let pool = init_db(&config.database_path()).await?;
            let repo = MealPlanRepository::new(pool);

            let days: Vec<&str> = if days.is_empty() {
                WEEKDAYS.to_vec()
            } else {
                days.iter().map(String::as_str).collect()
            };
            let inserted = repo.seed_days(&days).await?;
            println!("Seeded {} day(s)", inserted);
        }
        Commands::List => {
            let pool = init_db(&config.database_path()).await?;
            let plan = MealPlanRepository::new(pool.clone()).get().await?;
            let items = ShoppingListRepository::new(pool).list().await?;

            print!("{}", plan);
            println!();
            println!("Shopping List");
            println!("=============");
            if items.is_empty() {
                println!("(empty)");
            }
            for item in &items {
                println!("{}  {}", item, item.id);
            }
        }
        Commands::ClearTicked => {
            let pool = init_db(&config.database_path()).await?;
            let removed = ShoppingListRepository::new(pool).clear_ticked().await?;
            println!("Removed {} ticked item(s)", removed);
        }
        Commands::Copy { from, to } => {
            if from == to {
                return Err("Source and target database are the same file".into());
            }
            if !from.exists() {
                return Err(format!("Source database {} does not exist", from.display()).into());
            }

            let source = init_db(&from).await?;
            let target = init_db(&to).await?;

            let plan = MealPlanRepository::new(source.clone()).get().await?;
            let items = ShoppingListRepository::new(source).list().await?;

            MealPlanRepository::new(target.clone()).replace(&plan).await?;
            ShoppingListRepository::new(target)
                .replace_all(&items)
                .await?;

            println!(
                "Copied {} day(s) and {} item(s) from {} to {}",
                plan.meals.len(),
                items.len(),
                from.display(),
                to.display()
            );
        }
    }

    Ok(())
}
