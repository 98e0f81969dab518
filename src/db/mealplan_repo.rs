use sqlx::SqlitePool;

use super::{begin_write, require_text, RepoError};
use crate::models::{Meal, MealPlan};

/// Storage for the single weekly meal plan.
#[derive(Debug, Clone)]
pub struct MealPlanRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct MealRow {
    day: String,
    meal: String,
}

impl MealPlanRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// The whole plan in day order. An unseeded database yields an empty plan.
    pub async fn get(&self) -> Result<MealPlan, RepoError> {
        let rows: Vec<MealRow> = sqlx::query_as("SELECT day, meal FROM meal_plan ORDER BY position")
            .fetch_all(&self.pool)
            .await?;

        Ok(MealPlan::new(
            rows.into_iter().map(|r| Meal::new(r.day, r.meal)).collect(),
        ))
    }

    /// Set the meal for an existing day. Days are never created here.
    pub async fn update_meal(&self, day: &str, meal: &str) -> Result<Meal, RepoError> {
        let day = require_text(day, "Day")?;
        let meal = meal.trim();

        let result = sqlx::query("UPDATE meal_plan SET meal = ? WHERE day = ?")
            .bind(meal)
            .bind(day)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "No meal plan entry for day '{}'",
                day
            )));
        }

        tracing::debug!(day, "Updated meal");
        Ok(Meal::new(day, meal))
    }

    /// Insert any of `days` that are missing, with no meal planned.
    ///
    /// Existing days keep their meal. Returns how many days were inserted.
    pub async fn seed_days(&self, days: &[&str]) -> Result<u64, RepoError> {
        let mut tx = begin_write(&self.pool).await?;
        let mut inserted = 0;

        for (position, day) in days.iter().enumerate() {
            let day = require_text(day, "Day")?;
            let result = sqlx::query(
                "INSERT OR IGNORE INTO meal_plan (day, meal, position) VALUES (?, '', ?)",
            )
            .bind(day)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Replace the stored plan with `plan`.
    pub async fn replace(&self, plan: &MealPlan) -> Result<(), RepoError> {
        let mut tx = begin_write(&self.pool).await?;

        sqlx::query("DELETE FROM meal_plan").execute(&mut *tx).await?;

        for (position, meal) in plan.meals.iter().enumerate() {
            sqlx::query("INSERT INTO meal_plan (day, meal, position) VALUES (?, ?, ?)")
                .bind(&meal.day)
                .bind(&meal.meal)
                .bind(position as i64)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::models::WEEKDAYS;
    use tempfile::TempDir;

    struct TestContext {
        repo: MealPlanRepository,
        _temp_dir: TempDir,
    }

    async fn setup_repo() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let pool = init_db(&temp_dir.path().join("test.db")).await.unwrap();
        TestContext {
            repo: MealPlanRepository::new(pool),
            _temp_dir: temp_dir,
        }
    }

    #[tokio::test]
    async fn test_empty_plan() {
        let ctx = setup_repo().await;
        assert!(ctx.repo.get().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seed_days_in_order_and_idempotent() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;

        assert_eq!(repo.seed_days(&WEEKDAYS).await.unwrap(), 7);
        repo.update_meal("Friday", "Pizza").await.unwrap();
        assert_eq!(repo.seed_days(&WEEKDAYS).await.unwrap(), 0);

        let plan = repo.get().await.unwrap();
        let days: Vec<&str> = plan.meals.iter().map(|m| m.day.as_str()).collect();
        assert_eq!(days, WEEKDAYS.to_vec());
        assert_eq!(plan.find("Friday").unwrap().meal, "Pizza");
    }

    #[tokio::test]
    async fn test_update_meal() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;
        repo.seed_days(&WEEKDAYS).await.unwrap();

        let meal = repo.update_meal("Monday", " Lasagne ").await.unwrap();
        assert_eq!(meal, Meal::new("Monday", "Lasagne"));

        let plan = repo.get().await.unwrap();
        assert_eq!(plan.find("Monday").unwrap().meal, "Lasagne");
        assert_eq!(plan.find("Tuesday").unwrap().meal, "");
    }

    #[tokio::test]
    async fn test_update_meal_can_clear() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;
        repo.seed_days(&["Monday"]).await.unwrap();

        repo.update_meal("Monday", "Soup").await.unwrap();
        repo.update_meal("Monday", "").await.unwrap();
        assert!(!repo.get().await.unwrap().meals[0].is_planned());
    }

    #[tokio::test]
    async fn test_update_unknown_day_is_not_found_and_creates_nothing() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;
        repo.seed_days(&["Monday"]).await.unwrap();

        let err = repo.update_meal("Funday", "Cake").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));

        let err = repo.update_meal("", "Cake").await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        let plan = repo.get().await.unwrap();
        assert_eq!(plan.meals.len(), 1);
        assert!(plan.find("Funday").is_none());
    }

    #[tokio::test]
    async fn test_replace() {
        let ctx = setup_repo().await;
        let repo = &ctx.repo;
        repo.seed_days(&WEEKDAYS).await.unwrap();

        let plan = MealPlan::new(vec![
            Meal::new("Saturday", "Roast"),
            Meal::new("Sunday", "Leftovers"),
        ]);
        repo.replace(&plan).await.unwrap();

        assert_eq!(repo.get().await.unwrap(), plan);
    }
}
