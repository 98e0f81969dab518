use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashSet;
use uuid::Uuid;

use super::{begin_write, require_text, RepoError};
use crate::models::ShoppingListItem;

/// Shopping list storage.
///
/// Display order lives on each row (`position`), so every structural change
/// (add, delete, reorder) rewrites positions inside the same transaction.
/// Writes are unconditional: two clients editing concurrently get
/// last-write-wins, and there is no version check.
#[derive(Debug, Clone)]
pub struct ShoppingListRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: String,
    item: String,
    ticked: bool,
    position: i64,
    created_at: String,
    updated_at: String,
}

impl ItemRow {
    fn into_item(self) -> Result<ShoppingListItem, sqlx::Error> {
        let id = Uuid::parse_str(&self.id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(ShoppingListItem {
            id,
            item: self.item,
            ticked: self.ticked,
            position: self.position,
            created_at: parse_timestamp(&self.created_at),
            updated_at: parse_timestamp(&self.updated_at),
        })
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn not_found(id: Uuid) -> RepoError {
    RepoError::NotFound(format!("No shopping list item with id {}", id))
}

impl ShoppingListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All items in display order.
    pub async fn list(&self) -> Result<Vec<ShoppingListItem>, RepoError> {
        let rows: Vec<ItemRow> =
            sqlx::query_as("SELECT * FROM shopping_list_items ORDER BY position, created_at")
                .fetch_all(&self.pool)
                .await?;

        let items = rows
            .into_iter()
            .map(ItemRow::into_item)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ShoppingListItem>, RepoError> {
        let row: Option<ItemRow> = sqlx::query_as("SELECT * FROM shopping_list_items WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.into_item()?)),
            None => Ok(None),
        }
    }

    /// Append a new unticked item to the end of the list.
    pub async fn add(&self, text: &str) -> Result<ShoppingListItem, RepoError> {
        let text = require_text(text, "Item")?;

        let mut tx = begin_write(&self.pool).await?;

        let (next_position,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(position) + 1, 0) FROM shopping_list_items")
                .fetch_one(&mut *tx)
                .await?;

        let item = ShoppingListItem::new(text, next_position);
        insert_item(&mut *tx, &item).await?;

        tx.commit().await?;

        tracing::debug!(id = %item.id, position = item.position, "Added shopping list item");
        Ok(item)
    }

    /// Replace an item's text.
    pub async fn set_text(&self, id: Uuid, text: &str) -> Result<ShoppingListItem, RepoError> {
        let text = require_text(text, "Item")?;

        let result =
            sqlx::query("UPDATE shopping_list_items SET item = ?, updated_at = ? WHERE id = ?")
                .bind(text)
                .bind(Utc::now().to_rfc3339())
                .bind(id.to_string())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        self.get(id).await?.ok_or_else(|| not_found(id))
    }

    /// Tick or untick an item.
    pub async fn set_ticked(&self, id: Uuid, ticked: bool) -> Result<ShoppingListItem, RepoError> {
        let result =
            sqlx::query("UPDATE shopping_list_items SET ticked = ?, updated_at = ? WHERE id = ?")
                .bind(ticked)
                .bind(Utc::now().to_rfc3339())
                .bind(id.to_string())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        self.get(id).await?.ok_or_else(|| not_found(id))
    }

    /// Remove an item and close the gap it leaves in the order.
    pub async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tx = begin_write(&self.pool).await?;

        let result = sqlx::query("DELETE FROM shopping_list_items WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        compact_positions(&mut *tx).await?;
        tx.commit().await?;

        tracing::debug!(id = %id, "Deleted shopping list item");
        Ok(())
    }

    /// Replace the whole display order.
    ///
    /// `ids` must name every stored item exactly once; anything else is
    /// rejected without touching the stored order.
    pub async fn reorder(&self, ids: &[Uuid]) -> Result<(), RepoError> {
        let mut seen = HashSet::with_capacity(ids.len());
        if let Some(dup) = ids.iter().find(|id| !seen.insert(**id)) {
            return Err(RepoError::Validation(format!(
                "Item {} appears more than once in the new order",
                dup
            )));
        }

        let mut tx = begin_write(&self.pool).await?;

        let stored: Vec<(String,)> = sqlx::query_as("SELECT id FROM shopping_list_items")
            .fetch_all(&mut *tx)
            .await?;
        let stored: HashSet<String> = stored.into_iter().map(|(id,)| id).collect();
        let submitted: HashSet<String> = ids.iter().map(|id| id.to_string()).collect();

        if stored != submitted {
            let missing = stored.difference(&submitted).count();
            let unknown = submitted.difference(&stored).count();
            return Err(RepoError::Validation(format!(
                "New order does not match the shopping list ({} missing, {} unknown)",
                missing, unknown
            )));
        }

        for (position, id) in ids.iter().enumerate() {
            sqlx::query("UPDATE shopping_list_items SET position = ? WHERE id = ?")
                .bind(position as i64)
                .bind(id.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(count = ids.len(), "Reordered shopping list");
        Ok(())
    }

    /// Remove every ticked item. Returns how many were removed.
    pub async fn clear_ticked(&self) -> Result<u64, RepoError> {
        let mut tx = begin_write(&self.pool).await?;

        let result = sqlx::query("DELETE FROM shopping_list_items WHERE ticked = 1")
            .execute(&mut *tx)
            .await?;

        compact_positions(&mut *tx).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    /// Replace the stored list with `items`, keeping their ids and ticks.
    ///
    /// Positions are reassigned from the slice order.
    pub async fn replace_all(&self, items: &[ShoppingListItem]) -> Result<(), RepoError> {
        let mut tx = begin_write(&self.pool).await?;

        sqlx::query("DELETE FROM shopping_list_items")
            .execute(&mut *tx)
            .await?;

        for (position, item) in items.iter().enumerate() {
            let mut item = item.clone();
            item.position = position as i64;
            insert_item(&mut *tx, &item).await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

async fn insert_item(conn: &mut SqliteConnection, item: &ShoppingListItem) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO shopping_list_items (id, item, ticked, position, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(item.id.to_string())
    .bind(&item.item)
    .bind(item.ticked)
    .bind(item.position)
    .bind(item.created_at.to_rfc3339())
    .bind(item.updated_at.to_rfc3339())
    .execute(conn)
    .await?;
    Ok(())
}

/// Renumber positions to `0..n` keeping the current relative order.
async fn compact_positions(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    let ids: Vec<(String,)> =
        sqlx::query_as("SELECT id FROM shopping_list_items ORDER BY position, created_at")
            .fetch_all(&mut *conn)
            .await?;

    for (position, (id,)) in ids.iter().enumerate() {
        sqlx::query("UPDATE shopping_list_items SET position = ? WHERE id = ?")
            .bind(position as i64)
            .bind(id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}
