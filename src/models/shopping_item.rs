//! Shopping list items.
//!
//! Each item carries its own display `position`; the list order is simply
//! the items sorted by that field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// A client supplied something that is not an item identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid item id: {0:?}")]
pub struct InvalidItemId(pub String);

/// Parse an item identifier as posted by the frontend.
pub fn parse_item_id(raw: &str) -> Result<Uuid, InvalidItemId> {
    Uuid::parse_str(raw.trim()).map_err(|_| InvalidItemId(raw.to_string()))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingListItem {
    /// Assigned at creation, never reassigned
    pub id: Uuid,
    pub item: String,
    pub ticked: bool,
    /// Zero-based display position
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShoppingListItem {
    pub fn new(item: impl Into<String>, position: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            item: item.into(),
            ticked: false,
            position,
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.ticked { "x" } else { " " };
        write!(f, "[{}] {}", mark, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_is_unticked() {
        let item = ShoppingListItem::new("Milk", 3);
        assert_eq!(item.item, "Milk");
        assert!(!item.ticked);
        assert_eq!(item.position, 3);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_new_items_get_distinct_ids() {
        let a = ShoppingListItem::new("Eggs", 0);
        let b = ShoppingListItem::new("Eggs", 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display() {
        let mut item = ShoppingListItem::new("Bread", 0);
        assert_eq!(item.to_string(), "[ ] Bread");
        item.ticked = true;
        assert_eq!(item.to_string(), "[x] Bread");
    }

    #[test]
    fn test_parse_item_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_item_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_item_id(&format!(" {} ", id)).unwrap(), id);

        let err = parse_item_id("65f1c0ffee").unwrap_err();
        assert_eq!(err, InvalidItemId("65f1c0ffee".to_string()));
        assert!(err.to_string().contains("65f1c0ffee"));
    }
}
