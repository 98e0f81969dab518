//! Reorder requests posted by the drag-and-drop list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shopping_item::{parse_item_id, InvalidItemId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderEntry {
    pub id: String,
    pub position: i64,
}

/// Body of `POST /shopping-list/sort`: the complete new order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderUpdate {
    pub order: Vec<OrderEntry>,
}

impl OrderUpdate {
    /// Identifiers sorted by their submitted position.
    ///
    /// Entries sharing a position keep the order they were submitted in.
    pub fn ordered_ids(&self) -> Result<Vec<Uuid>, InvalidItemId> {
        let mut entries: Vec<&OrderEntry> = self.order.iter().collect();
        entries.sort_by_key(|e| e.position);
        entries.into_iter().map(|e| parse_item_id(&e.id)).collect()
    }
}
