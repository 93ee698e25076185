//! # Domain Types
//!
//! Core domain types shared by the parser, the merge engine and callers.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  "Rice 2, Milk 12345"                                                   │
//! │         │ parse()                                                       │
//! │         ▼                                                               │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ParsedItem    │   │    CartEntry    │   │ MergeOperation  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │──►│  id (UUID)      │──►│  Create         │       │
//! │  │  quantity       │   │  name           │   │  IncrementQty   │       │
//! │  │  history_id     │   │  quantity       │   │                 │       │
//! │  └─────────────────┘   │  price          │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;
use crate::quantity::Quantity;
use crate::{MAX_CART_ENTRIES, MAX_ENTRY_QUANTITY};

// =============================================================================
// Parsed Item
// =============================================================================

/// One item recognized in a request line.
///
/// `name` is title-cased words joined by single spaces and is never empty
/// or a stopword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParsedItem {
    pub name: String,
    pub quantity: Quantity,
    /// Catalog identifier (5–8 digits) seen while the item was being named.
    pub history_id: Option<String>,
}

impl ParsedItem {
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        ParsedItem {
            name: name.into(),
            quantity,
            history_id: None,
        }
    }

    #[must_use]
    pub fn with_history_id(mut self, id: impl Into<String>) -> Self {
        self.history_id = Some(id.into());
        self
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// A line in a user's cart, owned by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartEntry {
    /// Opaque identifier (UUID v4 for entries created here).
    pub id: String,
    pub name: String,
    pub quantity: Quantity,
    /// Unit price; zero until the user fills it in.
    pub price: Money,
}

impl CartEntry {
    /// Creates an entry with a fresh UUID.
    pub fn new(name: impl Into<String>, quantity: Quantity, price: Money) -> Self {
        CartEntry {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Merge Operation
// =============================================================================

/// A change the storage collaborator should apply to a cart.
///
/// ## Wire Shape
/// ```json
/// { "kind": "create", "name": "Bread", "quantity": 2 }
/// { "kind": "increment_quantity", "entryId": "…", "name": "Rice", "delta": 0.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum MergeOperation {
    /// Add a new entry with this quantity and a zero price.
    Create { name: String, quantity: Quantity },

    /// Add `delta` to an existing entry.
    #[serde(rename_all = "camelCase")]
    IncrementQuantity {
        entry_id: String,
        name: String,
        delta: Quantity,
    },
}

impl MergeOperation {
    pub fn name(&self) -> &str {
        match self {
            MergeOperation::Create { name, .. } | MergeOperation::IncrementQuantity { name, .. } => {
                name
            }
        }
    }

    /// The amount created, or the delta added.
    pub fn quantity(&self) -> Quantity {
        match self {
            MergeOperation::Create { quantity, .. } => *quantity,
            MergeOperation::IncrementQuantity { delta, .. } => *delta,
        }
    }

    /// Folds another request item with the same name into this operation.
    pub(crate) fn absorb(&mut self, more: Quantity) {
        match self {
            MergeOperation::Create { quantity, .. } => *quantity += more,
            MergeOperation::IncrementQuantity { delta, .. } => *delta += more,
        }
    }
}

// =============================================================================
// History Entry
// =============================================================================

/// One line of a user's append-only request history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct HistoryEntry {
    pub id: String,
    /// Joined catalog identifiers, or the raw request when none were given.
    pub query: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(query: impl Into<String>) -> Self {
        HistoryEntry {
            id: Uuid::new_v4().to_string(),
            query: query.into(),
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Cart Limits
// =============================================================================

/// Bounds enforced when merge operations are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLimits {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    #[serde(default = "default_max_quantity")]
    pub max_quantity: f64,
}

fn default_max_entries() -> usize {
    MAX_CART_ENTRIES
}

fn default_max_quantity() -> f64 {
    MAX_ENTRY_QUANTITY
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits {
            max_entries: default_max_entries(),
            max_quantity: default_max_quantity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_entry_line_total() {
        let entry = CartEntry::new(
            "Rice",
            Quantity::new(1.5).unwrap(),
            Money::from_minor(6000),
        );
        assert_eq!(entry.line_total().minor(), 9000);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let a = CartEntry::new("Milk", Quantity::ONE, Money::zero());
        let b = CartEntry::new("Milk", Quantity::ONE, Money::zero());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_merge_operation_wire_shape() {
        let op = MergeOperation::Create {
            name: "Bread".into(),
            quantity: Quantity::new(2.0).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            serde_json::json!({"kind": "create", "name": "Bread", "quantity": 2.0})
        );

        let op = MergeOperation::IncrementQuantity {
            entry_id: "e1".into(),
            name: "Rice".into(),
            delta: Quantity::new(0.5).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            serde_json::json!({
                "kind": "increment_quantity",
                "entryId": "e1",
                "name": "Rice",
                "delta": 0.5
            })
        );
    }

    #[test]
    fn test_absorb() {
        let mut op = MergeOperation::Create {
            name: "Bread".into(),
            quantity: Quantity::ONE,
        };
        op.absorb(Quantity::new(2.0).unwrap());
        assert_eq!(op.quantity().value(), 3.0);
        assert_eq!(op.name(), "Bread");
    }

    #[test]
    fn test_parsed_item_builder() {
        let item = ParsedItem::new("Milk", Quantity::ONE).with_history_id("12345");
        assert_eq!(item.history_id.as_deref(), Some("12345"));
    }

    #[test]
    fn test_cart_limits_default() {
        let limits = CartLimits::default();
        assert_eq!(limits.max_entries, MAX_CART_ENTRIES);
        assert_eq!(limits.max_quantity, MAX_ENTRY_QUANTITY);
    }
}
