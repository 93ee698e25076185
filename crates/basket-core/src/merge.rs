//! # Cart Merge Engine
//!
//! Reconciles parsed items against a cart snapshot.
//!
//! ## Reconcile Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Snapshot: [Rice ×1]          Request: "rice 2, 1/2 rice and bread"     │
//! │                                                                         │
//! │  Rice ×2    → matches "Rice" (case-insensitive) → Increment(+2)         │
//! │  Rice ×0.5  → same name again                   → folded: Increment(+2.5)│
//! │  Bread ×1   → no match                          → Create(Bread, 1)      │
//! │                                                                         │
//! │  Output: [Increment(Rice, +2.5), Create(Bread, 1)]                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Matching is by name only; catalog identifiers are carried to the history
//! log and never used to find entries. The working copy built here lives
//! only for the duration of one call.

use std::collections::HashMap;
use tracing::debug;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::{CartEntry, CartLimits, MergeOperation, ParsedItem};

/// Separator between catalog identifiers in a history log line.
pub const HISTORY_SEPARATOR: &str = ", ";

/// Operations plus the line to append to the user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub operations: Vec<MergeOperation>,
    pub history_log: String,
}

/// Per-call view of one cart line (real or synthetic).
struct WorkingEntry<'a> {
    origin: Origin<'a>,
    quantity: Quantity,
}

enum Origin<'a> {
    /// Present in the snapshot; `operation` is set once a request item hits it.
    Snapshot {
        entry: &'a CartEntry,
        operation: Option<usize>,
    },
    /// Introduced by this request through the `Create` at `operation`.
    Requested { operation: usize },
}

/// Produces one net operation per distinct (case-insensitive) item name,
/// in first-seen order.
///
/// ```rust
/// use basket_core::merge::merge;
/// use basket_core::{CartEntry, Money, MergeOperation, ParsedItem, Quantity};
///
/// let cart = vec![CartEntry::new("Rice", Quantity::ONE, Money::zero())];
/// let items = vec![ParsedItem::new("RICE", Quantity::new(2.0).unwrap())];
///
/// let ops = merge(&items, &cart);
/// assert!(matches!(&ops[..], [MergeOperation::IncrementQuantity { delta, .. }]
///     if delta.value() == 2.0));
/// ```
pub fn merge(items: &[ParsedItem], existing: &[CartEntry]) -> Vec<MergeOperation> {
    let mut working: Vec<WorkingEntry<'_>> = Vec::with_capacity(existing.len() + items.len());
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for entry in existing {
        by_name.entry(entry.name.to_lowercase()).or_insert_with(|| {
            working.push(WorkingEntry {
                origin: Origin::Snapshot {
                    entry,
                    operation: None,
                },
                quantity: entry.quantity,
            });
            working.len() - 1
        });
    }

    let mut operations: Vec<MergeOperation> = Vec::new();

    for item in items {
        let key = item.name.to_lowercase();

        let Some(&index) = by_name.get(&key) else {
            debug!(name = %item.name, quantity = %item.quantity, "No cart match, creating");
            operations.push(MergeOperation::Create {
                name: item.name.clone(),
                quantity: item.quantity,
            });
            working.push(WorkingEntry {
                origin: Origin::Requested {
                    operation: operations.len() - 1,
                },
                quantity: item.quantity,
            });
            by_name.insert(key, working.len() - 1);
            continue;
        };

        let line = &mut working[index];
        line.quantity += item.quantity;

        match &mut line.origin {
            Origin::Requested { operation }
            | Origin::Snapshot {
                operation: Some(operation),
                ..
            } => operations[*operation].absorb(item.quantity),
            Origin::Snapshot { entry, operation } => {
                operations.push(MergeOperation::IncrementQuantity {
                    entry_id: entry.id.clone(),
                    name: entry.name.clone(),
                    delta: item.quantity,
                });
                *operation = Some(operations.len() - 1);
            }
        }

        debug!(name = %item.name, total = %line.quantity, "Matched cart line");
    }

    operations
}

/// Catalog identifiers in encounter order, or `raw` when there are none.
///
/// ```rust
/// use basket_core::merge::history_log;
/// use basket_core::{ParsedItem, Quantity};
///
/// let items = vec![
///     ParsedItem::new("Milk", Quantity::ONE).with_history_id("12345"),
///     ParsedItem::new("Bread", Quantity::ONE),
/// ];
/// assert_eq!(history_log("milk 12345 bread", &items), "12345");
/// assert_eq!(history_log("bread", &items[1..]), "bread");
/// ```
pub fn history_log(raw: &str, items: &[ParsedItem]) -> String {
    let ids: Vec<&str> = items
        .iter()
        .filter_map(|i| i.history_id.as_deref())
        .filter(|id| !id.is_empty())
        .collect();

    if ids.is_empty() {
        raw.to_string()
    } else {
        ids.join(HISTORY_SEPARATOR)
    }
}

/// Merges `items` into `existing` and builds the history line for `raw`.
pub fn reconcile(raw: &str, items: &[ParsedItem], existing: &[CartEntry]) -> Reconciliation {
    Reconciliation {
        operations: merge(items, existing),
        history_log: history_log(raw, items),
    }
}

/// Applies operations to a cart snapshot, all or nothing.
///
/// New entries get a fresh id and a zero price. Every operation is checked
/// against `limits` before the snapshot is touched.
pub fn apply_operations(
    cart: &mut Vec<CartEntry>,
    operations: &[MergeOperation],
    limits: &CartLimits,
) -> CoreResult<()> {
    let creates = operations
        .iter()
        .filter(|op| matches!(op, MergeOperation::Create { .. }))
        .count();
    if cart.len() + creates > limits.max_entries {
        return Err(CoreError::CartTooLarge {
            max: limits.max_entries,
        });
    }

    for op in operations {
        let resulting = match op {
            MergeOperation::Create { quantity, .. } => *quantity,
            MergeOperation::IncrementQuantity {
                entry_id, delta, ..
            } => {
                let entry = cart
                    .iter()
                    .find(|e| &e.id == entry_id)
                    .ok_or_else(|| CoreError::EntryNotFound(entry_id.clone()))?;
                entry.quantity + *delta
            }
        };

        if resulting.value() > limits.max_quantity {
            return Err(CoreError::QuantityTooLarge {
                name: op.name().to_string(),
                requested: resulting.value(),
                max: limits.max_quantity,
            });
        }
    }

    for op in operations {
        match op {
            MergeOperation::Create { name, quantity } => {
                cart.push(CartEntry::new(name.clone(), *quantity, Money::zero()));
            }
            MergeOperation::IncrementQuantity {
                entry_id, delta, ..
            } => {
                if let Some(entry) = cart.iter_mut().find(|e| &e.id == entry_id) {
                    entry.quantity += *delta;
                }
            }
        }
    }

    Ok(())
}
