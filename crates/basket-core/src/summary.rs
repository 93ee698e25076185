//! # Cart Summary
//!
//! Totals shown under the cart: how many units, how many distinct
//! products, and what it all costs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::CartEntry;

/// Cart totals for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    /// Sum of all entry quantities (fractional amounts included).
    pub total_items: f64,
    /// Number of entries.
    pub unique_products: usize,
    /// Σ price × quantity, rounded per line.
    pub total_price: Money,
}

impl From<&[CartEntry]> for CartSummary {
    fn from(entries: &[CartEntry]) -> Self {
        CartSummary {
            total_items: entries.iter().map(|e| e.quantity.value()).sum(),
            unique_products: entries.len(),
            total_price: entries.iter().map(CartEntry::line_total).sum(),
        }
    }
}
