//! # Cart Book
//!
//! In-memory, per-user carts and request history.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Book Locking                                    │
//! │                                                                         │
//! │  users: Mutex<HashMap<user, Arc<Mutex<UserBasket>>>>                    │
//! │           │                                                             │
//! │           └─ held only long enough to find the user's basket; only      │
//! │              writes insert one, reads of unknown users return empty     │
//! │                                                                         │
//! │  UserBasket mutex                                                       │
//! │           └─ held across snapshot → reconcile → apply → log, so two     │
//! │              requests for the same user cannot lose each other's        │
//! │              increments. Different users never contend.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//! ```text
//! submit_request() ──► parse → reconcile → apply → history.push
//! add_entry()      ──► entries.push (validated)
//! update_entry()   ──► entries[i].quantity / price
//! remove_entry()   ──► entries.remove(i)
//! clear()          ──► entries.clear()
//! history()        ──► newest first
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use basket_core::validation::{
    validate_entry_id, validate_history_query, validate_item_name, validate_price,
    validate_quantity,
};
use basket_core::{
    apply_operations, parse, reconcile, CartEntry, CartLimits, CartSummary, CoreError,
    HistoryEntry, MergeOperation, Money, ParsedItem, ParserConfig,
};

use crate::config::BasketConfig;
use crate::error::ServiceResult;

// =============================================================================
// Request / Response Types
// =============================================================================

/// A manually added entry. Quantity defaults to 1 and price to 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub price: Money,
}

fn default_quantity() -> f64 {
    1.0
}

impl NewEntry {
    pub fn named(name: impl Into<String>) -> Self {
        NewEntry {
            name: name.into(),
            quantity: default_quantity(),
            price: Money::zero(),
        }
    }
}

/// Partial update of an entry; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    pub quantity: Option<f64>,
    pub price: Option<Money>,
}

/// What a free-text request did to the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOutcome {
    pub items: Vec<ParsedItem>,
    pub operations: Vec<MergeOperation>,
    pub history: HistoryEntry,
    pub entries: Vec<CartEntry>,
}

// =============================================================================
// Cart Book
// =============================================================================

#[derive(Debug, Default)]
struct UserBasket {
    entries: Vec<CartEntry>,
    /// Oldest first; reversed on read.
    history: Vec<HistoryEntry>,
}

impl UserBasket {
    fn entry_mut(&mut self, id: &str) -> ServiceResult<&mut CartEntry> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()).into())
    }
}

/// Carts and history for every user, kept in memory.
#[derive(Debug, Default)]
pub struct CartBook {
    parser: ParserConfig,
    limits: CartLimits,
    users: Mutex<HashMap<String, Arc<Mutex<UserBasket>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl CartBook {
    pub fn new(config: BasketConfig) -> Self {
        CartBook {
            parser: config.parser,
            limits: config.limits,
            users: Mutex::new(HashMap::new()),
        }
    }

    pub fn parser_config(&self) -> &ParserConfig {
        &self.parser
    }

    pub fn limits(&self) -> &CartLimits {
        &self.limits
    }

    /// The user's basket, created on first write.
    fn basket(&self, user: &str) -> Arc<Mutex<UserBasket>> {
        let mut users = lock(&self.users);
        Arc::clone(users.entry(user.to_string()).or_default())
    }

    /// The user's basket, if anything was ever written for them.
    fn existing_basket(&self, user: &str) -> Option<Arc<Mutex<UserBasket>>> {
        lock(&self.users).get(user).cloned()
    }

    /// Parses `raw`, merges it into the user's cart and records history.
    ///
    /// Nothing is changed if the merged cart would break the limits.
    pub fn submit_request(&self, user: &str, raw: &str) -> ServiceResult<RequestOutcome> {
        validate_history_query(raw)?;

        let basket = self.basket(user);
        let mut basket = lock(&basket);

        let items = parse(raw, &self.parser);
        let result = reconcile(raw, &items, &basket.entries);
        apply_operations(&mut basket.entries, &result.operations, &self.limits)?;

        let history = HistoryEntry::new(result.history_log);
        basket.history.push(history.clone());

        info!(
            user = %user,
            items = items.len(),
            operations = result.operations.len(),
            "Applied shopping request"
        );

        Ok(RequestOutcome {
            items,
            operations: result.operations,
            history,
            entries: basket.entries.clone(),
        })
    }

    /// Returns a copy of the user's cart.
    pub fn entries(&self, user: &str) -> Vec<CartEntry> {
        let Some(basket) = self.existing_basket(user) else {
            return Vec::new();
        };
        let basket = lock(&basket);
        basket.entries.clone()
    }

    pub fn summary(&self, user: &str) -> CartSummary {
        CartSummary::from(self.entries(user).as_slice())
    }

    /// Adds an entry typed in by hand.
    pub fn add_entry(&self, user: &str, new: NewEntry) -> ServiceResult<CartEntry> {
        let name = validate_item_name(&new.name)?;
        let quantity = validate_quantity(new.quantity, self.limits.max_quantity)?;
        validate_price(new.price)?;

        let basket = self.basket(user);
        let mut basket = lock(&basket);

        if basket.entries.len() >= self.limits.max_entries {
            return Err(CoreError::CartTooLarge {
                max: self.limits.max_entries,
            }
            .into());
        }

        let entry = CartEntry::new(name, quantity, new.price);
        debug!(user = %user, id = %entry.id, name = %entry.name, "Adding cart entry");
        basket.entries.push(entry.clone());
        Ok(entry)
    }

    /// Changes quantity and/or price of one entry.
    pub fn update_entry(
        &self,
        user: &str,
        id: &str,
        update: EntryUpdate,
    ) -> ServiceResult<CartEntry> {
        validate_entry_id(id)?;
        let quantity = update
            .quantity
            .map(|q| validate_quantity(q, self.limits.max_quantity))
            .transpose()?;
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let basket = self
            .existing_basket(user)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;
        let mut basket = lock(&basket);
        let entry = basket.entry_mut(id)?;

        if let Some(quantity) = quantity {
            entry.quantity = quantity;
        }
        if let Some(price) = update.price {
            entry.price = price;
        }

        debug!(user = %user, id = %id, quantity = %entry.quantity, price = %entry.price, "Updated cart entry");
        Ok(entry.clone())
    }

    pub fn remove_entry(&self, user: &str, id: &str) -> ServiceResult<CartEntry> {
        validate_entry_id(id)?;

        let basket = self
            .existing_basket(user)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;
        let mut basket = lock(&basket);
        let index = basket
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::EntryNotFound(id.to_string()))?;

        debug!(user = %user, id = %id, "Removing cart entry");
        Ok(basket.entries.remove(index))
    }

    /// Empties the cart; history is kept.
    pub fn clear(&self, user: &str) {
        debug!(user = %user, "Clearing cart");
        if let Some(basket) = self.existing_basket(user) {
            lock(&basket).entries.clear();
        }
    }

    /// Request history, newest first.
    pub fn history(&self, user: &str) -> Vec<HistoryEntry> {
        let Some(basket) = self.existing_basket(user) else {
            return Vec::new();
        };
        let basket = lock(&basket);
        basket.history.iter().rev().cloned().collect()
    }

    /// Appends a history line directly.
    pub fn record_history(&self, user: &str, query: &str) -> ServiceResult<HistoryEntry> {
        validate_history_query(query)?;
        let entry = HistoryEntry::new(query);
        lock(&self.basket(user)).history.push(entry.clone());
        Ok(entry)
    }

    pub fn clear_history(&self, user: &str) {
        debug!(user = %user, "Clearing history");
        if let Some(basket) = self.existing_basket(user) {
            lock(&basket).history.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ServiceError};

    fn book() -> CartBook {
        CartBook::new(BasketConfig::default())
    }

    #[test]
    fn test_submit_request_creates_then_increments() {
        let book = book();

        let first = book.submit_request("u1", "rice 2 and milk").unwrap();
        assert_eq!(first.operations.len(), 2);
        assert_eq!(first.entries.len(), 2);

        let second = book.submit_request("u1", "RICE 1/2").unwrap();
        assert!(matches!(
            &second.operations[..],
            [MergeOperation::IncrementQuantity { name, .. }] if name == "Rice"
        ));

        let entries = book.entries("u1");
        assert_eq!(entries[0].name, "Rice");
        assert_eq!(entries[0].quantity.value(), 2.5);
    }

    #[test]
    fn test_history_records_identifiers_or_raw() {
        let book = book();
        book.submit_request("u1", "milk 12345 and bread 67890").unwrap();
        book.submit_request("u1", "eggs 6").unwrap();

        let history = book.history("u1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].query, "eggs 6");
        assert_eq!(history[1].query, "12345, 67890");
    }

    #[test]
    fn test_stopword_request_changes_nothing_but_is_logged() {
        let book = book();
        let outcome = book.submit_request("u1", "bro please").unwrap();
        assert!(outcome.items.is_empty());
        assert!(book.entries("u1").is_empty());
        assert_eq!(book.history("u1")[0].query, "bro please");
    }

    #[test]
    fn test_blank_request_is_rejected() {
        let err = book().submit_request("u1", "   ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_limits_leave_cart_untouched() {
        let mut config = BasketConfig::default();
        config.limits.max_quantity = 10.0;
        let book = CartBook::new(config);

        book.submit_request("u1", "rice 8").unwrap();
        let err = book.submit_request("u1", "rice 5 and milk").unwrap_err();
        assert_eq!(err.code(), ErrorCode::LimitExceeded);

        let entries = book.entries("u1");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].quantity.value(), 8.0);
        assert_eq!(book.history("u1").len(), 1);
    }

    #[test]
    fn test_manual_entry_lifecycle() {
        let book = book();
        let entry = book
            .add_entry(
                "u1",
                NewEntry {
                    price: Money::from_minor(4500),
                    ..NewEntry::named("  Sugar ")
                },
            )
            .unwrap();
        assert_eq!(entry.name, "Sugar");

        let updated = book
            .update_entry(
                "u1",
                &entry.id,
                EntryUpdate {
                    quantity: Some(2.0),
                    price: None,
                },
            )
            .unwrap();
        assert_eq!(updated.quantity.value(), 2.0);
        assert_eq!(updated.price.minor(), 4500);
        assert_eq!(book.summary("u1").total_price.minor(), 9000);

        let removed = book.remove_entry("u1", &entry.id).unwrap();
        assert_eq!(removed.id, entry.id);
        assert!(book.entries("u1").is_empty());
    }

    #[test]
    fn test_update_rejects_non_positive_quantity() {
        let book = book();
        let entry = book.add_entry("u1", NewEntry::named("Milk")).unwrap();
        let err = book
            .update_entry(
                "u1",
                &entry.id,
                EntryUpdate {
                    quantity: Some(0.0),
                    price: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, ServiceError::Core(CoreError::Validation(_))));
        assert_eq!(book.entries("u1")[0].quantity.value(), 1.0);
    }

    #[test]
    fn test_unknown_entry_is_not_found() {
        let book = book();
        let err = book
            .remove_entry("u1", "550e8400-e29b-41d4-a716-446655440000")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_users_are_isolated() {
        let book = book();
        book.submit_request("u1", "rice").unwrap();
        assert!(book.entries("u2").is_empty());
        assert!(book.history("u2").is_empty());
    }

    #[test]
    fn test_reads_do_not_register_users() {
        let book = book();
        book.submit_request("u1", "rice").unwrap();

        assert!(book.entries("ghost").is_empty());
        assert!(book.history("ghost").is_empty());
        assert_eq!(book.summary("ghost").unique_products, 0);
        book.clear("ghost");
        book.clear_history("ghost");

        let id = "550e8400-e29b-41d4-a716-446655440000";
        let err = book.remove_entry("ghost", id).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
        let err = book
            .update_entry("ghost", id, EntryUpdate::default())
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);

        assert_eq!(lock(&book.users).len(), 1);
    }

    #[test]
    fn test_record_history_rejects_blank_and_lists_newest_first() {
        let book = book();

        let err = book.record_history("u1", "  ").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert!(book.history("u1").is_empty());

        book.submit_request("u1", "milk 12345").unwrap();
        let recorded = book.record_history("u1", "eggs and bread").unwrap();
        assert_eq!(recorded.query, "eggs and bread");

        let queries: Vec<_> = book.history("u1").into_iter().map(|h| h.query).collect();
        assert_eq!(queries, ["eggs and bread", "12345"]);
        assert_eq!(book.entries("u1").len(), 1);
    }

    #[test]
    fn test_clear_keeps_history() {
        let book = book();
        book.submit_request("u1", "rice").unwrap();
        book.clear("u1");
        assert!(book.entries("u1").is_empty());
        assert_eq!(book.history("u1").len(), 1);

        book.clear_history("u1");
        assert!(book.history("u1").is_empty());
    }

    #[test]
    fn test_add_entry_respects_max_entries() {
        let mut config = BasketConfig::default();
        config.limits.max_entries = 1;
        let book = CartBook::new(config);

        book.add_entry("u1", NewEntry::named("Rice")).unwrap();
        let err = book.add_entry("u1", NewEntry::named("Milk")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::LimitExceeded);
    }

    #[test]
    fn test_new_entry_defaults_from_json() {
        let new: NewEntry = serde_json::from_str(r#"{"name": "Bread"}"#).unwrap();
        assert_eq!(new.quantity, 1.0);
        assert!(new.price.is_zero());
    }
}
