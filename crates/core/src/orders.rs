//! Order store.
//!
//! Keeps the authoritative list of a user's orders in memory and writes the
//! whole list to storage under [`keys::ORDERS`] after every mutation.
//!
//! # Consistency
//!
//! Memory and storage match whenever a call returns. A mutation serializes
//! the new collection and writes it before committing it in memory, so a
//! failed write leaves the previous collection in place.
//!
//! # Unrecognized Records
//!
//! Stored records are decoded one at a time. A record that is not a valid
//! [`Order`] (no `date`, an id that is neither a string nor a number) is
//! logged, left out of the collection, and kept verbatim. It is written back
//! after the orders on every mutation, so one bad record never costs the
//! others.
//!
//! # Derived Views
//!
//! [`OrderStore::total_orders`] and [`OrderStore::user_orders`] are computed
//! from the current collection on every call.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::storage::{Storage, keys};
use crate::types::{Order, OrderId};

/// In-memory order collection mirrored to storage.
///
/// ```rust
/// use travel_planner_core::{MemoryStorage, Order, OrderStore};
///
/// let storage = MemoryStorage::new();
/// let mut orders = OrderStore::new(&storage);
///
/// orders.add_order(Order::new("A", "2024-01-01")).unwrap();
/// orders.add_order(Order::new("B", "2024-03-01")).unwrap();
///
/// assert_eq!(orders.total_orders(), 2);
/// assert_eq!(orders.user_orders()[0].id, "B");
/// ```
#[derive(Debug)]
pub struct OrderStore<S> {
    storage: S,
    orders: Vec<Order>,
    unrecognized: Vec<Value>,
}

impl<S: Storage> OrderStore<S> {
    /// Create a store and load the persisted orders.
    pub fn new(storage: S) -> Self {
        let mut store = Self {
            storage,
            orders: Vec::new(),
            unrecognized: Vec::new(),
        };
        store.load_orders();
        store
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// A missing, unreadable, or malformed collection loads as empty.
    /// Individual records that do not decode are kept aside, see
    /// [`OrderStore::unrecognized`].
    pub fn load_orders(&mut self) {
        let (orders, unrecognized) = self.read_persisted();
        self.orders = orders;
        self.unrecognized = unrecognized;
        tracing::debug!(
            count = self.orders.len(),
            unrecognized = self.unrecognized.len(),
            "Orders loaded"
        );
    }

    /// Append `order` and persist the collection.
    ///
    /// Ids are not checked for uniqueness.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be written. The order is
    /// not added in that case.
    pub fn add_order(&mut self, order: Order) -> Result<()> {
        let id = order.id.clone();
        self.orders.push(order);

        if let Err(e) = self.persist() {
            self.orders.pop();
            tracing::warn!(error = %e, order_id = %id, "Failed to persist new order");
            return Err(e);
        }

        tracing::debug!(order_id = %id, total = self.orders.len(), "Order added");
        Ok(())
    }

    /// The first order with a matching id.
    ///
    /// Ids compare with their type: `"7"` does not find an order stored
    /// with the numeric id `7`.
    #[must_use]
    pub fn get_order_by_id(&self, id: impl Into<OrderId>) -> Option<&Order> {
        self.get(&id.into())
    }

    /// Borrowing variant of [`OrderStore::get_order_by_id`].
    #[must_use]
    pub fn get(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == *id)
    }

    /// Remove every order with a matching id and persist the collection.
    ///
    /// Unrecognized records carrying the same id are removed too. The
    /// collection is written even when nothing matched. Returns the number
    /// of records removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the collection cannot be written. No order is
    /// removed in that case.
    pub fn delete_order(&mut self, id: impl Into<OrderId>) -> Result<usize> {
        let id = id.into();
        let id_value = serde_json::to_value(&id)?;

        let remaining: Vec<Order> = self
            .orders
            .iter()
            .filter(|order| order.id != id)
            .cloned()
            .collect();
        let unrecognized: Vec<Value> = self
            .unrecognized
            .iter()
            .filter(|record| record.get("id") != Some(&id_value))
            .cloned()
            .collect();
        let removed = (self.orders.len() - remaining.len())
            + (self.unrecognized.len() - unrecognized.len());

        if let Err(e) = self.write(&remaining, &unrecognized) {
            tracing::warn!(error = %e, order_id = %id, "Failed to persist order deletion");
            return Err(e);
        }

        self.orders = remaining;
        self.unrecognized = unrecognized;
        tracing::debug!(order_id = %id, removed, total = self.orders.len(), "Orders deleted");
        Ok(removed)
    }

    /// Number of orders.
    ///
    /// Unrecognized records are not counted.
    #[must_use]
    pub fn total_orders(&self) -> usize {
        self.orders.len()
    }

    /// All orders, most recent first.
    ///
    /// The sort is stable, so orders with the same date keep insertion
    /// order. Orders whose date cannot be parsed come last.
    #[must_use]
    pub fn user_orders(&self) -> Vec<&Order> {
        let mut keyed: Vec<(Option<DateTime<Utc>>, &Order)> = self
            .orders
            .iter()
            .map(|order| (order.timestamp(), order))
            .collect();
        // None < Some, so reversing puts undated orders last
        keyed.sort_by_key(|(ts, _)| Reverse(*ts));
        keyed.into_iter().map(|(_, order)| order).collect()
    }

    /// All orders in insertion order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Stored records that could not be read as orders, verbatim.
    #[must_use]
    pub fn unrecognized(&self) -> &[Value] {
        &self.unrecognized
    }

    /// The storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) -> Result<()> {
        self.write(&self.orders, &self.unrecognized)
    }

    fn write(&self, orders: &[Order], unrecognized: &[Value]) -> Result<()> {
        let mut records = orders
            .iter()
            .map(serde_json::to_value)
            .collect::<serde_json::Result<Vec<Value>>>()?;
        records.extend_from_slice(unrecognized);

        let json = serde_json::to_string(&records)?;
        self.storage.set_item(keys::ORDERS, &json)?;
        Ok(())
    }

    fn read_persisted(&self) -> (Vec<Order>, Vec<Value>) {
        let raw = match self.storage.get_item(keys::ORDERS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (Vec::new(), Vec::new()),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read persisted orders");
                return (Vec::new(), Vec::new());
            }
        };

        let records = match serde_json::from_str::<Option<Vec<Value>>>(&raw) {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed persisted orders");
                return (Vec::new(), Vec::new());
            }
        };

        let mut orders = Vec::with_capacity(records.len());
        let mut unrecognized = Vec::new();
        for (index, record) in records.into_iter().enumerate() {
            match Order::deserialize(&record) {
                Ok(order) => orders.push(order),
                Err(e) => {
                    tracing::warn!(error = %e, index, "Keeping unrecognized order record as-is");
                    unrecognized.push(record);
                }
            }
        }
        (orders, unrecognized)
    }
}
