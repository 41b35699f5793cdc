//! Core types for the travel planner.
//!
//! This module provides the record types persisted by the stores.

pub mod id;
pub mod order;

pub use id::OrderId;
pub use order::{Order, OrderDate, RESERVED_FIELDS, is_reserved_field, parse_order_date};
