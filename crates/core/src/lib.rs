//! Travel Planner Core - client-side state for the travel planner.
//!
//! This crate holds the state layer shared by every travel planner surface:
//! - a session store tracking the logged-in traveler
//! - an order store holding the traveler's bookings
//! - the static route table mapping paths to views
//!
//! # Architecture
//!
//! Both stores own one key each in a synchronous key-value [`Storage`]
//! (local storage in a browser, a JSON file for the CLI, a map in tests).
//! State is read once on construction, mutated in memory, and written back
//! on every change. The stores never share state with each other.
//!
//! # Modules
//!
//! - [`session`] - Login state, persisted under `currentUser`
//! - [`orders`] - Order collection, persisted under `orders`
//! - [`router`] - Path to view resolution
//! - [`storage`] - The storage trait and its backends
//! - [`types`] - Order records and ids

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod orders;
pub mod router;
pub mod session;
pub mod storage;
pub mod types;

pub use error::StoreError;
pub use orders::OrderStore;
pub use router::{Route, RouteError, RouteTable, View};
pub use session::{SessionState, SessionStore};
#[cfg(feature = "file-storage")]
pub use storage::FileStorage;
pub use storage::{MemoryStorage, Storage, StorageError};
pub use types::*;
