//! # graphcrawl store
//!
//! Storage abstraction for the exploration graph. Provides a trait-based
//! interface for state/edge persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The graph is the only durable state of a crawl. Everything the crawler
//! keeps in memory (its stack, its pending targets) can be rebuilt from
//! [`GraphStore::frontier_states`] after a crash.
//!
//! ## Key Types
//!
//! - [`GraphStore`] - The blocking trait for all graph operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`InsertResult`] - Result of inserting a state or edge
//! - [`GraphSnapshot`] - Portable CBOR/JSON copy of a whole graph
//!
//! ## Usage
//!
//! ```rust,no_run
//! use graphcrawl_core::{Action, StateId};
//! use graphcrawl_store::{GraphStore, InsertResult, SqliteStore};
//!
//! let store = SqliteStore::open("crawl.db").unwrap();
//!
//! let root = StateId::new("3f9a01");
//! assert_eq!(store.add_state_if_new(&root).unwrap(), InsertResult::Inserted);
//!
//! let left = store.unperformed_actions(&root, &Action::ALL).unwrap();
//! assert_eq!(left.len(), 6);
//! ```
//!
//! ## Design Notes
//!
//! - **Idempotent inserts**: Inserting the same state twice returns `AlreadyExists`
//! - **Duplicate-tolerant edges**: Edges are unique on `(from, action, to)`
//! - **Deterministic queries**: Frontier in discovery order, paths tie-broken by action order

pub mod error;
pub mod memory;
pub mod migration;
mod path;
pub mod snapshot;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use snapshot::{GraphSnapshot, RestoreReport};
pub use sqlite::SqliteStore;
pub use traits::{GraphStore, InsertResult};
