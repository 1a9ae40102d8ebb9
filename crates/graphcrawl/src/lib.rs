//! # graphcrawl
//!
//! Unattended, resumable exploration of interactive applications.
//!
//! ## Overview
//!
//! The crawler drives an app through gestures, fingerprints every screen it
//! reaches, and records what it learns as a graph of states and
//! transitions. The graph lives in a durable store and is the only thing
//! that matters after a crash: a new session recovers its work list from
//! the graph's frontier and carries on.
//!
//! - **Depth-first**: the state just reached is explored next; its parent
//!   is put back while it still has untried gestures.
//! - **Replay navigation**: to revisit a state the app is restarted and the
//!   shortest recorded path is replayed, checking each fingerprint.
//! - **Divergence tolerant**: when the app leaves the recorded path, the
//!   new transition is recorded and exploration continues from where the
//!   app actually is.
//!
//! ## Usage
//!
//! ```rust
//! use graphcrawl::{Explorer, ExplorerConfig};
//! use graphcrawl::core::Action;
//! use graphcrawl::device::{AppModel, SimulatedApp};
//! use graphcrawl::store::{GraphStore, MemoryStore};
//!
//! let model = AppModel::new("home")
//!     .with_transition("home", Action::ClickCenter, "menu")
//!     .with_transition("menu", Action::SwipeDown, "home");
//! let app = SimulatedApp::new(model).unwrap();
//!
//! let config = ExplorerConfig::default().with_seed(42);
//! let mut explorer = Explorer::new(app, MemoryStore::new(), config).unwrap();
//!
//! let report = explorer.resume(500).unwrap();
//! assert!(report.drained());
//! assert_eq!(explorer.store().state_count().unwrap(), 2);
//! ```
//!
//! ## Re-exports
//!
//! - `graphcrawl::core` - States, actions, edges
//! - `graphcrawl::store` - Graph storage, SQLite and in-memory
//! - `graphcrawl::device` - Device trait and the simulated app

pub mod config;
pub mod error;
pub mod explorer;
pub mod frontier;
pub mod navigation;
pub mod report;
pub mod selector;

pub use graphcrawl_core as core;
pub use graphcrawl_device as device;
pub use graphcrawl_store as store;

pub use config::{ExplorerConfig, DEFAULT_MAX_STEPS};
pub use error::{ExploreError, Result};
pub use explorer::Explorer;
pub use frontier::WorkQueue;
pub use navigation::NavigationOutcome;
pub use report::SessionReport;
pub use selector::{ActionSelector, FirstSelector, RandomSelector};

pub use graphcrawl_core::{Action, Edge, PathStep, StateId};
