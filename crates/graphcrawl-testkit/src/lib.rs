//! # graphcrawl testkit
//!
//! Testing utilities for graphcrawl.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Scenarios**: Small hand-checked app models and seed graphs
//! - **Generators**: Proptest strategies for app models and graphs
//! - **Fixtures**: On-disk crawl setups that can be "crashed" and reopened
//! - **Faults**: A device wrapper that fails on demand
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use graphcrawl_testkit::generators::deterministic_model;
//!
//! proptest! {
//!     #[test]
//!     fn crawls_terminate(model in deterministic_model(8)) {
//!         // ...
//!     }
//! }
//! ```
//!
//! ## Crash Fixtures
//!
//! ```rust
//! use graphcrawl_testkit::{scenarios, CrawlFixture};
//!
//! let fixture = CrawlFixture::new(scenarios::login_flow());
//! fixture.explorer().resume(3).unwrap();
//!
//! // A new explorer on the same file continues the crawl.
//! let report = fixture.explorer().resume(1000).unwrap();
//! assert!(report.drained());
//! ```

pub mod faults;
pub mod fixtures;
pub mod generators;
pub mod scenarios;

pub use faults::FlakyDevice;
pub use fixtures::{assert_fully_explored, expected_edge_count, CrawlFixture};
