//! # graphcrawl core
//!
//! Pure primitives for graphcrawl: state fingerprints, the action vocabulary,
//! and the edge/path values exchanged between the crawler and its store.
//!
//! This crate contains no I/O, no storage and no device access.
//!
//! ## Key Types
//!
//! - [`StateId`] - Opaque fingerprint of one application state
//! - [`Action`] - The fixed, ordered vocabulary of input gestures
//! - [`Edge`] - A discovered `(from, action, to)` transition
//! - [`PathStep`] - One `(expected state, action)` step of a replay path

pub mod action;
pub mod error;
pub mod types;

pub use action::Action;
pub use error::{CoreError, Result};
pub use types::{Edge, PathStep, StateId};
