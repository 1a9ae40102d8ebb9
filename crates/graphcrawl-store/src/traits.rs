//! GraphStore trait: the abstract interface for exploration graph persistence.
//!
//! This trait allows the crawler to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use std::sync::Arc;

use graphcrawl_core::{Action, Edge, PathStep, StateId};

use crate::error::Result;

/// Result of inserting a state or an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// The value was new and has been stored.
    Inserted,
    /// The value already exists (idempotent - not an error).
    AlreadyExists,
}

impl InsertResult {
    pub fn is_new(self) -> bool {
        matches!(self, InsertResult::Inserted)
    }
}

/// The GraphStore trait: blocking interface for the exploration graph.
///
/// The store is the only durable source of truth. Each method must be
/// atomic on its own; callers never need a multi-call transaction.
///
/// # Design Notes
///
/// - **Idempotent states**: adding a known state returns `AlreadyExists`.
/// - **Duplicate-tolerant edges**: edges are unique on `(from, action, to)`.
///   A nondeterministic app may record several edges for one
///   `(from, action)` pair; the action counts as performed once any exists.
/// - **Implicit endpoints**: `add_edge` registers unknown endpoints.
pub trait GraphStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a state if it has not been seen before.
    fn add_state_if_new(&self, state: &StateId) -> Result<InsertResult>;

    /// Record a transition.
    fn add_edge(&self, from: &StateId, action: Action, to: &StateId) -> Result<InsertResult>;

    // ─────────────────────────────────────────────────────────────────────────
    // Exploration queries
    // ─────────────────────────────────────────────────────────────────────────

    /// States with at least one vocabulary action not yet recorded.
    ///
    /// Returned in discovery order.
    fn frontier_states(&self, vocabulary: &[Action]) -> Result<Vec<StateId>>;

    /// Vocabulary actions with no recorded outgoing edge from `state`.
    ///
    /// Returned in vocabulary order. An unknown state has every action
    /// unperformed.
    fn unperformed_actions(&self, state: &StateId, vocabulary: &[Action]) -> Result<Vec<Action>>;

    /// Shortest recorded path from `from` to `to` over directed edges.
    ///
    /// Empty if the states are disconnected or identical.
    fn shortest_path(&self, from: &StateId, to: &StateId) -> Result<Vec<PathStep>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection (reporting and export)
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if a state is known.
    fn has_state(&self, state: &StateId) -> Result<bool>;

    /// Number of known states.
    fn state_count(&self) -> Result<usize>;

    /// Number of recorded edges.
    fn edge_count(&self) -> Result<usize>;

    /// All known states, in discovery order.
    fn states(&self) -> Result<Vec<StateId>>;

    /// All recorded edges, ordered by `(from, action, to)`.
    fn edges(&self) -> Result<Vec<Edge>>;
}

/// Lets several crawl sessions share one store.
impl<S: GraphStore + ?Sized> GraphStore for Arc<S> {
    fn add_state_if_new(&self, state: &StateId) -> Result<InsertResult> {
        (**self).add_state_if_new(state)
    }

    fn add_edge(&self, from: &StateId, action: Action, to: &StateId) -> Result<InsertResult> {
        (**self).add_edge(from, action, to)
    }

    fn frontier_states(&self, vocabulary: &[Action]) -> Result<Vec<StateId>> {
        (**self).frontier_states(vocabulary)
    }

    fn unperformed_actions(&self, state: &StateId, vocabulary: &[Action]) -> Result<Vec<Action>> {
        (**self).unperformed_actions(state, vocabulary)
    }

    fn shortest_path(&self, from: &StateId, to: &StateId) -> Result<Vec<PathStep>> {
        (**self).shortest_path(from, to)
    }

    fn has_state(&self, state: &StateId) -> Result<bool> {
        (**self).has_state(state)
    }

    fn state_count(&self) -> Result<usize> {
        (**self).state_count()
    }

    fn edge_count(&self) -> Result<usize> {
        (**self).edge_count()
    }

    fn states(&self) -> Result<Vec<StateId>> {
        (**self).states()
    }

    fn edges(&self) -> Result<Vec<Edge>> {
        (**self).edges()
    }
}
