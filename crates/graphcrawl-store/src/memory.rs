//! In-memory implementation of the GraphStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use graphcrawl_core::{Action, Edge, PathStep, StateId};

use crate::error::{Result, StoreError};
use crate::path;
use crate::traits::{GraphStore, InsertResult};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// States in discovery order.
    order: Vec<StateId>,

    /// State -> index into `order`.
    index: HashMap<StateId, usize>,

    /// All edges, ordered by (from, action, to).
    edges: BTreeSet<Edge>,

    /// Adjacency: from -> sorted (action, to).
    outgoing: HashMap<StateId, BTreeSet<(Action, StateId)>>,
}

impl MemoryStoreInner {
    fn insert_state(&mut self, state: &StateId) -> InsertResult {
        if self.index.contains_key(state) {
            return InsertResult::AlreadyExists;
        }
        self.index.insert(state.clone(), self.order.len());
        self.order.push(state.clone());
        InsertResult::Inserted
    }

    fn performed(&self, state: &StateId) -> BTreeSet<Action> {
        self.outgoing
            .get(state)
            .map(|succ| succ.iter().map(|(a, _)| *a).collect())
            .unwrap_or_default()
    }
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphStore for MemoryStore {
    fn add_state_if_new(&self, state: &StateId) -> Result<InsertResult> {
        Ok(self.write()?.insert_state(state))
    }

    fn add_edge(&self, from: &StateId, action: Action, to: &StateId) -> Result<InsertResult> {
        let mut inner = self.write()?;
        inner.insert_state(from);
        inner.insert_state(to);

        let edge = Edge::new(from.clone(), action, to.clone());
        if !inner.edges.insert(edge) {
            return Ok(InsertResult::AlreadyExists);
        }
        inner
            .outgoing
            .entry(from.clone())
            .or_default()
            .insert((action, to.clone()));

        Ok(InsertResult::Inserted)
    }

    fn frontier_states(&self, vocabulary: &[Action]) -> Result<Vec<StateId>> {
        let inner = self.read()?;
        Ok(inner
            .order
            .iter()
            .filter(|state| {
                let performed = inner.performed(state);
                vocabulary.iter().any(|a| !performed.contains(a))
            })
            .cloned()
            .collect())
    }

    fn unperformed_actions(&self, state: &StateId, vocabulary: &[Action]) -> Result<Vec<Action>> {
        let inner = self.read()?;
        let performed = inner.performed(state);
        Ok(vocabulary
            .iter()
            .copied()
            .filter(|a| !performed.contains(a))
            .collect())
    }

    fn shortest_path(&self, from: &StateId, to: &StateId) -> Result<Vec<PathStep>> {
        let inner = self.read()?;
        path::shortest_path(from, to, |state| {
            Ok(inner
                .outgoing
                .get(state)
                .map(|succ| succ.iter().cloned().collect())
                .unwrap_or_default())
        })
    }

    fn has_state(&self, state: &StateId) -> Result<bool> {
        Ok(self.read()?.index.contains_key(state))
    }

    fn state_count(&self) -> Result<usize> {
        Ok(self.read()?.order.len())
    }

    fn edge_count(&self) -> Result<usize> {
        Ok(self.read()?.edges.len())
    }

    fn states(&self) -> Result<Vec<StateId>> {
        Ok(self.read()?.order.clone())
    }

    fn edges(&self) -> Result<Vec<Edge>> {
        Ok(self.read()?.edges.iter().cloned().collect())
    }
}
