//! Portable snapshots of an exploration graph.
//!
//! A snapshot is the whole graph as plain data: every state in discovery
//! order and every edge. Coverage and analysis tools consume it as CBOR or
//! JSON; it can also seed a fresh store.

use serde::{Deserialize, Serialize};

use graphcrawl_core::{Edge, StateId};

use crate::error::{Result, StoreError};
use crate::traits::GraphStore;

/// Snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A complete copy of an exploration graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub version: u32,
    /// States in discovery order.
    pub states: Vec<StateId>,
    /// Edges ordered by `(from, action, to)`.
    pub edges: Vec<Edge>,
}

/// What `GraphSnapshot::restore_into` added to the target store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreReport {
    pub states_added: usize,
    pub edges_added: usize,
}

impl GraphSnapshot {
    /// Read the whole graph out of a store.
    pub fn capture<S: GraphStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self {
            version: SNAPSHOT_VERSION,
            states: store.states()?,
            edges: store.edges()?,
        })
    }

    /// Write every state and edge into `store`, skipping what it already has.
    pub fn restore_into<S: GraphStore + ?Sized>(&self, store: &S) -> Result<RestoreReport> {
        let mut report = RestoreReport::default();
        for state in &self.states {
            if store.add_state_if_new(state)?.is_new() {
                report.states_added += 1;
            }
        }
        for edge in &self.edges {
            if store.add_edge(&edge.from, edge.action, &edge.to)?.is_new() {
                report.edges_added += 1;
            }
        }
        Ok(report)
    }

    /// Encode as CBOR.
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Decode from CBOR.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self =
            ciborium::from_reader(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(s).map_err(|e| StoreError::Serialization(e.to_string()))?;
        snapshot.check_version()?;
        Ok(snapshot)
    }

    fn check_version(&self) -> Result<()> {
        if self.version != SNAPSHOT_VERSION {
            return Err(StoreError::InvalidData(format!(
                "unsupported snapshot version {}",
                self.version
            )));
        }
        Ok(())
    }
}
