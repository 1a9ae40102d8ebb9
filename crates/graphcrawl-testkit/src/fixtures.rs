//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

use graphcrawl::{Explorer, ExplorerConfig, FirstSelector};
use graphcrawl_core::Action;
use graphcrawl_device::{AppModel, SimulatedApp};
use graphcrawl_store::{GraphStore, MemoryStore, SqliteStore};

/// An app model plus a scratch directory for its graph database.
///
/// Each call to [`CrawlFixture::explorer`] builds a fresh device and reopens
/// the database, which is what a crashed and restarted crawler sees.
pub struct CrawlFixture {
    dir: TempDir,
    pub model: AppModel,
    pub config: ExplorerConfig,
}

impl CrawlFixture {
    /// Fixture with a seeded default config.
    pub fn new(model: AppModel) -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
            model,
            config: ExplorerConfig::default().with_seed(0),
        }
    }

    pub fn with_config(mut self, config: ExplorerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("graph.db")
    }

    /// Open (or reopen) the on-disk graph.
    pub fn open_store(&self) -> SqliteStore {
        SqliteStore::open(self.db_path()).expect("open graph database")
    }

    /// A fresh device in its initial state.
    pub fn app(&self) -> SimulatedApp {
        SimulatedApp::new(self.model.clone()).expect("valid app model")
    }

    /// A new random-selection explorer over the on-disk graph.
    pub fn explorer(&self) -> Explorer<SimulatedApp, SqliteStore> {
        Explorer::new(self.app(), self.open_store(), self.config.clone()).expect("valid config")
    }

    /// A deterministic explorer over a fresh in-memory graph.
    pub fn memory_explorer(&self) -> Explorer<SimulatedApp, MemoryStore, FirstSelector> {
        Explorer::new(self.app(), MemoryStore::new(), self.config.clone())
            .expect("valid config")
            .with_selector(FirstSelector)
    }
}

/// Number of edges a full crawl of a deterministic model records.
///
/// Every reachable screen gets one edge per gesture.
pub fn expected_edge_count(model: &AppModel, vocabulary: &[Action]) -> usize {
    model.reachable_states().len() * vocabulary.len()
}

/// Panic unless `store` holds every reachable screen and has no frontier.
pub fn assert_fully_explored<S: GraphStore + ?Sized>(store: &S, model: &AppModel, vocabulary: &[Action]) {
    for state in model.reachable_states() {
        assert!(
            store.has_state(&state).expect("has_state"),
            "reachable state {state} was never discovered"
        );
    }
    let frontier = store.frontier_states(vocabulary).expect("frontier");
    assert!(frontier.is_empty(), "frontier not empty: {frontier:?}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios;

    #[test]
    fn test_fixture_reopens_same_database() {
        let fixture = CrawlFixture::new(scenarios::single_tap());
        fixture.open_store().add_state_if_new(&"R".into()).unwrap();
        assert!(fixture.open_store().has_state(&"R".into()).unwrap());
    }

    #[test]
    fn test_expected_edge_count() {
        assert_eq!(expected_edge_count(&scenarios::linear_chain(3), &Action::ALL), 18);
    }
}
