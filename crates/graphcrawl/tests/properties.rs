//! Property tests over generated apps.

use proptest::prelude::*;

use graphcrawl::core::{Action, StateId};
use graphcrawl::device::{AppModel, SimulatedApp};
use graphcrawl::store::{GraphSnapshot, GraphStore, MemoryStore, SqliteStore};
use graphcrawl::{Explorer, ExplorerConfig, FirstSelector};
use graphcrawl_testkit::generators::{deterministic_model, nondeterministic_model, vocabulary};
use graphcrawl_testkit::{assert_fully_explored, expected_edge_count};

/// The part of `model` a crawler limited to `vocab` can see.
fn restrict(model: &AppModel, vocab: &[Action]) -> AppModel {
    AppModel {
        roots: model.roots.clone(),
        transitions: model
            .transitions
            .iter()
            .filter(|t| vocab.contains(&t.action))
            .cloned()
            .collect(),
    }
}

/// Where `action` from `from` may lead in `model`.
fn outcomes(model: &AppModel, from: &StateId, action: Action) -> Vec<StateId> {
    model
        .transitions
        .iter()
        .find(|t| &t.from == from && t.action == action)
        .map(|t| t.to.clone())
        .unwrap_or_else(|| vec![from.clone()])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn full_crawl_discovers_exactly_the_reachable_graph(
        model in deterministic_model(6),
        vocab in vocabulary(),
        seed in any::<u64>(),
    ) {
        let app = SimulatedApp::new(model.clone()).unwrap();
        let config = ExplorerConfig::default().with_vocabulary(vocab.clone()).with_seed(seed);
        let mut explorer = Explorer::new(app, MemoryStore::new(), config).unwrap();

        let report = explorer.resume(5000).unwrap();
        let visible = restrict(&model, &vocab);

        prop_assert!(report.drained());
        prop_assert_eq!(report.divergences, 0);
        assert_fully_explored(explorer.store(), &visible, &vocab);
        prop_assert_eq!(explorer.store().state_count().unwrap(), visible.reachable_states().len());
        prop_assert_eq!(explorer.store().edge_count().unwrap(), expected_edge_count(&visible, &vocab));
        prop_assert_eq!(report.exploratory_actions, expected_edge_count(&visible, &vocab));
    }

    #[test]
    fn step_budget_is_respected(
        model in nondeterministic_model(6),
        budget in 0usize..40,
        seed in any::<u64>(),
    ) {
        let app = SimulatedApp::new(model).unwrap();
        let mut explorer =
            Explorer::new(app, MemoryStore::new(), ExplorerConfig::default().with_seed(seed)).unwrap();

        let report = explorer.resume(budget).unwrap();

        prop_assert!(report.iterations <= budget);
        prop_assert!(report.exploratory_actions <= budget);
        prop_assert_eq!(
            report.drained(),
            explorer.queue().is_empty()
        );
    }

    #[test]
    fn nondeterministic_crawls_record_only_real_transitions(
        model in nondeterministic_model(5),
        budget in 0usize..200,
        seed in any::<u64>(),
    ) {
        let app = SimulatedApp::new(model.clone()).unwrap();
        let mut explorer =
            Explorer::new(app, MemoryStore::new(), ExplorerConfig::default().with_seed(seed)).unwrap();
        explorer.resume(budget).unwrap();

        for edge in explorer.store().edges().unwrap() {
            prop_assert!(
                outcomes(&model, &edge.from, edge.action).contains(&edge.to),
                "edge {:?} is not in the model",
                edge
            );
        }

        // A fresh session recovers exactly the frontier.
        let (app, store) = explorer.into_parts();
        let frontier = store.frontier_states(&Action::ALL).unwrap();
        let mut next = Explorer::new(app, store, ExplorerConfig::default()).unwrap();
        prop_assert_eq!(next.recover().unwrap(), frontier.len());
        prop_assert_eq!(next.queue().pending(), &frontier[..]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn backends_build_identical_graphs(model in deterministic_model(5)) {
        let memory = {
            let app = SimulatedApp::new(model.clone()).unwrap();
            let mut explorer = Explorer::new(app, MemoryStore::new(), ExplorerConfig::default())
                .unwrap()
                .with_selector(FirstSelector);
            explorer.resume(2000).unwrap();
            GraphSnapshot::capture(explorer.store()).unwrap()
        };
        let sqlite = {
            let app = SimulatedApp::new(model).unwrap();
            let mut explorer = Explorer::new(app, SqliteStore::open_memory().unwrap(), ExplorerConfig::default())
                .unwrap()
                .with_selector(FirstSelector);
            explorer.resume(2000).unwrap();
            GraphSnapshot::capture(explorer.store()).unwrap()
        };
        prop_assert_eq!(memory, sqlite);
    }
}
