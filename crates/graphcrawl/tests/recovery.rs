//! Crash recovery and fatal error handling against an on-disk graph.

use std::collections::BTreeSet;
use std::sync::Arc;

use graphcrawl::core::Action;
use graphcrawl::device::{DeviceError, SimulatedApp};
use graphcrawl::store::{GraphSnapshot, GraphStore, MemoryStore};
use graphcrawl::{ExploreError, Explorer, ExplorerConfig, FirstSelector};
use graphcrawl_testkit::{assert_fully_explored, expected_edge_count, scenarios, CrawlFixture, FlakyDevice};

#[test]
fn test_recovered_targets_match_frontier() {
    let fixture = CrawlFixture::new(scenarios::login_flow());
    fixture.explorer().resume(7).unwrap();

    let mut explorer = fixture.explorer();
    let recovered = explorer.recover().unwrap();

    let frontier = explorer.store().frontier_states(&Action::ALL).unwrap();
    assert!(!frontier.is_empty());
    assert_eq!(recovered, frontier.len());
    assert_eq!(
        explorer.queue().pending().iter().collect::<BTreeSet<_>>(),
        frontier.iter().collect::<BTreeSet<_>>()
    );
    assert!(explorer.queue().stack().is_empty());
}

#[test]
fn test_resume_after_crash_completes_graph() {
    let fixture = CrawlFixture::new(scenarios::login_flow());

    let mut sessions = 0;
    loop {
        sessions += 1;
        assert!(sessions < 100, "crawl never finished");

        // Every session is a new process: fresh device, reopened database.
        let report = fixture.explorer().resume(4).unwrap();
        if report.drained() {
            break;
        }
    }
    assert!(sessions > 1);

    let store = fixture.open_store();
    assert_fully_explored(&store, &fixture.model, &Action::ALL);
    assert_eq!(
        store.edge_count().unwrap(),
        expected_edge_count(&fixture.model, &Action::ALL)
    );
}

#[test]
fn test_second_session_recovers_previous_frontier() {
    let fixture = CrawlFixture::new(scenarios::linear_chain(5));
    let first = fixture.explorer().resume(3).unwrap();
    assert_eq!(first.recovered_targets, 0);

    let second = fixture.explorer().resume(0).unwrap();
    assert!(second.recovered_targets > 0);
    assert_eq!(second.new_states, 0);
}

#[test]
fn test_action_failure_is_fatal_and_leaves_action_unperformed() {
    let fixture = CrawlFixture::new(scenarios::login_flow());
    let device = FlakyDevice::new(fixture.app()).fail_action_at(2);
    let mut explorer = Explorer::new(device, fixture.open_store(), ExplorerConfig::default())
        .unwrap()
        .with_selector(FirstSelector);

    let err = explorer.resume(100).unwrap_err();
    assert!(matches!(
        err,
        ExploreError::Device(DeviceError::ActionFailed {
            action: Action::ClickBottom,
            ..
        })
    ));
    drop(explorer);

    // login -> home and home's self-loop were recorded; the failed gesture was not.
    let store = fixture.open_store();
    assert_eq!(store.edge_count().unwrap(), 2);
    assert!(store
        .unperformed_actions(&"home".into(), &Action::ALL)
        .unwrap()
        .contains(&Action::ClickBottom));

    let report = fixture.explorer().resume(1000).unwrap();
    assert!(report.drained());
    assert_fully_explored(&fixture.open_store(), &fixture.model, &Action::ALL);
}

#[test]
fn test_restart_failure_is_fatal() {
    let fixture = CrawlFixture::new(scenarios::single_tap());
    let device = FlakyDevice::new(fixture.app()).fail_restart_at(0);
    let mut explorer = Explorer::new(device, fixture.open_store(), ExplorerConfig::default()).unwrap();

    assert!(matches!(
        explorer.resume(10),
        Err(ExploreError::Device(DeviceError::RestartFailed(_)))
    ));
    assert_eq!(fixture.open_store().state_count().unwrap(), 0);
}

#[test]
fn test_random_device_failures_never_lose_progress() {
    let fixture = CrawlFixture::new(scenarios::linear_chain(6));
    let mut edges_seen = 0;

    for seed in 0..200 {
        let device = FlakyDevice::new(fixture.app()).random_action_failures(0.2, seed);
        let mut explorer = Explorer::new(device, fixture.open_store(), fixture.config.clone()).unwrap();
        let result = explorer.resume(50);

        let edges = explorer.store().edge_count().unwrap();
        assert!(edges >= edges_seen);
        edges_seen = edges;

        if matches!(result, Ok(report) if report.drained()) {
            break;
        }
    }

    assert_fully_explored(&fixture.open_store(), &fixture.model, &Action::ALL);
}

#[test]
fn test_explorers_share_one_store() {
    let model = scenarios::login_flow();
    let store = Arc::new(MemoryStore::new());

    let make = |seed| {
        let app = SimulatedApp::new(model.clone()).unwrap();
        Explorer::new(app, Arc::clone(&store), ExplorerConfig::default().with_seed(seed)).unwrap()
    };
    let mut a = make(1);
    let mut b = make(2);

    a.resume(5).unwrap();
    b.resume(5).unwrap();
    a.resume(1000).unwrap();

    assert_fully_explored(store.as_ref(), &model, &Action::ALL);
}

#[test]
fn test_snapshot_seeds_a_new_crawl() {
    let fixture = CrawlFixture::new(scenarios::login_flow());
    fixture.explorer().resume(10).unwrap();

    let snapshot = GraphSnapshot::from_cbor(
        &GraphSnapshot::capture(&fixture.open_store()).unwrap().to_cbor().unwrap(),
    )
    .unwrap();

    let store = MemoryStore::new();
    snapshot.restore_into(&store).unwrap();
    let known = store.edge_count().unwrap();

    let mut explorer = Explorer::new(fixture.app(), store, ExplorerConfig::default()).unwrap();
    let report = explorer.resume(1000).unwrap();

    assert!(report.drained());
    assert_eq!(report.new_edges + known, expected_edge_count(&fixture.model, &Action::ALL));
}

#[test]
fn test_new_entry_screen_after_app_update() {
    let fixture = CrawlFixture::new(scenarios::login_flow());
    assert!(fixture.explorer().resume(1000).unwrap().drained());
    let known = fixture.open_store().edge_count().unwrap();

    // The update puts an onboarding screen in front of home.
    let mut app = fixture.app();
    app.set_roots(["onboarding"]);
    app.set_transition("onboarding", Action::ClickCenter, ["home"]);
    let updated = app.model();

    let mut explorer = Explorer::new(app, fixture.open_store(), fixture.config.clone()).unwrap();
    let report = explorer.resume(1000).unwrap();

    assert!(report.drained());
    assert_eq!(report.recovered_targets, 0);
    assert_eq!(report.new_states, 1);
    assert_eq!(report.new_edges, Action::ALL.len());
    assert_eq!(explorer.store().edge_count().unwrap(), known + Action::ALL.len());
    assert_fully_explored(explorer.store(), &updated, &Action::ALL);
}
