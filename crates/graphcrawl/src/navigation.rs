//! Moving the live app to a known state.
//!
//! The graph may be stale and the app may be nondeterministic, so reaching a
//! target is best effort: restart, look up the shortest recorded path from
//! wherever the restart landed, and replay it while checking every
//! fingerprint on the way.
//!
//! Failure is ordinary. Whatever the replay learned is written to the graph
//! before giving up, and compensating work is queued so the crawl continues
//! from where the app actually is.

use graphcrawl_core::{Action, StateId};
use graphcrawl_device::Device;
use graphcrawl_store::GraphStore;
use tracing::{debug, warn};

use crate::error::Result;
use crate::explorer::Explorer;
use crate::selector::ActionSelector;

/// How an attempt to reach a target ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The app was already showing the target. No restart.
    AlreadyThere,
    /// Restart plus `steps` replayed gestures reached the target.
    Arrived { steps: usize },
    /// No recorded path from `root`. Target deferred, `root` stacked.
    Unreachable { root: StateId },
    /// Replay left the recorded path. The new edge
    /// `(at, action, observed)` is recorded, the target deferred and
    /// `observed` stacked.
    Diverged {
        at: StateId,
        action: Action,
        expected: StateId,
        observed: StateId,
    },
}

impl NavigationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::AlreadyThere | Self::Arrived { .. })
    }
}

impl<D, S, A> Explorer<D, S, A>
where
    D: Device,
    S: GraphStore,
    A: ActionSelector,
{
    /// Put the app into `target`.
    ///
    /// Only device and store failures are errors. When the target cannot
    /// be reached the returned outcome says why, and the work queue has
    /// already been adjusted.
    pub fn navigate_to(&mut self, target: &StateId) -> Result<NavigationOutcome> {
        let current = self.device.state_hash()?;
        if &current == target {
            return Ok(NavigationOutcome::AlreadyThere);
        }

        debug!(target = %target.short(), from = %current.short(), "navigating");
        let root = self.restart()?;
        if &root == target {
            return Ok(NavigationOutcome::Arrived { steps: 0 });
        }

        let path = self.store.shortest_path(&root, target)?;
        if path.is_empty() {
            warn!(
                root = %root.short(),
                target = %target.short(),
                "no recorded path, deferring target"
            );
            self.queue.defer(target.clone());
            self.queue.push(root.clone());
            self.report.unreachable += 1;
            return Ok(NavigationOutcome::Unreachable { root });
        }

        let mut position = root;
        for step in &path {
            let observed = self.device.perform(step.action)?;
            self.report.replay_actions += 1;

            if observed != step.expected {
                warn!(
                    at = %position.short(),
                    action = %step.action,
                    expected = %step.expected.short(),
                    observed = %observed.short(),
                    "replay diverged"
                );
                self.register(&observed)?;
                self.record_edge(&position, step.action, &observed)?;
                self.queue.defer(target.clone());
                self.queue.push(observed.clone());
                self.report.divergences += 1;
                return Ok(NavigationOutcome::Diverged {
                    at: position,
                    action: step.action,
                    expected: step.expected.clone(),
                    observed,
                });
            }
            position = observed;
        }

        debug!(target = %target.short(), steps = path.len(), "arrived");
        Ok(NavigationOutcome::Arrived { steps: path.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorerConfig;
    use crate::selector::FirstSelector;
    use graphcrawl_device::{AppModel, SimulatedApp};
    use graphcrawl_store::MemoryStore;

    fn explorer(model: AppModel, store: MemoryStore) -> Explorer<SimulatedApp, MemoryStore, FirstSelector> {
        let app = SimulatedApp::new(model).unwrap();
        Explorer::new(app, store, ExplorerConfig::default())
            .unwrap()
            .with_selector(FirstSelector)
    }

    #[test]
    fn test_outcome_success() {
        assert!(NavigationOutcome::AlreadyThere.is_success());
        assert!(NavigationOutcome::Arrived { steps: 2 }.is_success());
        assert!(!NavigationOutcome::Unreachable { root: "r".into() }.is_success());
    }

    #[test]
    fn test_fast_path_skips_restart() {
        let mut explorer = explorer(AppModel::new("home"), MemoryStore::new());
        explorer.device_mut().jump_to("deep");

        let outcome = explorer.navigate_to(&"deep".into()).unwrap();
        assert_eq!(outcome, NavigationOutcome::AlreadyThere);
        assert_eq!(explorer.device().restarts(), 0);
    }

    #[test]
    fn test_root_is_target() {
        let mut explorer = explorer(AppModel::new("home"), MemoryStore::new());
        explorer.device_mut().jump_to("elsewhere");

        let outcome = explorer.navigate_to(&"home".into()).unwrap();
        assert_eq!(outcome, NavigationOutcome::Arrived { steps: 0 });
        assert!(explorer.store().has_state(&"home".into()).unwrap());
        assert_eq!(explorer.device().actions_executed(), 0);
    }

    #[test]
    fn test_multi_step_replay() {
        let store = MemoryStore::new();
        store.add_edge(&"home".into(), Action::ClickCenter, &"menu".into()).unwrap();
        store.add_edge(&"menu".into(), Action::SwipeLeft, &"about".into()).unwrap();

        let model = AppModel::new("home")
            .with_transition("home", Action::ClickCenter, "menu")
            .with_transition("menu", Action::SwipeLeft, "about");
        let mut explorer = explorer(model, store);

        let outcome = explorer.navigate_to(&"about".into()).unwrap();
        assert_eq!(outcome, NavigationOutcome::Arrived { steps: 2 });
        assert_eq!(explorer.device().current(), &StateId::from("about"));
        assert_eq!(explorer.report().replay_actions, 2);
        assert!(explorer.queue().is_empty());
    }
}
