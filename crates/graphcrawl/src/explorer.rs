//! The exploration loop.
//!
//! One [`Explorer`] owns one crawl session: a device, a handle to the graph
//! store, a gesture selector and the in-memory work queue. Every discovery
//! is written to the store the moment it is observed, so killing the
//! process at any point loses at most the gesture in flight. A fresh
//! explorer over the same store picks up from the graph's frontier.

use graphcrawl_core::{Action, StateId};
use graphcrawl_device::Device;
use graphcrawl_store::GraphStore;
use tracing::{debug, info};

use crate::config::ExplorerConfig;
use crate::error::Result;
use crate::frontier::WorkQueue;
use crate::report::SessionReport;
use crate::selector::{ActionSelector, RandomSelector};

/// A depth-first crawler over a live app and a durable graph.
///
/// The type parameters are the device driver, the graph store and the
/// gesture selector. The store may be shared with other explorers through
/// an `Arc`.
pub struct Explorer<D, S, A = RandomSelector> {
    pub(crate) device: D,
    pub(crate) store: S,
    selector: A,
    config: ExplorerConfig,
    pub(crate) queue: WorkQueue,
    pub(crate) report: SessionReport,
}

impl<D, S> Explorer<D, S, RandomSelector>
where
    D: Device,
    S: GraphStore,
{
    /// Create an explorer that picks untried gestures at random.
    ///
    /// The selector is seeded from `config.seed`, or from entropy when no
    /// seed is set.
    pub fn new(device: D, store: S, config: ExplorerConfig) -> Result<Self> {
        config.validate()?;
        let selector = RandomSelector::new(config.seed);
        Ok(Self {
            device,
            store,
            selector,
            config,
            queue: WorkQueue::new(),
            report: SessionReport::default(),
        })
    }
}

impl<D, S, A> Explorer<D, S, A>
where
    D: Device,
    S: GraphStore,
    A: ActionSelector,
{
    /// Swap the gesture selection strategy.
    pub fn with_selector<B: ActionSelector>(self, selector: B) -> Explorer<D, S, B> {
        Explorer {
            device: self.device,
            store: self.store,
            selector,
            config: self.config,
            queue: self.queue,
            report: self.report,
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current stack and pending targets.
    pub fn queue(&self) -> &WorkQueue {
        &self.queue
    }

    /// Counters of the current (or last) session.
    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    /// Give back the device and store.
    pub fn into_parts(self) -> (D, S) {
        (self.device, self.store)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session
    // ─────────────────────────────────────────────────────────────────────────

    /// Run one session with the configured step budget.
    pub fn resume_default(&mut self) -> Result<SessionReport> {
        self.resume(self.config.max_steps)
    }

    /// Recover, boot the app, then explore for at most `max_steps` loop
    /// iterations.
    ///
    /// Each iteration executes at most one untried gesture, so the budget
    /// also bounds exploratory actions. Replay gestures are not charged.
    /// The work queue survives the call; calling `resume` again continues
    /// the crawl after a fresh recovery and boot.
    pub fn resume(&mut self, max_steps: usize) -> Result<SessionReport> {
        self.report = SessionReport::default();
        info!(max_steps, "starting exploration session");

        let recovered = self.recover()?;
        info!(recovered, "recovered frontier from graph");

        let root = self.bootstrap()?;
        info!(root = %root.short(), "app booted");

        let mut steps = 0;
        while !self.queue.is_empty() && steps < max_steps {
            steps += 1;
            self.report.iterations += 1;
            self.step(steps)?;
        }

        self.report.remaining_stack = self.queue.stack().len();
        self.report.remaining_pending = self.queue.pending().len();
        info!(
            iterations = self.report.iterations,
            new_states = self.report.new_states,
            new_edges = self.report.new_edges,
            divergences = self.report.divergences,
            remaining = self.report.remaining_stack + self.report.remaining_pending,
            "exploration session finished"
        );
        Ok(self.report)
    }

    /// Append every frontier state in the graph to the pending targets.
    pub fn recover(&mut self) -> Result<usize> {
        let frontier = self.store.frontier_states(&self.config.vocabulary)?;
        let recovered = self.queue.recover(frontier);
        self.report.recovered_targets += recovered;
        Ok(recovered)
    }

    /// Restart the app, register where it landed and stack it.
    pub fn bootstrap(&mut self) -> Result<StateId> {
        let root = self.restart()?;
        self.queue.push(root.clone());
        Ok(root)
    }

    /// One loop iteration.
    fn step(&mut self, step: usize) -> Result<()> {
        let Some(target) = self.queue.next() else {
            return Ok(());
        };

        if !self.navigate_to(&target)?.is_success() {
            return Ok(());
        }

        let unperformed = self
            .store
            .unperformed_actions(&target, &self.config.vocabulary)?;
        let Some(action) = self.selector.choose(&unperformed) else {
            debug!(state = %target.short(), "fully explored");
            self.report.fully_explored += 1;
            return Ok(());
        };

        info!(step, %action, from = %target.short(), "exploring");
        let new_state = self.device.perform(action)?;
        self.report.exploratory_actions += 1;

        self.register(&new_state)?;
        self.record_edge(&target, action, &new_state)?;

        if unperformed.len() > 1 {
            self.queue.push(target);
        }
        self.queue.push(new_state);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Graph and device helpers shared with navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Restart, observe and register the landing state.
    pub(crate) fn restart(&mut self) -> Result<StateId> {
        let root = self.device.restart_and_observe()?;
        self.report.restarts += 1;
        self.register(&root)?;
        Ok(root)
    }

    pub(crate) fn register(&mut self, state: &StateId) -> Result<()> {
        if self.store.add_state_if_new(state)?.is_new() {
            debug!(state = %state.short(), "new state");
            self.report.new_states += 1;
        }
        Ok(())
    }

    pub(crate) fn record_edge(&mut self, from: &StateId, action: Action, to: &StateId) -> Result<()> {
        if self.store.add_edge(from, action, to)?.is_new() {
            debug!(from = %from.short(), %action, to = %to.short(), "new edge");
            self.report.new_edges += 1;
        }
        Ok(())
    }
}
