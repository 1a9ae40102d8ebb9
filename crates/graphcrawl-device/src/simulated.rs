//! A simulated application driven by a transition table.
//!
//! Used by tests and by the CLI to crawl an app without real hardware. The
//! model can express the awkward parts of real apps:
//!
//! - several entry states, cycled on each restart (multi-root boots);
//! - several outcomes for one `(state, action)`, cycled on each attempt
//!   (nondeterminism);
//! - edits while a crawl is running (app updates).
//!
//! A gesture with no transition leaves the app where it is.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use graphcrawl_core::{Action, StateId};

use crate::error::{DeviceError, Result};
use crate::traits::Device;

/// One row of the transition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: StateId,
    pub action: Action,
    /// Possible results, used in turn.
    pub to: Vec<StateId>,
}

/// Declarative description of a simulated app.
///
/// ```json
/// {
///   "roots": ["home"],
///   "transitions": [
///     { "from": "home", "action": "click_center", "to": ["menu"] },
///     { "from": "menu", "action": "swipe_down", "to": ["home"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppModel {
    pub roots: Vec<StateId>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

impl AppModel {
    /// A model with a single entry state and no transitions.
    pub fn new(root: impl Into<StateId>) -> Self {
        Self {
            roots: vec![root.into()],
            transitions: Vec::new(),
        }
    }

    /// Add a deterministic transition.
    pub fn with_transition(
        mut self,
        from: impl Into<StateId>,
        action: Action,
        to: impl Into<StateId>,
    ) -> Self {
        self.transitions.push(Transition {
            from: from.into(),
            action,
            to: vec![to.into()],
        });
        self
    }

    /// Add a transition whose result cycles through `outcomes`.
    pub fn with_outcomes<I, T>(mut self, from: impl Into<StateId>, action: Action, outcomes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StateId>,
    {
        self.transitions.push(Transition {
            from: from.into(),
            action,
            to: outcomes.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add another entry state; restarts cycle through all roots.
    pub fn with_root(mut self, root: impl Into<StateId>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Parse a model from JSON and validate it.
    pub fn from_json(s: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(s)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a JSON model from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the model can drive a device.
    pub fn validate(&self) -> Result<()> {
        if self.roots.is_empty() {
            return Err(DeviceError::InvalidModel("model has no root state".into()));
        }
        for root in &self.roots {
            StateId::parse(root.as_str())?;
        }

        let mut seen = BTreeSet::new();
        for t in &self.transitions {
            StateId::parse(t.from.as_str())?;
            if t.to.is_empty() {
                return Err(DeviceError::InvalidModel(format!(
                    "transition {} --{}--> has no outcome",
                    t.from, t.action
                )));
            }
            for to in &t.to {
                StateId::parse(to.as_str())?;
            }
            if !seen.insert((t.from.clone(), t.action)) {
                return Err(DeviceError::InvalidModel(format!(
                    "duplicate transition {} --{}-->",
                    t.from, t.action
                )));
            }
        }
        Ok(())
    }

    /// Every state reachable from any root, in breadth-first order.
    pub fn reachable_states(&self) -> Vec<StateId> {
        let mut successors: HashMap<&StateId, Vec<&StateId>> = HashMap::new();
        for t in &self.transitions {
            successors.entry(&t.from).or_default().extend(t.to.iter());
        }

        let mut seen: BTreeSet<&StateId> = BTreeSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<&StateId> = VecDeque::new();
        for root in &self.roots {
            if seen.insert(root) {
                queue.push_back(root);
            }
        }
        while let Some(state) = queue.pop_front() {
            order.push(state.clone());
            for next in successors.get(state).into_iter().flatten().copied() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        order
    }
}

/// A [`Device`] backed by an [`AppModel`].
#[derive(Debug, Clone)]
pub struct SimulatedApp {
    roots: Vec<StateId>,
    table: BTreeMap<(StateId, Action), Vec<StateId>>,
    /// Next outcome index per transition.
    cursors: HashMap<(StateId, Action), usize>,
    next_root: usize,
    current: StateId,
    settle_delay: Option<Duration>,
    restarts: usize,
    actions_executed: usize,
}

impl SimulatedApp {
    /// Build a device from a model. The app starts in the first root.
    pub fn new(model: AppModel) -> Result<Self> {
        model.validate()?;

        let current = model.roots[0].clone();
        let table = model
            .transitions
            .into_iter()
            .map(|t| ((t.from, t.action), t.to))
            .collect();

        Ok(Self {
            roots: model.roots,
            table,
            cursors: HashMap::new(),
            next_root: 0,
            current,
            settle_delay: None,
            restarts: 0,
            actions_executed: 0,
        })
    }

    /// Sleep this long in every `wait_for_settle`.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = Some(delay);
        self
    }

    /// The model this device currently simulates.
    pub fn model(&self) -> AppModel {
        AppModel {
            roots: self.roots.clone(),
            transitions: self
                .table
                .iter()
                .map(|((from, action), to)| Transition {
                    from: from.clone(),
                    action: *action,
                    to: to.clone(),
                })
                .collect(),
        }
    }

    /// Where the app is right now.
    pub fn current(&self) -> &StateId {
        &self.current
    }

    /// Put the app in an arbitrary state, as if a user had wandered off.
    pub fn jump_to(&mut self, state: impl Into<StateId>) {
        self.current = state.into();
    }

    /// Replace the outcomes of one transition (simulates an app update).
    ///
    /// An empty `outcomes` removes the transition.
    pub fn set_transition<I, T>(&mut self, from: impl Into<StateId>, action: Action, outcomes: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<StateId>,
    {
        let key = (from.into(), action);
        let outcomes: Vec<StateId> = outcomes.into_iter().map(Into::into).collect();
        self.cursors.remove(&key);
        if outcomes.is_empty() {
            self.table.remove(&key);
        } else {
            self.table.insert(key, outcomes);
        }
    }

    /// Replace the entry states. Ignored if `roots` is empty.
    pub fn set_roots<I, T>(&mut self, roots: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<StateId>,
    {
        let roots: Vec<StateId> = roots.into_iter().map(Into::into).collect();
        if !roots.is_empty() {
            self.roots = roots;
            self.next_root = 0;
        }
    }

    /// Number of restarts so far.
    pub fn restarts(&self) -> usize {
        self.restarts
    }

    /// Number of gestures delivered so far.
    pub fn actions_executed(&self) -> usize {
        self.actions_executed
    }
}

impl Device for SimulatedApp {
    fn restart_app(&mut self) -> Result<()> {
        self.current = self.roots[self.next_root % self.roots.len()].clone();
        self.next_root = (self.next_root + 1) % self.roots.len();
        self.restarts += 1;
        Ok(())
    }

    fn wait_for_settle(&mut self) -> Result<()> {
        if let Some(delay) = self.settle_delay {
            std::thread::sleep(delay);
        }
        Ok(())
    }

    fn state_hash(&mut self) -> Result<StateId> {
        Ok(self.current.clone())
    }

    fn execute_action(&mut self, action: Action) -> Result<()> {
        self.actions_executed += 1;

        let key = (self.current.clone(), action);
        if let Some(outcomes) = self.table.get(&key) {
            let cursor = self.cursors.entry(key).or_insert(0);
            let next = outcomes[*cursor % outcomes.len()].clone();
            *cursor = (*cursor + 1) % outcomes.len();
            tracing::trace!(from = %self.current, %action, to = %next, "simulated transition");
            self.current = next;
        }
        Ok(())
    }
}
