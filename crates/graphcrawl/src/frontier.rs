//! In-memory work ordering for a crawl session.
//!
//! Two LIFO lists:
//!
//! - the **stack** holds local depth-first work: the state just reached, and
//!   its parent while the parent still has untried gestures;
//! - the **pending** list holds fallback targets: frontier states recovered
//!   from the graph at boot, and targets navigation could not reach.
//!
//! Pending targets are only consulted when the stack runs dry, one at a time.
//! Nothing here is persisted; after a crash the pending list is rebuilt from
//! the graph's frontier.

use graphcrawl_core::StateId;

/// Stack plus pending targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkQueue {
    stack: Vec<StateId>,
    pending: Vec<StateId>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push onto the stack.
    pub fn push(&mut self, state: StateId) {
        self.stack.push(state);
    }

    /// Put a target aside until the stack runs dry.
    pub fn defer(&mut self, state: StateId) {
        self.pending.push(state);
    }

    /// Append recovered frontier states to the pending list.
    ///
    /// No deduplication: a state already pending may be listed twice, and
    /// the second visit finds it explored.
    pub fn recover<I: IntoIterator<Item = StateId>>(&mut self, states: I) -> usize {
        let before = self.pending.len();
        self.pending.extend(states);
        self.pending.len() - before
    }

    /// Take the next target.
    ///
    /// Pops the stack; if the stack is empty, moves the most recently
    /// pending target onto it first. `None` once both are empty.
    pub fn next(&mut self) -> Option<StateId> {
        if self.stack.is_empty() {
            if let Some(target) = self.pending.pop() {
                self.stack.push(target);
            }
        }
        self.stack.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty() && self.pending.is_empty()
    }

    /// Stack contents, bottom first.
    pub fn stack(&self) -> &[StateId] {
        &self.stack
    }

    /// Pending targets, oldest first.
    pub fn pending(&self) -> &[StateId] {
        &self.pending
    }
}
