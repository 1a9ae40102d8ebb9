//! Explorer configuration.

use graphcrawl_core::Action;

use crate::error::{ExploreError, Result};

/// Default loop budget for [`Explorer::resume_default`](crate::Explorer::resume_default).
pub const DEFAULT_MAX_STEPS: usize = 1000;

/// Configuration for an [`Explorer`](crate::Explorer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Gestures the crawler may try, in the order queries report them.
    pub vocabulary: Vec<Action>,
    /// Seed for the random action selector. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Loop iterations per `resume_default` call.
    pub max_steps: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            vocabulary: Action::ALL.to_vec(),
            seed: None,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl ExplorerConfig {
    /// Use a fixed selector seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Restrict the crawl to a subset of gestures.
    pub fn with_vocabulary(mut self, vocabulary: impl Into<Vec<Action>>) -> Self {
        self.vocabulary = vocabulary.into();
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Reject an empty or repetitive vocabulary.
    pub fn validate(&self) -> Result<()> {
        if self.vocabulary.is_empty() {
            return Err(ExploreError::InvalidConfig("vocabulary is empty".into()));
        }
        for (i, action) in self.vocabulary.iter().enumerate() {
            if self.vocabulary[..i].contains(action) {
                return Err(ExploreError::InvalidConfig(format!(
                    "action {action} listed twice in vocabulary"
                )));
            }
        }
        Ok(())
    }
}
