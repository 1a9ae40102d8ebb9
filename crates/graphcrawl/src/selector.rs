//! Strategies for picking the next gesture.

use graphcrawl_core::Action;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Picks one gesture out of the untried ones for a state.
///
/// `candidates` is never empty when the explorer calls this. Returning
/// `None` anyway makes the explorer treat the state as done for this visit.
pub trait ActionSelector {
    fn choose(&mut self, candidates: &[Action]) -> Option<Action>;
}

impl<A: ActionSelector + ?Sized> ActionSelector for Box<A> {
    fn choose(&mut self, candidates: &[Action]) -> Option<Action> {
        (**self).choose(candidates)
    }
}

/// Uniformly random choice.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Reproducible choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded if `seed` is set, otherwise from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl ActionSelector for RandomSelector {
    fn choose(&mut self, candidates: &[Action]) -> Option<Action> {
        candidates.choose(&mut self.rng).copied()
    }
}

/// Always the first candidate, i.e. vocabulary order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSelector;

impl ActionSelector for FirstSelector {
    fn choose(&mut self, candidates: &[Action]) -> Option<Action> {
        candidates.first().copied()
    }
}
