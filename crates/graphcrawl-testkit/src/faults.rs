//! Fault injection for device drivers.
//!
//! [`FlakyDevice`] wraps any [`Device`] and makes chosen calls fail, the way
//! a real automation bridge drops out halfway through a crawl.

use graphcrawl_core::{Action, StateId};
use graphcrawl_device::{Device, DeviceError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A device wrapper that injects failures.
///
/// Scheduled faults fire once: the `n`th call (zero-based) of the chosen
/// operation fails, later calls go through.
#[derive(Debug)]
pub struct FlakyDevice<D> {
    inner: D,
    fail_action_at: Option<usize>,
    fail_restart_at: Option<usize>,
    fail_hash_at: Option<usize>,
    random_action_failures: Option<(f64, StdRng)>,
    actions: usize,
    restarts: usize,
    hashes: usize,
    injected: usize,
}

impl<D: Device> FlakyDevice<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            fail_action_at: None,
            fail_restart_at: None,
            fail_hash_at: None,
            random_action_failures: None,
            actions: 0,
            restarts: 0,
            hashes: 0,
            injected: 0,
        }
    }

    /// Fail the `n`th `execute_action` call.
    pub fn fail_action_at(mut self, n: usize) -> Self {
        self.fail_action_at = Some(n);
        self
    }

    /// Fail the `n`th `restart_app` call.
    pub fn fail_restart_at(mut self, n: usize) -> Self {
        self.fail_restart_at = Some(n);
        self
    }

    /// Fail the `n`th `state_hash` call.
    pub fn fail_hash_at(mut self, n: usize) -> Self {
        self.fail_hash_at = Some(n);
        self
    }

    /// Fail each `execute_action` with the given probability.
    pub fn random_action_failures(mut self, probability: f64, seed: u64) -> Self {
        self.random_action_failures = Some((probability, StdRng::seed_from_u64(seed)));
        self
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }

    /// Number of failures injected so far.
    pub fn injected(&self) -> usize {
        self.injected
    }

    fn inject(&mut self, error: DeviceError) -> Result<()> {
        self.injected += 1;
        Err(error)
    }
}

impl<D: Device> Device for FlakyDevice<D> {
    fn restart_app(&mut self) -> Result<()> {
        let call = self.restarts;
        self.restarts += 1;
        if self.fail_restart_at == Some(call) {
            return self.inject(DeviceError::RestartFailed("injected".into()));
        }
        self.inner.restart_app()
    }

    fn wait_for_settle(&mut self) -> Result<()> {
        self.inner.wait_for_settle()
    }

    fn state_hash(&mut self) -> Result<StateId> {
        let call = self.hashes;
        self.hashes += 1;
        if self.fail_hash_at == Some(call) {
            self.inject(DeviceError::Disconnected("injected".into()))?;
        }
        self.inner.state_hash()
    }

    fn execute_action(&mut self, action: Action) -> Result<()> {
        let call = self.actions;
        self.actions += 1;

        let random_hit = match &mut self.random_action_failures {
            Some((probability, rng)) => rng.gen_bool(*probability),
            None => false,
        };
        if random_hit || self.fail_action_at == Some(call) {
            return self.inject(DeviceError::ActionFailed {
                action,
                reason: "injected".into(),
            });
        }
        self.inner.execute_action(action)
    }
}
