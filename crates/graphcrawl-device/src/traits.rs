//! Device abstraction for the crawler.
//!
//! The device layer restarts the app, delivers gestures and fingerprints
//! whatever is on screen. Implementations may drive an emulator, a phone
//! over an automation bridge, or a simulated model.

use graphcrawl_core::{Action, StateId};

use crate::error::Result;

/// A driver for one running application instance.
///
/// Every call blocks until the device has done its part. Calls are issued
/// one at a time by a single crawl session.
pub trait Device {
    /// Reset the app to its entry state.
    fn restart_app(&mut self) -> Result<()>;

    /// Block until the UI is stable.
    fn wait_for_settle(&mut self) -> Result<()>;

    /// Fingerprint the current UI.
    ///
    /// Must be stable: two calls with no action in between return the same
    /// fingerprint.
    fn state_hash(&mut self) -> Result<StateId>;

    /// Perform one gesture.
    fn execute_action(&mut self, action: Action) -> Result<()>;

    /// Wait for the UI to settle, then fingerprint it.
    fn observe(&mut self) -> Result<StateId> {
        self.wait_for_settle()?;
        self.state_hash()
    }

    /// Restart the app and fingerprint where it landed.
    fn restart_and_observe(&mut self) -> Result<StateId> {
        self.restart_app()?;
        self.observe()
    }

    /// Perform a gesture and fingerprint where it led.
    fn perform(&mut self, action: Action) -> Result<StateId> {
        self.execute_action(action)?;
        self.observe()
    }
}

impl<D: Device + ?Sized> Device for &mut D {
    fn restart_app(&mut self) -> Result<()> {
        (**self).restart_app()
    }

    fn wait_for_settle(&mut self) -> Result<()> {
        (**self).wait_for_settle()
    }

    fn state_hash(&mut self) -> Result<StateId> {
        (**self).state_hash()
    }

    fn execute_action(&mut self, action: Action) -> Result<()> {
        (**self).execute_action(action)
    }
}

impl<D: Device + ?Sized> Device for Box<D> {
    fn restart_app(&mut self) -> Result<()> {
        (**self).restart_app()
    }

    fn wait_for_settle(&mut self) -> Result<()> {
        (**self).wait_for_settle()
    }

    fn state_hash(&mut self) -> Result<StateId> {
        (**self).state_hash()
    }

    fn execute_action(&mut self, action: Action) -> Result<()> {
        (**self).execute_action(action)
    }
}
