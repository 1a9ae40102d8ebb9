//! # graphcrawl device
//!
//! The boundary between the crawler and a running application.
//!
//! ## Overview
//!
//! A [`Device`] restarts the app, waits for the UI to become stable,
//! fingerprints the screen and delivers gestures. The crawler only ever
//! sees fingerprints; what produced them is up to the driver.
//!
//! [`SimulatedApp`] is a driver over a declarative [`AppModel`]. It backs
//! the test suite and the `graphcrawl` CLI.
//!
//! ## Usage
//!
//! ```rust
//! use graphcrawl_core::{Action, StateId};
//! use graphcrawl_device::{AppModel, Device, SimulatedApp};
//!
//! let model = AppModel::new("home").with_transition("home", Action::ClickCenter, "menu");
//! let mut app = SimulatedApp::new(model).unwrap();
//!
//! assert_eq!(app.restart_and_observe().unwrap(), StateId::from("home"));
//! assert_eq!(app.perform(Action::ClickCenter).unwrap(), StateId::from("menu"));
//! ```
//!
//! ## Error Model
//!
//! Every [`DeviceError`] is an infrastructure failure. Landing on an
//! unexpected screen is normal app behavior and is reported through the
//! fingerprint, never as an error.

pub mod error;
pub mod simulated;
pub mod traits;

pub use error::{DeviceError, Result};
pub use simulated::{AppModel, SimulatedApp, Transition};
pub use traits::Device;
