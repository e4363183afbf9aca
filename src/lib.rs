//! Click-to-start bootstrap core.
//!
//! The target-independent half of a browser bootstrap: a page sits idle
//! behind a start button, and one click tears down the placeholder UI,
//! brings up audio, loads the application module, and calls its entry
//! function. This crate holds the activation sequence, its configuration,
//! and the error taxonomy; the wasm32 glue lives in `ignition_web`.

pub mod config;
pub mod error;
pub mod launch;

pub use config::LaunchConfig;
pub use error::LaunchError;
pub use launch::{AppModule, AudioState, LaunchHost, Launcher, Phase};
