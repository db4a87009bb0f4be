//! hexnav application layer: state machine shared by the binary and its tests.

pub mod app;

pub use app::{App, AppOutcome};
