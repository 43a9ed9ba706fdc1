//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, on-screen buttons) turned into a polled snapshot
//! - Storage (LocalStorage on web, see `persistence`)

pub mod input;

pub use input::{Action, Control, InputTracker};
