//! Terminal viewer for a simulation.
//!
//! Provides an interactive terminal-based player with:
//! - Colored cell grid of the current frame
//! - Step counter and playback state
//! - Play/pause/step/seek key controls

mod app;
mod ui;

pub use app::{TerminalDevice, run_viewer};
