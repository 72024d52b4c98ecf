//! # cellsim
//!
//! Discrete 2D cellular automata: virus propagation ("pandemy"), Conway's
//! game of life and forest fire.
//!
//! A simulation is either printed as a flat trace of grid states or replayed
//! through an interactive viewer that computes frames lazily and lets the
//! user play, pause and seek in both directions.

pub mod cellular;
pub mod playback;
pub mod config;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use cellular::{Automaton, AutomatonKind, Boundary, CellularError, Grid};
pub use playback::{Device, Event, FrameSequence, PlaybackState, Player, write_trace};
pub use config::{ConfigError, SimulationConfig};

#[cfg(feature = "tui")]
pub use tui::run_viewer;
