//! Frame sequence management and playback.
//!
//! This module provides:
//! - [`FrameSequence`] - lazily computed, memoized snapshots with a cursor
//! - [`Player`] - the pause/play/seek state machine driven by a [`Device`]
//! - [`write_trace`] - the non-interactive printed trace

mod frames;
mod controller;
mod trace;

pub use frames::FrameSequence;
pub use controller::{Device, Event, Overlay, PlaybackState, Player, KEY_LEGEND, POLL_INTERVAL};
pub use trace::write_trace;
