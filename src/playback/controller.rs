//! Playback state machine driving a frame sequence from user input.

use std::io;
use std::time::Duration;
use serde::{Serialize, Deserialize};
use tracing::{debug, info};
use crate::cellular::Automaton;
use super::frames::FrameSequence;

/// How long the run loop waits for input before ticking playback.
pub const POLL_INTERVAL: Duration = Duration::from_millis(300);

/// Current playback mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackState {
    Paused,
    PlayingForward,
    PlayingBackward,
    /// Terminal: the run loop exits.
    Quitting,
}

impl PlaybackState {
    pub const fn label(self) -> &'static str {
        match self {
            PlaybackState::Paused => "Paused",
            PlaybackState::PlayingForward => "Playing ▶",
            PlaybackState::PlayingBackward => "Playing ◀",
            PlaybackState::Quitting => "Quitting",
        }
    }
}

/// Input event, independent of the device that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    Quit,
    Pause,
    StepForward,
    StepBackward,
    GoStart,
    GoEnd,
    PlayForward,
    PlayBackward,
    Unrecognized,
}

impl Event {
    /// Map a key to its event.
    pub fn from_key(key: char) -> Self {
        match key {
            'q' => Event::Quit,
            'p' => Event::Pause,
            'f' => Event::StepForward,
            'b' => Event::StepBackward,
            's' => Event::GoStart,
            'e' => Event::GoEnd,
            'F' => Event::PlayForward,
            'B' => Event::PlayBackward,
            _ => Event::Unrecognized,
        }
    }
}

/// Key legend shown next to the grid, two bindings per line.
pub const KEY_LEGEND: [&str; 4] = [
    "F: Play forward      B: Play backward",
    "s: Go to start       e: Go to end",
    "f: One step forward  b: One step backward",
    "p: Pause             q: Quit",
];

/// What the overlay next to the grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    /// 1-based step number of the displayed frame.
    pub step: usize,
    pub num_frames: usize,
    pub state: PlaybackState,
}

/// A display that can draw frames and report user input.
pub trait Device {
    /// Draw `automaton` together with the step overlay.
    fn render(&mut self, automaton: &Automaton, overlay: &Overlay) -> io::Result<()>;

    /// Wait at most `timeout` for an input event.
    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

/// Interactive player: a frame sequence plus the playback state machine.
#[derive(Debug, Clone)]
pub struct Player {
    frames: FrameSequence,
    state: PlaybackState,
}

impl Player {
    pub fn new(frames: FrameSequence) -> Self {
        Self {
            frames,
            state: PlaybackState::Paused,
        }
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn frames(&self) -> &FrameSequence {
        &self.frames
    }

    #[inline]
    pub fn frames_mut(&mut self) -> &mut FrameSequence {
        &mut self.frames
    }

    /// Apply one poll result: an event, or `None` when the poll timed out.
    ///
    /// Quit and pause win in every state. While playing, every poll ticks
    /// playback one frame and other keys are ignored; playback pauses
    /// instead of moving past either end. Navigation keys only act while
    /// paused.
    pub fn handle(&mut self, event: Option<Event>) -> PlaybackState {
        if self.state == PlaybackState::Quitting {
            return self.state;
        }

        match event {
            Some(Event::Quit) => self.state = PlaybackState::Quitting,
            Some(Event::Pause) => self.state = PlaybackState::Paused,
            _ => match self.state {
                PlaybackState::PlayingForward => {
                    if self.frames.at_end() {
                        self.state = PlaybackState::Paused;
                    } else {
                        self.frames.advance();
                    }
                }
                PlaybackState::PlayingBackward => {
                    if self.frames.at_start() {
                        self.state = PlaybackState::Paused;
                    } else {
                        self.frames.retreat();
                    }
                }
                PlaybackState::Paused => match event {
                    Some(Event::StepForward) => self.frames.advance(),
                    Some(Event::StepBackward) => self.frames.retreat(),
                    Some(Event::GoStart) => self.frames.seek(0),
                    Some(Event::GoEnd) => {
                        let last = self.frames.last_index();
                        self.frames.seek(last);
                    }
                    Some(Event::PlayForward) => self.state = PlaybackState::PlayingForward,
                    Some(Event::PlayBackward) => self.state = PlaybackState::PlayingBackward,
                    _ => {}
                },
                PlaybackState::Quitting => {}
            },
        }

        debug!(?event, state = ?self.state, cursor = self.frames.cursor(), "handled input");
        self.state
    }

    /// Ask the device to draw the frame under the cursor.
    pub fn redraw<D: Device + ?Sized>(&mut self, device: &mut D) -> io::Result<()> {
        let overlay = Overlay {
            step: self.frames.cursor() + 1,
            num_frames: self.frames.num_frames(),
            state: self.state,
        };
        device.render(self.frames.current(), &overlay)
    }

    /// Poll, react and redraw until the user quits.
    pub fn run<D: Device + ?Sized>(&mut self, device: &mut D) -> io::Result<()> {
        info!(frames = self.frames.num_frames(), "starting interactive playback");
        self.redraw(device)?;
        while self.state != PlaybackState::Quitting {
            let event = device.poll_event(POLL_INTERVAL)?;
            self.handle(event);
            self.redraw(device)?;
        }
        info!(computed = self.frames.computed_len(), "playback finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use crate::cellular::{AutomatonKind, Boundary, Grid};

    /// Headless device replaying a fixed script of poll results.
    struct ScriptedDevice {
        script: VecDeque<Option<Event>>,
        rendered: Vec<Overlay>,
    }

    impl ScriptedDevice {
        fn new(script: Vec<Option<Event>>) -> Self {
            Self {
                script: script.into(),
                rendered: Vec::new(),
            }
        }

        fn steps(&self) -> Vec<usize> {
            self.rendered.iter().map(|o| o.step).collect()
        }
    }

    impl Device for ScriptedDevice {
        fn render(&mut self, _automaton: &Automaton, overlay: &Overlay) -> io::Result<()> {
            self.rendered.push(*overlay);
            Ok(())
        }

        fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
            assert_eq!(timeout, POLL_INTERVAL);
            Ok(self.script.pop_front().unwrap_or(Some(Event::Quit)))
        }
    }

    fn player(num_frames: usize) -> Player {
        let grid = Grid::parse("....\n.XX.\n.XX.\n....\n").unwrap();
        let seed = Automaton::new(AutomatonKind::Life, Boundary::Truncate, ".X", grid).unwrap();
        Player::new(FrameSequence::new(seed, num_frames))
    }

    #[test]
    fn test_starts_paused() {
        assert_eq!(player(3).state(), PlaybackState::Paused);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Event::from_key('q'), Event::Quit);
        assert_eq!(Event::from_key('F'), Event::PlayForward);
        assert_eq!(Event::from_key('f'), Event::StepForward);
        assert_eq!(Event::from_key('B'), Event::PlayBackward);
        assert_eq!(Event::from_key('x'), Event::Unrecognized);
    }

    #[test]
    fn test_paused_navigation() {
        let mut p = player(5);
        p.handle(Some(Event::StepForward));
        p.handle(Some(Event::StepForward));
        assert_eq!(p.frames().cursor(), 2);
        p.handle(Some(Event::StepBackward));
        assert_eq!(p.frames().cursor(), 1);
        p.handle(Some(Event::GoEnd));
        assert_eq!(p.frames().cursor(), 4);
        p.handle(Some(Event::GoStart));
        assert_eq!(p.frames().cursor(), 0);
        assert_eq!(p.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_paused_ignores_timeouts_and_unknown_keys() {
        let mut p = player(5);
        p.handle(None);
        p.handle(Some(Event::Unrecognized));
        assert_eq!(p.frames().cursor(), 0);
        assert_eq!(p.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_play_forward_stops_at_last_frame() {
        let mut p = player(3);
        p.handle(Some(Event::PlayForward));
        assert_eq!(p.state(), PlaybackState::PlayingForward);
        assert_eq!(p.frames().cursor(), 0);

        p.handle(None);
        p.handle(None);
        assert_eq!(p.frames().cursor(), 2);
        assert_eq!(p.state(), PlaybackState::PlayingForward);

        // At the last frame the next tick pauses without moving.
        p.handle(None);
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.frames().cursor(), 2);
    }

    #[test]
    fn test_play_backward_stops_at_first_frame() {
        let mut p = player(3);
        p.handle(Some(Event::GoEnd));
        p.handle(Some(Event::PlayBackward));
        p.handle(None);
        p.handle(None);
        assert_eq!(p.frames().cursor(), 0);
        p.handle(None);
        assert_eq!(p.state(), PlaybackState::Paused);
        assert_eq!(p.frames().cursor(), 0);
    }

    #[test]
    fn test_keys_while_playing_tick_instead() {
        let mut p = player(10);
        p.handle(Some(Event::PlayForward));
        p.handle(Some(Event::GoStart));
        p.handle(Some(Event::StepBackward));
        assert_eq!(p.frames().cursor(), 2);
        assert_eq!(p.state(), PlaybackState::PlayingForward);
    }

    #[test]
    fn test_pause_and_quit_win_everywhere() {
        let mut p = player(10);
        p.handle(Some(Event::PlayForward));
        p.handle(Some(Event::Pause));
        assert_eq!(p.state(), PlaybackState::Paused);

        p.handle(Some(Event::PlayBackward));
        p.handle(Some(Event::Quit));
        assert_eq!(p.state(), PlaybackState::Quitting);
    }

    #[test]
    fn test_quitting_is_terminal() {
        let mut p = player(10);
        p.handle(Some(Event::Quit));
        for event in [Some(Event::Pause), Some(Event::PlayForward), Some(Event::StepForward), None] {
            assert_eq!(p.handle(event), PlaybackState::Quitting);
        }
        assert_eq!(p.frames().cursor(), 0);
    }

    #[test]
    fn test_run_redraws_after_every_poll() {
        let mut p = player(4);
        let mut device = ScriptedDevice::new(vec![
            Some(Event::StepForward),
            None,
            Some(Event::PlayForward),
            None,
            None,
            None,
            Some(Event::Quit),
        ]);
        p.run(&mut device).unwrap();

        assert_eq!(p.state(), PlaybackState::Quitting);
        // Initial draw, then one draw per poll.
        assert_eq!(device.steps(), vec![1, 2, 2, 2, 3, 4, 4, 4]);
        assert_eq!(device.rendered[1].num_frames, 4);
        assert_eq!(device.rendered[3].state, PlaybackState::PlayingForward);
        assert_eq!(device.rendered[6].state, PlaybackState::Paused);
    }

    #[test]
    fn test_run_computes_only_visited_frames() {
        let mut p = player(50);
        let mut device = ScriptedDevice::new(vec![Some(Event::StepForward), Some(Event::StepForward)]);
        p.run(&mut device).unwrap();
        assert_eq!(p.frames().steps_computed(), 2);
    }
}
