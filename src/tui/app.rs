//! Terminal device: crossterm input plus ratatui drawing.

use std::io::{self, stdout, Stdout};
use std::time::Duration;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::warn;
use crate::cellular::Automaton;
use crate::playback::{Device, Event, FrameSequence, Overlay, Player};

/// The real terminal, in raw mode on the alternate screen.
///
/// The terminal is restored when the device is dropped.
pub struct TerminalDevice {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalDevice {
    /// Switch the terminal to raw mode and the alternate screen.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalDevice {
    fn drop(&mut self) {
        let restored = disable_raw_mode()
            .and_then(|_| stdout().execute(LeaveAlternateScreen).map(|_| ()))
            .and_then(|_| self.terminal.show_cursor());
        if let Err(e) = restored {
            warn!("failed to restore terminal: {}", e);
        }
    }
}

impl Device for TerminalDevice {
    fn render(&mut self, automaton: &Automaton, overlay: &Overlay) -> io::Result<()> {
        self.terminal.draw(|frame| {
            super::ui::draw(frame, automaton, overlay);
        })?;
        Ok(())
    }

    fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let event = match event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                // Raw mode swallows SIGINT, so treat Ctrl+C as quit.
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Event::Quit,
                KeyCode::Char(c) => Event::from_key(c),
                KeyCode::Esc => Event::Quit,
                KeyCode::Right => Event::StepForward,
                KeyCode::Left => Event::StepBackward,
                KeyCode::Home => Event::GoStart,
                KeyCode::End => Event::GoEnd,
                _ => Event::Unrecognized,
            },
            _ => Event::Unrecognized,
        };
        Ok(Some(event))
    }
}

/// Run the interactive viewer over a frame sequence until the user quits.
pub fn run_viewer(frames: FrameSequence) -> io::Result<()> {
    let mut device = TerminalDevice::new()?;
    let mut player = Player::new(frames);
    player.run(&mut device)
}
