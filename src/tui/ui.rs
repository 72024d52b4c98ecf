//! UI rendering for the viewer.

use ratatui::{
    prelude::*,
    widgets::{block::Title, Block, Borders, Paragraph},
    style::{Color, Style, Modifier},
};
use crate::cellular::{Automaton, AutomatonKind};
use crate::playback::{Overlay, PlaybackState, KEY_LEGEND};

/// Height of the keys panel: legend, status line and borders.
const KEYS_HEIGHT: u16 = KEY_LEGEND.len() as u16 + 3;

/// Main draw function.
pub fn draw(frame: &mut Frame, automaton: &Automaton, overlay: &Overlay) {
    let grid_height = clamp_u16(automaton.rows()).saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(grid_height),
            Constraint::Length(KEYS_HEIGHT),
            Constraint::Min(0),
        ])
        .split(frame.area());

    let grid_width = clamp_u16(automaton.cols()).saturating_add(2);
    let keys_width = KEY_LEGEND.iter().map(|l| l.len() as u16).max().unwrap_or(0) + 4;

    draw_cells(frame, fit_width(chunks[0], grid_width), automaton);
    draw_keys(frame, fit_width(chunks[1], keys_width.max(24)), automaton, overlay);
}

/// Terminal extent of `n` cells; saturates instead of wrapping.
fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Shrink `area` to `width` columns, left aligned.
fn fit_width(area: Rect, width: u16) -> Rect {
    Rect { width: area.width.min(width), ..area }
}

/// Draw the grid with one colored character per cell.
fn draw_cells(frame: &mut Frame, area: Rect, automaton: &Automaton) {
    let lines: Vec<Line> = automaton
        .grid()
        .iter_rows()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|&symbol| Span::styled(symbol.to_string(), cell_style(automaton, symbol)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let cells = Paragraph::new(lines)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(cells, area);
}

/// Draw the key legend, step counter and population status.
fn draw_keys(frame: &mut Frame, area: Rect, automaton: &Automaton, overlay: &Overlay) {
    let mut content: Vec<Line> = KEY_LEGEND
        .iter()
        .map(|line| Line::from(*line))
        .collect();

    let mut status = vec![Span::styled(
        format!("{:<10}", overlay.state.label()),
        state_style(overlay.state),
    )];
    for &symbol in automaton.alphabet().iter().skip(1) {
        status.push(Span::styled(
            format!(" {}:{}", symbol, automaton.population(symbol)),
            cell_style(automaton, symbol),
        ));
    }
    content.push(Line::from(status));

    let step = Title::from(format!(" Step: {}/{} ", overlay.step, overlay.num_frames))
        .alignment(Alignment::Right);
    let keys = Paragraph::new(content)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default()
            .title(" Keys ")
            .title(step)
            .borders(Borders::ALL));

    frame.render_widget(keys, area);
}

/// Get color style for a cell from its position in the alphabet.
fn cell_style(automaton: &Automaton, symbol: char) -> Style {
    let index = automaton.alphabet().iter().position(|&s| s == symbol);
    let color = match (automaton.kind(), index) {
        (AutomatonKind::Life, Some(1)) => Color::Green,
        (AutomatonKind::Epidemic, Some(1)) => Color::Red,
        (AutomatonKind::Epidemic, Some(2)) => Color::Green,
        (AutomatonKind::Fire, Some(0)) => Color::LightGreen,
        (AutomatonKind::Fire, Some(1)) => Color::Green,
        (AutomatonKind::Fire, Some(2)) => Color::Red,
        (AutomatonKind::Fire, Some(3)) => Color::DarkGray,
        _ => Color::DarkGray,
    };
    Style::default().fg(color)
}

fn state_style(state: PlaybackState) -> Style {
    match state {
        PlaybackState::Paused => Style::default().fg(Color::Yellow),
        PlaybackState::PlayingForward | PlaybackState::PlayingBackward => {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        }
        PlaybackState::Quitting => Style::default().fg(Color::Red),
    }
}
