//! Transport bar widget - shows play state, loop position, the active label and output level

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use facade_mix::tap::Level;

use super::state::Snapshot;

pub fn render_transport(frame: &mut Frame, area: Rect, snapshot: &Snapshot, level: Level) {
    let block = Block::default().title(" facade ").borders(Borders::ALL);

    let play_symbol = if snapshot.is_playing { "▶" } else { "⏸" };
    let play_state_str = if snapshot.is_playing { "Playing" } else { "Stopped" };

    let status = Line::from(vec![
        Span::styled(format!(" BPM: {:.0}  ", snapshot.bpm), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(if snapshot.is_playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("Bar {} / {} | Beat {}  ", snapshot.position.bars + 1, snapshot.loop_bars, snapshot.position.beats + 1),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}  ", level.peak, level.rms),
            Style::default().fg(if level.peak > 0.99 { Color::Red } else { Color::DarkGray }),
        ),
        Span::styled(format!("{} nodes", snapshot.live_nodes), Style::default().fg(Color::DarkGray)),
    ]);
    let label = Line::from(Span::styled(format!(" {}", snapshot.label), Style::default().fg(Color::Magenta)));

    frame.render_widget(Paragraph::new(vec![status, label]).block(block), area);
}
