//! Panel grid widget - one row per instrument, one panel per sequence

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::Snapshot;

const LABEL_WIDTH: u16 = 10;

/// Render the grid; `cursor` is (row, column).
pub fn render_grid(frame: &mut Frame, area: Rect, snapshot: &Snapshot, cursor: (usize, usize)) {
    let columns = snapshot.columns();
    if snapshot.rows.is_empty() || columns == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, snapshot.rows.len() as u32); snapshot.rows.len()])
        .split(area);

    for (row_idx, (row, row_area)) in snapshot.rows.iter().zip(rows.iter()).enumerate() {
        let mut constraints = vec![Constraint::Length(LABEL_WIDTH)];
        constraints.extend(std::iter::repeat(Constraint::Ratio(1, columns as u32)).take(columns));
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(*row_area);

        let label = Paragraph::new(vec![
            Line::from(Span::styled(row.name.clone(), Style::default().fg(Color::White))),
            Line::from(Span::styled(format!("vol {:>3}", row.volume), Style::default().fg(Color::DarkGray))),
        ]);
        frame.render_widget(label, cells[0]);

        for (col_idx, cell) in cells.iter().skip(1).enumerate() {
            let Some(name) = row.sequences.get(col_idx) else {
                continue;
            };

            let playing = row.enabled && row.selected == col_idx;
            let focused = cursor == (row_idx, col_idx);

            let border = match (focused, playing) {
                (true, _) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                (false, true) => Style::default().fg(Color::Green),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            let text = if playing {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let panel = Paragraph::new(Span::styled(name.clone(), text))
                .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(panel, *cell);
        }
    }
}
