//! TUI module for facade
//!
//! Draws the panel grid and routes keys to the shared session.

mod grid;
mod state;
mod transport;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;

use facade_mix::tap::{Level, LevelReader};

use super::app::{lock, SharedSession};
use grid::render_grid;
use state::Snapshot;
use transport::render_transport;

/// One slider step per `+`/`-` press.
const VOLUME_STEP: f32 = 5.0;

pub struct UiApp {
    session: SharedSession,
    levels: LevelReader,
    level: Level,
    /// (row, column) of the focused panel
    cursor: (usize, usize),
    should_quit: bool,
}

impl UiApp {
    pub fn new(session: SharedSession, levels: LevelReader) -> Self {
        Self {
            session,
            levels,
            level: Level::default(),
            cursor: (0, 0),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.level = self.levels.poll();
            let snapshot = Snapshot::capture(&*lock(&self.session)?);

            terminal.draw(|frame| self.render(frame, &snapshot))?;

            // ~60fps
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, &snapshot)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, snapshot: &Snapshot) -> EyreResult<()> {
        let (row, col) = self.cursor;
        let rows = snapshot.rows.len();
        let columns = snapshot.columns();

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => self.cursor.0 = row.saturating_sub(1),
            KeyCode::Down => self.cursor.0 = (row + 1).min(rows.saturating_sub(1)),
            KeyCode::Left => self.cursor.1 = col.saturating_sub(1),
            KeyCode::Right => self.cursor.1 = (col + 1).min(columns.saturating_sub(1)),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(info) = snapshot.rows.get(row) {
                    lock(&self.session)?.click(info.key, col);
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => lock(&self.session)?.toggle_transport(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.nudge_volume(snapshot, VOLUME_STEP)?,
            KeyCode::Char('-') => self.nudge_volume(snapshot, -VOLUME_STEP)?,
            _ => {}
        }
        Ok(())
    }

    fn nudge_volume(&self, snapshot: &Snapshot, delta: f32) -> EyreResult<()> {
        if let Some(info) = snapshot.rows.get(self.cursor.0) {
            let slider = (info.volume as f32 + delta).clamp(0.0, 100.0);
            lock(&self.session)?.set_volume(info.key, slider);
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Transport bar
                Constraint::Min(8),    // Panel grid
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_transport(frame, chunks[0], snapshot, self.level);
        render_grid(frame, chunks[1], snapshot, self.cursor);

        let help = Paragraph::new(" [←↑↓→] Move  [Enter] Toggle panel  [P] Play/Stop  [+/-] Volume  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
