//! src/panels/info.rs
//!
//! Info panel: subscription, counters, window fill state, and view settings.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::graph::{Snapshot, WindowState};
use crate::render::ViewSettings;
use crate::session::SessionStatus;

/// Read-only info panel; the border turns yellow while unsubscribed.
pub struct InfoPanel<'a, const K: usize> {
    pub snapshot: &'a Snapshot<'a, K>,
    pub status: &'a SessionStatus<'a>,
    pub view: &'a ViewSettings,
    pub y_bounds: (f64, f64),
}

impl<'a, const K: usize> InfoPanel<'a, K> {
    fn lines(&self) -> Vec<Line<'a>> {
        let (sub_text, sub_style) = if self.status.subscribed {
            ("live", Style::default().fg(Color::Green))
        } else {
            ("stopped", Style::default().fg(Color::Yellow))
        };
        let state = match self.snapshot.state() {
            WindowState::Filling => "filling",
            WindowState::AtCapacity => "at capacity",
            WindowState::OverCapacity => "over capacity",
        };
        let lock_text = if self.view.locked_bounds.is_some() {
            "  (locked)"
        } else {
            ""
        };

        vec![
            Line::from(vec![
                Span::styled(self.status.source, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(sub_text, sub_style),
            ]),
            Line::from(format!(
                "ticks={}  dropped={}",
                self.status.ticks, self.status.dropped
            )),
            Line::from(format!(
                "window={}/{}  state={}",
                self.snapshot.count(),
                self.snapshot.capacity,
                state
            )),
            Line::from(format!(
                "autoscale={}  y=[{:.3},{:.3}]{}",
                self.view.autoscale, self.y_bounds.0, self.y_bounds.1, lock_text
            )),
        ]
    }
}

impl<const K: usize> crate::ui::Panel for InfoPanel<'_, K> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let mut block = Block::default().title("Info").borders(Borders::ALL);
        if !self.status.subscribed {
            block = block.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
        f.render_widget(Paragraph::new(self.lines()).block(block), area);
    }
}
