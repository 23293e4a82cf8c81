//! src/panels/history.rs
//!
//! History panel: the newest live rows of the window, one column per channel.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::chart::channel_color;
use crate::graph::Snapshot;

/// Shows as many of the newest rows as fit; a row past the visible range is
/// the sample buffered for the next eviction and is dimmed.
pub struct HistoryPanel<'a, const K: usize> {
    pub snapshot: &'a Snapshot<'a, K>,
}

impl<'a, const K: usize> HistoryPanel<'a, K> {
    fn lines(&self, height: usize) -> Vec<Line<'a>> {
        let count = self.snapshot.count();
        let start = count.saturating_sub(height);
        let last_index = count.saturating_sub(1);

        (start..count)
            .map(|row| {
                let visible = self.snapshot.visible_range.contains(row);
                let latest = row == last_index;
                let value_style = |channel: usize| {
                    if !visible {
                        Style::default().fg(Color::DarkGray)
                    } else if latest {
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(channel_color(channel))
                    }
                };

                let mut spans = vec![Span::styled(
                    format!("{row:>4} "),
                    Style::default().fg(Color::Yellow),
                )];
                for (i, channel) in self.snapshot.channels.iter().enumerate() {
                    let value = channel.entries()[row].value;
                    spans.push(Span::styled(format!("{value:>9.3}"), value_style(i)));
                }
                if !visible {
                    spans.push(Span::styled(
                        "  (buffered)",
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                Line::from(spans)
            })
            .collect()
    }
}

impl<const K: usize> crate::ui::Panel for HistoryPanel<'_, K> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        // two rows of border
        let height = area.height.saturating_sub(2) as usize;
        let block = Block::default().title("History").borders(Borders::ALL);
        f.render_widget(Paragraph::new(self.lines(height)).block(block), area);
    }
}
