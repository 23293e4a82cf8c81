//! src/panels/paragraph.rs
//!
//! Key-binding help line used as the footer.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// `(key, action)` pairs rendered as a single wrapped line.
pub struct ControlsPanel<'a> {
    pub bindings: &'a [(&'a str, &'a str)],
}

impl crate::ui::Panel for ControlsPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let spans: Vec<Span> = self
            .bindings
            .iter()
            .flat_map(|(key, action)| {
                [
                    Span::styled(*key, key_style),
                    Span::raw(format!("={action}  ")),
                ]
            })
            .collect();
        let p = Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Controls").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
