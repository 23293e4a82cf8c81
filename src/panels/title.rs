//! src/panels/title.rs
//!
//! Header panel naming the tracked sensor.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

pub struct TitlePanel<'a> {
    pub title: &'a str,
}

impl crate::ui::Panel for TitlePanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.title)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
