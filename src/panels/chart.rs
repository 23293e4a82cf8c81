//! src/panels/chart.rs
//!
//! Chart panel: one line per channel over the visible range, a per-channel
//! stats row, and guide lines when the y-axis bounds are locked.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use crate::graph::{Sample, SampleSeries, Snapshot};

/// Line colors, assigned to channels in order.
pub const CHANNEL_COLORS: [Color; 3] = [Color::LightRed, Color::LightGreen, Color::LightBlue];

pub fn channel_color(channel: usize) -> Color {
    CHANNEL_COLORS[channel % CHANNEL_COLORS.len()]
}

pub struct ChartPanel<'a, const K: usize> {
    pub snapshot: &'a Snapshot<'a, K>,
    pub title: &'a str,
    pub y_bounds: (f64, f64),
    pub locked: bool,
}

/// `(min, max, last)` over a channel's visible samples.
fn stats(samples: &[Sample]) -> Option<(f64, f64, f64)> {
    let last = samples.last()?.value;
    let (mn, mx) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(mn, mx), s| {
            (mn.min(s.value), mx.max(s.value))
        });
    Some((mn, mx, last))
}

impl<const K: usize> ChartPanel<'_, K> {
    fn stats_line(&self) -> Line<'_> {
        let range = self.snapshot.visible_range;
        let mut spans = Vec::new();
        for (i, channel) in self.snapshot.channels.iter().enumerate() {
            let text = match stats(channel.visible(range)) {
                Some((mn, mx, last)) => {
                    format!(" {last:>8.3} [{mn:.2}, {mx:.2}]   ")
                }
                None => " --   ".to_string(),
            };
            spans.push(Span::styled(
                channel.label(),
                Style::default()
                    .fg(channel_color(i))
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(text));
        }
        Line::from(spans)
    }

    fn points(&self, channel: &SampleSeries) -> Vec<(f64, f64)> {
        channel
            .visible(self.snapshot.visible_range)
            .iter()
            .map(Sample::point)
            .collect()
    }
}

impl<const K: usize> crate::ui::Panel for ChartPanel<'_, K> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let stats_par = Paragraph::new(self.stats_line())
            .block(Block::default().title("Last [min, max]").borders(Borders::ALL));
        f.render_widget(stats_par, chunks[0]);

        let [xmin, mut xmax] = self.snapshot.visible_range.bounds();
        if xmax <= xmin {
            xmax = xmin + 1.0;
        }
        let (ymin, ymax) = self.y_bounds;

        // Keep point vectors alive until the chart is rendered
        let series: Vec<Vec<(f64, f64)>> = self
            .snapshot
            .channels
            .iter()
            .map(|c| self.points(c))
            .collect();
        let guides = [vec![(xmin, ymax), (xmax, ymax)], vec![(xmin, ymin), (xmax, ymin)]];

        let mut datasets: Vec<Dataset> = self
            .snapshot
            .channels
            .iter()
            .zip(&series)
            .enumerate()
            .map(|(i, (channel, points))| {
                Dataset::default()
                    .name(channel.label().to_string())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(channel_color(i)))
                    .data(points)
            })
            .collect();

        if self.locked {
            for guide in &guides {
                datasets.push(
                    Dataset::default()
                        .marker(symbols::Marker::Dot)
                        .graph_type(GraphType::Line)
                        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                        .data(guide),
                );
            }
        }

        let y_labels: Vec<String> = (0..5)
            .map(|i| format!("{:.2}", ymin + (ymax - ymin) * (i as f64) / 4.0))
            .collect();
        let x_labels = vec![format!("{xmin:.0}"), format!("{xmax:.0}")];

        let title = if self.locked {
            format!("{} (locked)", self.title)
        } else {
            self.title.to_string()
        };
        let chart = Chart::new(datasets)
            .block(Block::default().title(title).borders(Borders::ALL))
            .x_axis(Axis::default().bounds([xmin, xmax]).labels(x_labels))
            .y_axis(Axis::default().bounds([ymin, ymax]).labels(y_labels));

        f.render_widget(chart, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_cover_the_given_samples() {
        let samples = [
            Sample::new(0, 2.0),
            Sample::new(1, -1.0),
            Sample::new(2, 0.5),
        ];
        assert_eq!(stats(&samples), Some((-1.0, 2.0, 0.5)));
        assert_eq!(stats(&[]), None);
    }

    #[test]
    fn colors_cycle_per_channel() {
        assert_eq!(channel_color(0), Color::LightRed);
        assert_eq!(channel_color(4), Color::LightGreen);
    }
}
