//! src/ui/dashboard.rs
//!
//! Terminal render sink: composes the panel tree from a snapshot and draws it.
//!
//! ```text
//! +-------------------------- title --------------------------+
//! | chart (all channels)              | info                  |
//! |                                   | history               |
//! +------------------------- controls ------------------------+
//! ```

use color_eyre::eyre::{Result, WrapErr};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Constraint;

use super::{Node, column, leaf, row};
use crate::graph::Snapshot;
use crate::panels::{ChartPanel, ControlsPanel, HistoryPanel, InfoPanel, TitlePanel};
use crate::render::{RenderSink, ViewSettings};
use crate::session::SessionStatus;

const BINDINGS: [(&str, &str); 4] = [
    ("P", "Start/stop sensor"),
    ("A", "Autoscale"),
    ("L", "Lock bounds"),
    ("Q", "Quit"),
];

pub struct Dashboard<B: Backend> {
    terminal: Terminal<B>,
    title: String,
    pub view: ViewSettings,
}

impl<B: Backend> Dashboard<B> {
    pub fn new(terminal: Terminal<B>, title: impl Into<String>, view: ViewSettings) -> Self {
        Self {
            terminal,
            title: title.into(),
            view,
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

/// Panel tree for one frame.
fn layout<'a, const K: usize>(
    title: &'a str,
    snapshot: &'a Snapshot<'a, K>,
    status: &'a SessionStatus<'a>,
    view: &'a ViewSettings,
) -> Node<'a> {
    let y_bounds = view.y_bounds(snapshot);

    column(
        vec![
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ],
        vec![
            leaf(TitlePanel { title }),
            row(
                vec![Constraint::Percentage(65), Constraint::Percentage(35)],
                vec![
                    leaf(ChartPanel {
                        snapshot,
                        title: "Samples",
                        y_bounds,
                        locked: view.locked_bounds.is_some(),
                    }),
                    column(
                        vec![Constraint::Length(6), Constraint::Min(3)],
                        vec![
                            leaf(InfoPanel {
                                snapshot,
                                status,
                                view,
                                y_bounds,
                            }),
                            leaf(HistoryPanel { snapshot }),
                        ],
                    ),
                ],
            ),
            leaf(ControlsPanel {
                bindings: &BINDINGS,
            }),
        ],
    )
}

impl<B: Backend, const K: usize> RenderSink<K> for Dashboard<B> {
    fn draw(&mut self, snapshot: &Snapshot<'_, K>, status: &SessionStatus<'_>) -> Result<()> {
        let root = layout(&self.title, snapshot, status, &self.view);
        self.terminal
            .draw(|f| {
                let area = f.area();
                root.draw(f, area);
            })
            .wrap_err("failed to draw frame")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MultiChannelWindow;
    use crate::sensor::SensorKind;
    use ratatui::backend::TestBackend;

    fn screen(dashboard: &Dashboard<TestBackend>) -> String {
        let buffer = dashboard.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn dashboard() -> Dashboard<TestBackend> {
        let terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
        Dashboard::new(
            terminal,
            "Live accelerometer",
            ViewSettings::new(true, (-20.0, 20.0)),
        )
    }

    fn status(subscribed: bool) -> SessionStatus<'static> {
        SessionStatus {
            source: "simulated @ 20 Hz",
            subscribed,
            ticks: 4,
            dropped: 1,
        }
    }

    #[test]
    fn renders_every_panel() {
        let mut w =
            MultiChannelWindow::new(SensorKind::Accelerometer.channel_labels(), 3).unwrap();
        for v in 1..=4 {
            w.ingest([v as f64, 0.5, 9.8]);
        }
        let mut d = dashboard();
        d.draw(&w.snapshot(), &status(true)).unwrap();

        let text = screen(&d);
        for needle in [
            "Live accelerometer",
            "AccelX",
            "AccelZ",
            "Info",
            "History",
            "ticks=4  dropped=1",
            "window=4/3",
            "(buffered)",
            "Controls",
            "live",
        ] {
            assert!(text.contains(needle), "missing {needle:?} in\n{text}");
        }
    }

    #[test]
    fn same_snapshot_draws_the_same_frame() {
        let mut w = MultiChannelWindow::new(["a", "b", "c"], 5).unwrap();
        for v in 0..7 {
            w.ingest([v as f64, (v * 2) as f64, -(v as f64)]);
        }
        let mut d = dashboard();
        d.draw(&w.snapshot(), &status(false)).unwrap();
        let first = screen(&d);
        d.draw(&w.snapshot(), &status(false)).unwrap();
        assert_eq!(screen(&d), first);
        assert!(first.contains("stopped"));
    }

    #[test]
    fn empty_window_still_renders() {
        let w = MultiChannelWindow::new(["a", "b", "c"], 1).unwrap();
        let mut d = dashboard();
        d.draw(&w.snapshot(), &status(true)).unwrap();
        assert!(screen(&d).contains("window=0/1"));
    }
}
