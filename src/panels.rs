//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod chart;
pub mod history;
pub mod info;
pub mod paragraph;
pub mod title;

pub use chart::ChartPanel;
pub use history::HistoryPanel;
pub use info::InfoPanel;
pub use paragraph::ControlsPanel;
pub use title::TitlePanel;
