//! src/ui.rs
//!
//! Terminal UI: layout nodes and the dashboard render sink.

pub mod dashboard;
pub mod node;

pub use dashboard::Dashboard;
pub use node::{Node, Panel, column, leaf, row};
