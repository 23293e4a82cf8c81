//! src/graph.rs
//!
//! Sliding-window sample buffer: per-channel series and the synchronized
//! multi-channel window that renderers read snapshots from.

pub mod error;
pub mod series;
pub mod window;

/// Re-exports
pub use error::WindowError;
pub use series::{Sample, SampleSeries};
pub use window::{MultiChannelWindow, Snapshot, VisibleRange, WindowState};
