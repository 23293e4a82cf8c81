//! src/graph/error.rs
//!
//! Construction errors for the sliding-window buffer.

use thiserror::Error;

/// Misconfiguration detected when building a window.
///
/// These are programming or configuration errors and are surfaced once at
/// construction time. Nothing on the per-tick path can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("a window needs at least one channel")]
    ZeroChannels,
    #[error("window capacity must be greater than zero")]
    ZeroCapacity,
}
