//! src/render.rs
//!
//! Render boundary: the sink trait the session draws through, and the view
//! settings that, together with a snapshot, fully determine a frame.

use color_eyre::eyre::Result;

use crate::graph::Snapshot;
use crate::session::SessionStatus;

/// Consumer of window snapshots.
///
/// Implementations must not carry state between draws beyond what they are
/// configured with: drawing the same snapshot and status twice produces the
/// same output.
pub trait RenderSink<const K: usize> {
    fn draw(&mut self, snapshot: &Snapshot<'_, K>, status: &SessionStatus<'_>) -> Result<()>;
}

/// User-controlled y-axis behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSettings {
    pub autoscale: bool,
    pub locked_bounds: Option<(f64, f64)>,
    /// Used when autoscale is off or there is no data yet.
    pub y_range: (f64, f64),
}

impl ViewSettings {
    pub fn new(autoscale: bool, y_range: (f64, f64)) -> Self {
        Self {
            autoscale,
            locked_bounds: None,
            y_range,
        }
    }

    /// Y bounds for `snapshot`: locked bounds first, then autoscale, then the
    /// fixed range.
    pub fn y_bounds<const K: usize>(&self, snapshot: &Snapshot<'_, K>) -> (f64, f64) {
        if let Some(bounds) = self.locked_bounds {
            bounds
        } else if self.autoscale {
            data_bounds(snapshot).unwrap_or(self.y_range)
        } else {
            self.y_range
        }
    }

    /// Enabling autoscale clears any lock.
    pub fn toggle_autoscale(&mut self) {
        self.autoscale = !self.autoscale;
        if self.autoscale {
            self.locked_bounds = None;
        }
    }

    /// Freeze the bounds currently shown for `snapshot`.
    pub fn lock<const K: usize>(&mut self, snapshot: &Snapshot<'_, K>) {
        self.locked_bounds = Some(self.y_bounds(snapshot));
    }

    pub fn unlock(&mut self) {
        self.locked_bounds = None;
    }
}

/// Padded `(min, max)` over the visible samples of every channel.
///
/// Flat data gets padding proportional to its magnitude so the line stays
/// visible; otherwise 10% of the range is added on each side. `None` when no
/// finite sample is visible.
pub fn data_bounds<const K: usize>(snapshot: &Snapshot<'_, K>) -> Option<(f64, f64)> {
    let mut mn = f64::INFINITY;
    let mut mx = f64::NEG_INFINITY;
    for channel in snapshot.channels {
        for sample in channel.visible(snapshot.visible_range) {
            if sample.value.is_finite() {
                mn = mn.min(sample.value);
                mx = mx.max(sample.value);
            }
        }
    }
    if !mn.is_finite() || !mx.is_finite() {
        return None;
    }
    let pad = if (mx - mn).abs() < f64::EPSILON {
        mn.abs().max(1.0) * 0.1
    } else {
        (mx - mn) * 0.1
    };
    Some((mn - pad, mx + pad))
}
