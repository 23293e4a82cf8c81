//! src/graph/window.rs
//!
//! Fixed set of count-synchronized channels fed one tuple per tick.
//!
//! Every channel receives exactly one append per tick from the same function,
//! and the eviction decision depends only on the channel's count. Since all
//! channels start empty, their counts stay equal after every tick.

use std::ops::Range;

use super::WindowError;
use super::series::SampleSeries;

/// Inclusive coordinate interval handed to the renderer: always `[0, C-1]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleRange {
    start: usize,
    end: usize,
}

impl VisibleRange {
    /// Range for a window of `capacity` samples. `capacity` must be non-zero.
    pub fn for_capacity(capacity: usize) -> Self {
        Self {
            start: 0,
            end: capacity.saturating_sub(1),
        }
    }

    /// Number of coordinates covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Positions of a `count`-long buffer that fall inside the range.
    pub fn clamp(&self, count: usize) -> Range<usize> {
        let end = count.min(self.end + 1);
        self.start.min(end)..end
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    /// Axis bounds for chart widgets.
    pub fn bounds(&self) -> [f64; 2] {
        [self.start as f64, self.end as f64]
    }
}

/// Fill level shared by every channel of a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowState {
    /// Fewer than `capacity` samples; no eviction has happened yet.
    Filling,
    /// Exactly `capacity` samples.
    AtCapacity,
    /// `capacity + 1` samples; the oldest is evicted on the next tick.
    ///
    /// Once a window has filled up this is the state observed between ticks:
    /// each tick passes through `AtCapacity` after its eviction and returns
    /// here with its append.
    OverCapacity,
}

/// K synchronized channels sharing one capacity.
#[derive(Clone, Debug)]
pub struct MultiChannelWindow<const K: usize> {
    series: [SampleSeries; K],
    capacity: usize,
    ticks: u64,
}

impl<const K: usize> MultiChannelWindow<K> {
    /// Build a window with one empty series per label.
    pub fn new<L: Into<String>>(labels: [L; K], capacity: usize) -> Result<Self, WindowError> {
        if K == 0 {
            return Err(WindowError::ZeroChannels);
        }
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }
        Ok(Self {
            series: labels.map(|label| SampleSeries::new(label, capacity)),
            capacity,
            ticks: 0,
        })
    }

    /// Apply one tick: append `tuple[i]` to channel `i`, in channel order.
    pub fn ingest(&mut self, tuple: [f64; K]) {
        for (series, value) in self.series.iter_mut().zip(tuple) {
            series.append(value);
        }
        self.ticks += 1;
    }

    /// Borrowed view of every channel plus the visible range.
    ///
    /// The snapshot borrows the window, so it cannot outlive the next tick.
    pub fn snapshot(&self) -> Snapshot<'_, K> {
        Snapshot {
            channels: self.series.each_ref(),
            visible_range: self.visible_range(),
            capacity: self.capacity,
        }
    }

    pub fn visible_range(&self) -> VisibleRange {
        VisibleRange::for_capacity(self.capacity)
    }

    /// Shared sample count; identical for every channel between ticks.
    pub fn count(&self) -> usize {
        self.series[0].count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ticks applied since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn state(&self) -> WindowState {
        state_for(self.count(), self.capacity)
    }
}

fn state_for(count: usize, capacity: usize) -> WindowState {
    if count > capacity {
        WindowState::OverCapacity
    } else if count == capacity {
        WindowState::AtCapacity
    } else {
        WindowState::Filling
    }
}

/// Render unit: every channel's live samples and the constant visible range.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a, const K: usize> {
    pub channels: [&'a SampleSeries; K],
    pub visible_range: VisibleRange,
    pub capacity: usize,
}

impl<const K: usize> Snapshot<'_, K> {
    pub fn count(&self) -> usize {
        self.channels[0].count()
    }

    pub fn state(&self) -> WindowState {
        state_for(self.count(), self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Sample;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn xyz(capacity: usize) -> MultiChannelWindow<3> {
        MultiChannelWindow::new(["x", "y", "z"], capacity).unwrap()
    }

    fn pairs(series: &SampleSeries) -> Vec<(usize, f64)> {
        series.entries().iter().map(|s| (s.index, s.value)).collect()
    }

    #[test]
    fn rejects_misconfiguration() {
        assert_eq!(
            MultiChannelWindow::new(["x", "y"], 0).unwrap_err(),
            WindowError::ZeroCapacity
        );
        let labels: [&str; 0] = [];
        assert_eq!(
            MultiChannelWindow::new(labels, 5).unwrap_err(),
            WindowError::ZeroChannels
        );
    }

    #[test]
    fn scrolls_three_channels_with_lagged_eviction() {
        let mut w = xyz(2);
        let ticks = [
            [1.0, 10.0, 100.0],
            [2.0, 20.0, 200.0],
            [3.0, 30.0, 300.0],
            [4.0, 40.0, 400.0],
        ];
        let expected: [Vec<(usize, f64)>; 4] = [
            vec![(0, 1.0)],
            vec![(0, 1.0), (1, 2.0)],
            vec![(0, 1.0), (1, 2.0), (2, 3.0)],
            vec![(0, 2.0), (1, 3.0), (2, 4.0)],
        ];
        for (tuple, want) in ticks.into_iter().zip(expected) {
            w.ingest(tuple);
            let snap = w.snapshot();
            assert_eq!(pairs(snap.channels[0]), want);
        }

        let snap = w.snapshot();
        assert_eq!(
            pairs(snap.channels[1]),
            vec![(0, 20.0), (1, 30.0), (2, 40.0)]
        );
        assert_eq!(
            pairs(snap.channels[2]),
            vec![(0, 200.0), (1, 300.0), (2, 400.0)]
        );
    }

    #[test]
    fn visible_range_ignores_transient_overflow() {
        let mut w = xyz(10);
        let fixed = VisibleRange { start: 0, end: 9 };
        for tick in 0..40 {
            w.ingest([tick as f64; 3]);
            let snap = w.snapshot();
            assert_eq!(snap.visible_range, fixed);
            assert_eq!(snap.visible_range.len(), 10);
        }
        assert!(matches!(
            w.state(),
            WindowState::AtCapacity | WindowState::OverCapacity
        ));
    }

    #[test]
    fn clamp_stays_inside_range_and_buffer() {
        let range = VisibleRange::for_capacity(3);
        assert_eq!(range.clamp(0), 0..0);
        assert_eq!(range.clamp(2), 0..2);
        assert_eq!(range.clamp(4), 0..3);

        let inner = VisibleRange { start: 2, end: 4 };
        assert_eq!(inner.clamp(10), 2..5);
        assert_eq!(inner.clamp(3), 2..3);
        assert_eq!(inner.clamp(1), 1..1);
    }

    #[test]
    fn state_settles_over_capacity_once_full() {
        let mut w = xyz(3);
        let mut states = Vec::new();
        for _ in 0..7 {
            w.ingest([0.0; 3]);
            states.push(w.state());
        }
        use WindowState::*;
        assert_eq!(
            states,
            vec![
                Filling,
                Filling,
                AtCapacity,
                OverCapacity,
                OverCapacity,
                OverCapacity,
                OverCapacity
            ]
        );
    }

    #[test]
    fn random_ticks_keep_channels_synchronized_and_contiguous() {
        let mut rng = StdRng::seed_from_u64(7);
        for capacity in [1, 2, 5, 10] {
            let mut w = xyz(capacity);
            for _ in 0..200 {
                let tuple = [
                    rng.random_range(-20.0..20.0),
                    rng.random_range(-20.0..20.0),
                    rng.random_range(-20.0..20.0),
                ];
                w.ingest(tuple);
                let snap = w.snapshot();
                let count = snap.channels[0].count();
                assert!(count <= capacity + 1);
                for (channel, value) in snap.channels.iter().zip(tuple) {
                    assert_eq!(channel.count(), count);
                    let idx: Vec<usize> = channel.entries().iter().map(|s| s.index).collect();
                    assert_eq!(idx, (0..count).collect::<Vec<_>>());
                    assert_eq!(channel.last(), Some(&Sample::new(count - 1, value)));
                }
            }
            assert_eq!(w.ticks(), 200);
        }
    }
}
