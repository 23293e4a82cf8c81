//! src/graph/series.rs
//!
//! Single-channel bounded sample history with renumber-on-evict.
//!
//! Samples are addressed by a relative index: the oldest live sample is always
//! index 0 and indices grow by one toward the newest. When the oldest sample is
//! evicted every remaining sample shifts down by one, so the chart's x axis stays
//! anchored at zero while data scrolls left.

use super::VisibleRange;

/// One `(index, value)` point of a channel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub value: f64,
}

impl Sample {
    pub fn new(index: usize, value: f64) -> Self {
        Self { index, value }
    }

    /// `(x, y)` pair as expected by chart widgets.
    pub fn point(&self) -> (f64, f64) {
        (self.index as f64, self.value)
    }
}

#[derive(Clone, Debug)]
pub struct SampleSeries {
    label: String,
    capacity: usize,
    /// live samples, oldest first; never holds more than `capacity + 1` entries
    samples: Vec<Sample>,
}

impl SampleSeries {
    /// Create an empty series. The backing buffer is allocated once for
    /// `capacity + 1` samples and never grows past it.
    ///
    /// `capacity` is validated by [`MultiChannelWindow::new`](super::MultiChannelWindow::new).
    pub(super) fn new(label: impl Into<String>, capacity: usize) -> Self {
        Self {
            label: label.into(),
            capacity,
            samples: Vec::with_capacity(capacity + 1),
        }
    }

    /// Append a value, evicting the oldest sample first if the previous append
    /// left the series over capacity.
    ///
    /// The overflow check runs *before* the push, so once the series fills up
    /// its length alternates between `capacity` and `capacity + 1`. The extra
    /// sample sits just past the visible range until the next append shifts it
    /// into view.
    pub fn append(&mut self, value: f64) {
        if self.samples.len() > self.capacity {
            self.samples.remove(0);
            for sample in &mut self.samples {
                sample.index -= 1;
            }
        }
        let index = self.samples.len();
        self.samples.push(Sample::new(index, value));
    }

    /// Live samples in ascending index order.
    pub fn entries(&self) -> &[Sample] {
        &self.samples
    }

    /// Live samples that fall inside `range`.
    pub fn visible(&self, range: VisibleRange) -> &[Sample] {
        &self.samples[range.clamp(self.samples.len())]
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
impl SampleSeries {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(series: &SampleSeries) -> Vec<f64> {
        series.entries().iter().map(|s| s.value).collect()
    }

    fn indices(series: &SampleSeries) -> Vec<usize> {
        series.entries().iter().map(|s| s.index).collect()
    }

    #[test]
    fn fills_without_eviction_up_to_one_over_capacity() {
        let mut s = SampleSeries::new("x", 10);
        for v in 1..=11 {
            s.append(v as f64);
        }
        assert_eq!(s.count(), 11);
        assert_eq!(indices(&s), (0..=10).collect::<Vec<_>>());
        assert_eq!(values(&s), (1..=11).map(|v| v as f64).collect::<Vec<_>>());
    }

    #[test]
    fn evicts_oldest_on_the_tick_after_overflow() {
        let mut s = SampleSeries::new("x", 10);
        for v in 1..=12 {
            s.append(v as f64);
        }
        // v1 was dropped, v2..v12 renumbered to 0..10
        assert_eq!(s.count(), 11);
        assert_eq!(indices(&s), (0..=10).collect::<Vec<_>>());
        assert_eq!(values(&s), (2..=12).map(|v| v as f64).collect::<Vec<_>>());

        s.append(13.0);
        assert_eq!(values(&s), (3..=13).map(|v| v as f64).collect::<Vec<_>>());
    }

    #[test]
    fn each_sample_is_dropped_exactly_once() {
        let mut s = SampleSeries::new("x", 3);
        let mut seen_first = Vec::new();
        for v in 0..50 {
            s.append(v as f64);
            let first = s.entries()[0].value;
            if seen_first.last() != Some(&first) {
                seen_first.push(first);
            }
        }
        let expected: Vec<f64> = (0..seen_first.len()).map(|v| v as f64).collect();
        assert_eq!(seen_first, expected);
    }

    #[test]
    fn indices_stay_contiguous_and_bounded() {
        let mut s = SampleSeries::new("x", 4);
        for v in 0..100 {
            s.append(v as f64 * 0.5);
            assert!(s.count() <= s.capacity() + 1);
            assert_eq!(indices(&s), (0..s.count()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn visible_slice_hides_the_buffered_sample() {
        let mut s = SampleSeries::new("x", 2);
        for v in [1.0, 2.0, 3.0] {
            s.append(v);
        }
        let range = VisibleRange::for_capacity(2);
        let shown: Vec<f64> = s.visible(range).iter().map(|p| p.value).collect();
        assert_eq!(shown, vec![1.0, 2.0]);
        assert_eq!(s.last(), Some(&Sample::new(2, 3.0)));
    }
}
