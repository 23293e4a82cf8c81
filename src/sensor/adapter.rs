//! src/sensor/adapter.rs
//!
//! Translation from raw sensor events to window ticks.

use log::trace;

use super::event::{SensorEvent, SensorKind};
use crate::graph::MultiChannelWindow;

/// Why an event did not become a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Discard {
    /// The event is for a sensor kind the window does not track.
    Untracked,
    /// Value count differs from the window's channel count.
    Arity { expected: usize, actual: usize },
    /// Accuracy notices carry no samples.
    Accuracy,
}

/// Stateless filter in front of a [`MultiChannelWindow`].
///
/// Accepts readings of one sensor kind with exactly `K` values and turns them
/// into a `[f64; K]` tuple in channel order. Everything else is dropped
/// without side effects.
#[derive(Clone, Debug)]
pub struct IngestionAdapter<const K: usize> {
    tracked: SensorKind,
}

impl<const K: usize> IngestionAdapter<K> {
    pub fn new(tracked: SensorKind) -> Self {
        Self { tracked }
    }

    pub fn tracked(&self) -> &SensorKind {
        &self.tracked
    }

    /// Unpack an event into a tick tuple, or say why it was discarded.
    pub fn translate(&self, event: &SensorEvent) -> Result<[f64; K], Discard> {
        match event {
            SensorEvent::AccuracyChanged { .. } => Err(Discard::Accuracy),
            SensorEvent::Reading { kind, .. } if *kind != self.tracked => Err(Discard::Untracked),
            SensorEvent::Reading { values, .. } => {
                <[f64; K]>::try_from(values.as_slice()).map_err(|_| Discard::Arity {
                    expected: K,
                    actual: values.len(),
                })
            }
        }
    }

    /// Forward an event to the window. Returns `true` when a tick was applied.
    pub fn forward(&self, event: &SensorEvent, window: &mut MultiChannelWindow<K>) -> bool {
        match self.translate(event) {
            Ok(tuple) => {
                window.ingest(tuple);
                true
            }
            Err(reason) => {
                trace!("discarding {} event: {:?}", event.kind(), reason);
                false
            }
        }
    }
}
