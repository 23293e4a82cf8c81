//! src/session.rs
//!
//! One monitoring session: the window, the adapter in front of it, the sensor
//! source, and the live subscription when started.
//!
//! The session is the only writer of the window. Source threads push events
//! into a channel and `pump` handles them one at a time on the caller's
//! thread, drawing after every applied tick.

use std::sync::mpsc::{self, Receiver, TryRecvError};

use color_eyre::eyre::Result;
use log::{info, warn};

use crate::graph::MultiChannelWindow;
use crate::render::RenderSink;
use crate::sensor::{IngestionAdapter, SensorEvent, SensorSource, Subscription};

/// Upper bound on events handled per `pump` call so a flooding source cannot
/// starve the UI loop.
const BURST_LIMIT: usize = 512;

/// Counters shown alongside the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionStatus<'a> {
    pub source: &'a str,
    pub subscribed: bool,
    pub ticks: u64,
    pub dropped: u64,
}

struct Live {
    subscription: Subscription,
    events: Receiver<SensorEvent>,
}

pub struct Session<S: SensorSource, const K: usize> {
    window: MultiChannelWindow<K>,
    adapter: IngestionAdapter<K>,
    source: S,
    live: Option<Live>,
    dropped: u64,
}

impl<S: SensorSource, const K: usize> Session<S, K> {
    pub fn new(window: MultiChannelWindow<K>, adapter: IngestionAdapter<K>, source: S) -> Self {
        Self {
            window,
            adapter,
            source,
            live: None,
            dropped: 0,
        }
    }

    /// Subscribe to the source. No-op when already subscribed.
    pub fn start(&mut self) -> Result<()> {
        if self.live.is_some() {
            return Ok(());
        }
        let (tx, events) = mpsc::channel();
        let subscription = self.source.subscribe(tx)?;
        info!(
            "subscribed to {} (tracking {})",
            self.source.name(),
            self.adapter.tracked()
        );
        self.live = Some(Live {
            subscription,
            events,
        });
        Ok(())
    }

    /// Unsubscribe. Events not yet pumped are discarded; the window is kept.
    pub fn stop(&mut self) {
        if let Some(Live {
            subscription,
            events,
        }) = self.live.take()
        {
            drop(events);
            subscription.cancel();
            info!("unsubscribed from {}", self.source.name());
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.live.is_some()
    }

    /// Handle pending events in arrival order. Every applied tick is drawn
    /// before the next event is taken. Returns the number of ticks applied.
    pub fn pump<R: RenderSink<K>>(&mut self, sink: &mut R) -> Result<usize> {
        let mut applied = 0;
        for _ in 0..BURST_LIMIT {
            let Some(live) = &self.live else { break };
            let event = match live.events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("sensor source {} stopped delivering", self.source.name());
                    self.stop();
                    break;
                }
            };

            if self.adapter.forward(&event, &mut self.window) {
                applied += 1;
                sink.draw(&self.window.snapshot(), &self.status())?;
            } else {
                self.dropped += 1;
            }
        }
        Ok(applied)
    }

    /// Draw the current state without ingesting anything.
    pub fn redraw<R: RenderSink<K>>(&self, sink: &mut R) -> Result<()> {
        sink.draw(&self.window.snapshot(), &self.status())
    }

    pub fn status(&self) -> SessionStatus<'_> {
        SessionStatus {
            source: self.source.name(),
            subscribed: self.live.is_some(),
            ticks: self.window.ticks(),
            dropped: self.dropped,
        }
    }

    pub fn window(&self) -> &MultiChannelWindow<K> {
        &self.window
    }
}

impl<S: SensorSource, const K: usize> Drop for Session<S, K> {
    fn drop(&mut self) {
        self.stop();
    }
}
