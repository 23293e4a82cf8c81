//! src/sensor/source.rs
//!
//! Push-based sensor sources and the subscription handle that keeps a source's
//! worker thread alive.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use color_eyre::eyre::{Result, WrapErr};
use log::{debug, warn};

use super::event::SensorEvent;

/// Something that pushes [`SensorEvent`]s at its own pace.
pub trait SensorSource {
    /// Short description used in logs and the UI.
    fn name(&self) -> &str;

    /// Start delivering events into `tx` until the returned subscription is
    /// cancelled or dropped.
    fn subscribe(&mut self, tx: Sender<SensorEvent>) -> Result<Subscription>;
}

impl<S: SensorSource + ?Sized> SensorSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn subscribe(&mut self, tx: Sender<SensorEvent>) -> Result<Subscription> {
        (**self).subscribe(tx)
    }
}

/// Live delivery from a source worker thread.
///
/// Dropping the handle asks the worker to stop without waiting for it;
/// [`Subscription::cancel`] also joins it.
pub struct Subscription {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Spawn a named worker. The closure receives the stop flag and must return
    /// soon after it is set.
    pub fn spawn<F>(name: &str, worker: F) -> Result<Self>
    where
        F: FnOnce(&AtomicBool) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || worker(&flag))
            .wrap_err_with(|| format!("failed to spawn sensor thread {name}"))?;
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    /// Stop the worker and wait for it to exit.
    pub fn cancel(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("sensor thread panicked");
            }
        }
        debug!("subscription cancelled");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn cancel_stops_the_worker() {
        let (tx, rx) = mpsc::channel();
        let sub = Subscription::spawn("test-worker", move |stop| {
            while !stop.load(Ordering::Relaxed) {
                if tx.send(1u8).is_err() {
                    return;
                }
                thread::sleep(Duration::from_millis(1));
            }
        })
        .unwrap();

        assert_eq!(rx.recv_timeout(Duration::from_secs(2)), Ok(1));
        sub.cancel();
        // drain whatever was queued before the flag was seen
        while rx.try_recv().is_ok() {}
        assert!(rx.recv_timeout(Duration::from_millis(20)).is_err());
    }

}
