//! src/sensor/simulated.rs
//!
//! Synthetic three-axis source for running without hardware.
//!
//! Emits accelerometer readings (gravity on Z, a slow wobble on X/Y, uniform
//! noise) at a fixed rate. Every few readings it also emits a gyroscope reading
//! or an accuracy notice, the same mix a real device delivers, so the adapter's
//! filtering is exercised while the app runs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::{Result, eyre};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::event::{SensorEvent, SensorKind};
use super::source::{SensorSource, Subscription};

const GRAVITY: f64 = 9.81;

/// Longest uninterrupted sleep; bounds how long `cancel` waits on the worker.
const STOP_POLL: Duration = Duration::from_millis(10);

pub struct SimulatedSource {
    name: String,
    rate_hz: f64,
    seed: Option<u64>,
}

impl SimulatedSource {
    /// `rate_hz` must be positive; it is validated with the rest of the settings.
    pub fn new(rate_hz: f64, seed: Option<u64>) -> Self {
        Self {
            name: format!("simulated @ {rate_hz} Hz"),
            rate_hz,
            seed,
        }
    }
}

/// Time between events at `rate_hz`, or `None` when it is not a usable period.
pub fn period_for(rate_hz: f64) -> Option<Duration> {
    if !(rate_hz.is_finite() && rate_hz > 0.0) {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / rate_hz).ok()
}

/// Sleep for `period` in `STOP_POLL` slices. Returns `false` if `stop` was set.
fn wait(stop: &AtomicBool, period: Duration) -> bool {
    // a period past the clock's range never elapses
    let deadline = Instant::now().checked_add(period);
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let left = match deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => STOP_POLL,
        };
        if left.is_zero() {
            return true;
        }
        thread::sleep(left.min(STOP_POLL));
    }
}

/// Generator state, separate from the thread so it can be stepped in tests.
struct Generator {
    rng: StdRng,
    step: u64,
}

impl Generator {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng, step: 0 }
    }

    fn next_event(&mut self) -> SensorEvent {
        self.step += 1;
        let t = self.step as f64 * 0.1;

        if self.step % 25 == 0 {
            return SensorEvent::AccuracyChanged {
                kind: SensorKind::Accelerometer,
                accuracy: self.rng.random_range(1..=3),
            };
        }
        if self.step % 7 == 0 {
            let values: Vec<f64> = (0..3).map(|_| self.rng.random_range(-0.5..0.5)).collect();
            return SensorEvent::reading(SensorKind::Gyroscope, values);
        }

        let noise = 0.15;
        let x = 1.5 * t.sin() + self.rng.random_range(-noise..noise);
        let y = 0.8 * (0.7 * t).cos() + self.rng.random_range(-noise..noise);
        let z = GRAVITY + 0.3 * (0.3 * t).sin() + self.rng.random_range(-noise..noise);
        SensorEvent::reading(SensorKind::Accelerometer, vec![x, y, z])
    }
}

impl SensorSource for SimulatedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn subscribe(&mut self, tx: Sender<SensorEvent>) -> Result<Subscription> {
        let period = period_for(self.rate_hz)
            .ok_or_else(|| eyre!("unusable simulated rate {} Hz", self.rate_hz))?;
        let mut generator = Generator::new(self.seed);
        info!("simulated source started ({} Hz)", self.rate_hz);

        Subscription::spawn("sensor-simulated", move |stop: &AtomicBool| {
            while !stop.load(Ordering::Relaxed) {
                if tx.send(generator.next_event()).is_err() {
                    debug!("simulated source: receiver gone");
                    break;
                }
                if !wait(stop, period) {
                    break;
                }
            }
            info!("simulated source exiting");
        })
    }
}
