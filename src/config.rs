//! src/config.rs
//!
//! Runtime settings, loaded from an optional JSON file.
//!
//! Every field has a default, so an empty object (or no file at all) gives an
//! accelerometer monitor over the simulated source:
//! ```json
//! {
//!   "capacity": 10,
//!   "sensor": "accelerometer",
//!   "source": { "kind": "serial", "port": "/dev/ttyACM0", "baud_rate": 115200 },
//!   "remote_addr": "127.0.0.1:4000",
//!   "y_range": [-20.0, 20.0]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr, ensure};
use serde::Deserialize;

use crate::sensor::simulated::period_for;
use crate::sensor::{SensorKind, SensorSource, SerialSource, SimulatedSource};

/// Where sensor events come from.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Simulated {
        #[serde(default = "default_rate_hz")]
        rate_hz: f64,
        #[serde(default)]
        seed: Option<u64>,
    },
    Serial {
        port: String,
        #[serde(default = "default_baud_rate")]
        baud_rate: u32,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Simulated {
            rate_hz: default_rate_hz(),
            seed: None,
        }
    }
}

impl SourceConfig {
    /// Build the configured source.
    pub fn build(&self) -> Box<dyn SensorSource> {
        match self {
            SourceConfig::Simulated { rate_hz, seed } => {
                Box::new(SimulatedSource::new(*rate_hz, *seed))
            }
            SourceConfig::Serial {
                port,
                baud_rate,
                timeout_ms,
            } => Box::new(SerialSource::new(
                port,
                *baud_rate,
                Duration::from_millis(*timeout_ms),
            )),
        }
    }
}

fn default_rate_hz() -> f64 {
    20.0
}

fn default_baud_rate() -> u32 {
    115_200
}

fn default_timeout_ms() -> u64 {
    250
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Samples visible per channel.
    pub capacity: usize,

    /// Sensor kind whose readings are charted; others are ignored.
    pub sensor: SensorKind,

    pub source: SourceConfig,

    /// Remote control bind address; `null` disables the server.
    pub remote_addr: Option<String>,

    /// UI frame period in milliseconds.
    pub frame_ms: u64,

    /// Y-range used when autoscale is off.
    pub y_range: (f64, f64),

    pub autoscale: bool,

    pub log_file: PathBuf,

    /// Fallback log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            capacity: 10,
            sensor: SensorKind::Accelerometer,
            source: SourceConfig::default(),
            remote_addr: Some("127.0.0.1:4000".to_string()),
            frame_ms: 100,
            y_range: (-20.0, 20.0),
            autoscale: true,
            log_file: PathBuf::from("accel-tui-monitor.log"),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&text)
                    .wrap_err_with(|| format!("invalid config {}", path.display()))?
            }
            None => Settings::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks not covered by the window constructor.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.frame_ms > 0, "frame_ms must be greater than zero");
        ensure!(
            self.y_range.0 < self.y_range.1,
            "y_range must be increasing, got {:?}",
            self.y_range
        );
        if let SourceConfig::Simulated { rate_hz, .. } = self.source {
            ensure!(
                period_for(rate_hz).is_some(),
                "simulated rate_hz must be positive with a representable period, got {rate_hz}"
            );
        }
        Ok(())
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}
