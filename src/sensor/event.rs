//! src/sensor/event.rs
//!
//! Sensor event model and the ASCII line format read from serial devices.
//!
//! Accepted lines (tags are case-insensitive):
//! ```text
//! ACC 0.12 9.79 -0.31
//! GYR 0.01 -0.02 0.00
//! MAG 21.5 -4.0 40.2
//! ACCURACY ACC 3
//! ```
//! Any other leading tag is kept as [`SensorKind::Other`] so the adapter can
//! decide to ignore it.

use std::fmt;

/// Axes of a three-axis sensor; the closed set of channels a window tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Number of channels per tracked sensor.
pub const AXES: usize = 3;

impl Axis {
    /// Channel order used by windows and tuples.
    pub const ALL: [Axis; AXES] = [Axis::X, Axis::Y, Axis::Z];

    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Kind tag carried by every event.
///
/// Deserializes from the same tags the line format accepts, so a config file
/// may name the sensor `"acc"`, `"ACC"` or `"Accelerometer"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(from = "String")]
pub enum SensorKind {
    Accelerometer,
    Gyroscope,
    Magnetometer,
    Other(String),
}

impl From<String> for SensorKind {
    fn from(tag: String) -> Self {
        SensorKind::from_tag(&tag)
    }
}

impl SensorKind {
    /// Parse a line tag such as `ACC` or `gyroscope`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "acc" | "accel" | "accelerometer" => SensorKind::Accelerometer,
            "gyr" | "gyro" | "gyroscope" => SensorKind::Gyroscope,
            "mag" | "magnetometer" => SensorKind::Magnetometer,
            _ => SensorKind::Other(tag.to_string()),
        }
    }

    /// Prefix for per-axis channel labels (`Accel` + `X` = `AccelX`).
    pub fn channel_prefix(&self) -> &str {
        match self {
            SensorKind::Accelerometer => "Accel",
            SensorKind::Gyroscope => "Gyro",
            SensorKind::Magnetometer => "Mag",
            SensorKind::Other(tag) => tag,
        }
    }

    /// One label per axis, in channel order.
    pub fn channel_labels(&self) -> [String; AXES] {
        Axis::ALL.map(|axis| format!("{}{}", self.channel_prefix(), axis.name()))
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Accelerometer => f.write_str("accelerometer"),
            SensorKind::Gyroscope => f.write_str("gyroscope"),
            SensorKind::Magnetometer => f.write_str("magnetometer"),
            SensorKind::Other(tag) => write!(f, "other({tag})"),
        }
    }
}

/// One event pushed by a sensor source.
#[derive(Clone, Debug, PartialEq)]
pub enum SensorEvent {
    /// New raw values for one sensor kind.
    Reading { kind: SensorKind, values: Vec<f64> },
    /// The source reports a changed accuracy level; carries no samples.
    AccuracyChanged { kind: SensorKind, accuracy: u8 },
}

impl SensorEvent {
    pub fn reading(kind: SensorKind, values: impl Into<Vec<f64>>) -> Self {
        SensorEvent::Reading {
            kind,
            values: values.into(),
        }
    }

    pub fn kind(&self) -> &SensorKind {
        match self {
            SensorEvent::Reading { kind, .. } | SensorEvent::AccuracyChanged { kind, .. } => kind,
        }
    }
}

/// Parse one line of the serial protocol.
///
/// Returns `None` for blank lines, lines without values, and lines where any
/// value fails to parse. Arity is *not* checked here.
pub fn parse_line(line: &str) -> Option<SensorEvent> {
    let mut parts = line.split_whitespace();
    let tag = parts.next()?;

    if tag.eq_ignore_ascii_case("accuracy") {
        let kind = SensorKind::from_tag(parts.next()?);
        let accuracy = parts.next()?.parse::<u8>().ok()?;
        if parts.next().is_some() {
            return None;
        }
        return Some(SensorEvent::AccuracyChanged { kind, accuracy });
    }

    let values = parts
        .map(|p| p.trim_end_matches(',').parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    if values.is_empty() {
        return None;
    }
    Some(SensorEvent::reading(SensorKind::from_tag(tag), values))
}
