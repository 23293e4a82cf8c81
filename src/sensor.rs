//! src/sensor.rs
//!
//! Sensor side of the pipeline: event model, sources, and the adapter that
//! turns events into window ticks.

pub mod adapter;
pub mod event;
pub mod serial;
pub mod simulated;
pub mod source;

/// Re-exports
pub use adapter::IngestionAdapter;
pub use event::{AXES, SensorEvent, SensorKind};
pub use serial::SerialSource;
pub use simulated::SimulatedSource;
pub use source::{SensorSource, Subscription};
