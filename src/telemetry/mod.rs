//! Procedural telemetry: noise channels, activity state and accumulators,
//! folded into one snapshot per frame.

pub mod activity;
pub mod channels;
pub mod engine;
pub mod media;
pub mod mode;
pub mod snapshot;

pub use activity::ActivityState;
pub use engine::{TelemetryEngine, TelemetrySettings};
pub use mode::SimulationMode;
pub use snapshot::{TelemetrySnapshot, TelemetryValue};
