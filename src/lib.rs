pub mod config;
pub mod core;
pub mod placement;
pub mod session;
pub mod synth;
pub mod telemetry;
pub mod widgets;
