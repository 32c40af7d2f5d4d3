//! Periodic signal sources driven by elapsed wall-clock time.

pub mod bank;
pub mod oscillator;
pub mod util;
pub mod waveform;

pub use bank::OscillatorBank;
pub use oscillator::{Oscillator, OscillatorConfig, OscillatorPatch};
pub use waveform::Waveform;
