use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::synth::util::{clamp_loose, flush_non_finite};
use crate::synth::waveform::Waveform;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorConfig {
    #[serde(rename = "type")]
    pub waveform: Waveform,
    pub frequency: f64,
    pub amplitude: f64,
    pub offset: f64,
    pub phase: f64,
    pub min: f64,
    pub max: f64,
    pub enabled: bool,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            frequency: 1.0,
            amplitude: 50.0,
            offset: 50.0,
            phase: 0.0,
            min: 0.0,
            max: 100.0,
            enabled: true,
        }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OscillatorPatch {
    pub waveform: Option<Waveform>,
    pub frequency: Option<f64>,
    pub amplitude: Option<f64>,
    pub offset: Option<f64>,
    pub phase: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct Oscillator {
    id: String,
    config: OscillatorConfig,
    start_time: f64,
    current_value: f64,
}

impl Oscillator {
    pub fn new(id: impl Into<String>, config: OscillatorConfig, start_time: f64) -> Self {
        Self {
            id: id.into(),
            config,
            start_time,
            current_value: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &OscillatorConfig {
        &self.config
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Last value produced by an enabled evaluation.
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn apply(&mut self, patch: &OscillatorPatch) {
        let c = &mut self.config;
        if let Some(w) = patch.waveform {
            c.waveform = w;
        }
        if let Some(v) = patch.frequency {
            c.frequency = v;
        }
        if let Some(v) = patch.amplitude {
            c.amplitude = v;
        }
        if let Some(v) = patch.offset {
            c.offset = v;
        }
        if let Some(v) = patch.phase {
            c.phase = v;
        }
        if let Some(v) = patch.min {
            c.min = v;
        }
        if let Some(v) = patch.max {
            c.max = v;
        }
        if let Some(v) = patch.enabled {
            c.enabled = v;
        }
    }

    /// Seconds of oscillator time at `now`, phase included. A clock reading
    /// before `start_time` counts as zero elapsed.
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.start_time).max(0.0) + self.config.phase
    }

    /// Evaluate at `now`, clamp into `[min, max]` and cache.
    ///
    /// A disabled oscillator reads as 0.0 and keeps its cached value, so
    /// re-enabling resumes from the last live reading.
    pub fn evaluate<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> f64 {
        if !self.config.enabled {
            return 0.0;
        }
        let c = &self.config;
        let raw = c
            .waveform
            .sample(self.elapsed(now), c.frequency, c.amplitude, c.offset, rng);
        let floor = c.min.min(c.max);
        let value = clamp_loose(flush_non_finite(raw, floor), c.min, c.max);
        self.current_value = value;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn disabled_reads_zero_and_keeps_cache() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut osc = Oscillator::new("hr", OscillatorConfig::default(), 0.0);
        let live = osc.evaluate(0.3, &mut rng);
        osc.apply(&OscillatorPatch {
            enabled: Some(false),
            ..Default::default()
        });
        assert_eq!(osc.evaluate(1.0, &mut rng), 0.0);
        assert_eq!(osc.current_value(), live);
    }

    #[test]
    fn patch_applies_on_next_evaluation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut osc = Oscillator::new("x", OscillatorConfig::default(), 0.0);
        let before = osc.evaluate(0.0, &mut rng);
        assert_eq!(before, 50.0);
        osc.apply(&OscillatorPatch {
            offset: Some(20.0),
            ..Default::default()
        });
        assert_eq!(osc.current_value(), 50.0);
        assert_eq!(osc.evaluate(0.0, &mut rng), 20.0);
    }

    #[test]
    fn clock_before_start_counts_as_zero() {
        let osc = Oscillator::new(
            "p",
            OscillatorConfig {
                phase: 0.25,
                ..Default::default()
            },
            10.0,
        );
        assert_eq!(osc.elapsed(5.0), 0.25);
    }

    #[test]
    fn nan_frequency_falls_back_to_floor() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut osc = Oscillator::new(
            "n",
            OscillatorConfig {
                frequency: f64::NAN,
                min: 10.0,
                max: 30.0,
                ..Default::default()
            },
            0.0,
        );
        assert_eq!(osc.evaluate(2.0, &mut rng), 10.0);
    }
}
