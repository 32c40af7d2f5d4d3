//! Named oscillator registry.

use std::collections::BTreeMap;

use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::synth::oscillator::{Oscillator, OscillatorConfig, OscillatorPatch};
use crate::synth::waveform::Waveform;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OscillatorPreset {
    HeartRate,
    Typing,
    Breathing,
    Cpu,
}

impl OscillatorPreset {
    pub const ALL: [OscillatorPreset; 4] = [
        OscillatorPreset::HeartRate,
        OscillatorPreset::Typing,
        OscillatorPreset::Breathing,
        OscillatorPreset::Cpu,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OscillatorPreset::HeartRate => "heartRate",
            OscillatorPreset::Typing => "typing",
            OscillatorPreset::Breathing => "breathing",
            OscillatorPreset::Cpu => "cpu",
        }
    }

    pub fn config(self) -> OscillatorConfig {
        let (waveform, frequency, amplitude, offset, min, max) = match self {
            OscillatorPreset::HeartRate => (Waveform::Sine, 1.2, 15.0, 75.0, 60.0, 90.0),
            OscillatorPreset::Typing => (Waveform::Pulse, 2.0, 100.0, 20.0, 0.0, 120.0),
            OscillatorPreset::Breathing => (Waveform::Breathe, 0.3, 30.0, 50.0, 20.0, 80.0),
            OscillatorPreset::Cpu => (Waveform::Noise, 1.0, 20.0, 45.0, 25.0, 85.0),
        };
        OscillatorConfig {
            waveform,
            frequency,
            amplitude,
            offset,
            min,
            max,
            ..OscillatorConfig::default()
        }
    }
}

pub struct OscillatorBank {
    oscillators: BTreeMap<String, Oscillator>,
    rng: StdRng,
}

impl OscillatorBank {
    pub fn new(seed: u64) -> Self {
        Self {
            oscillators: BTreeMap::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Waveform picker entries as `(name, label)`.
    pub fn kinds() -> Vec<(&'static str, &'static str)> {
        Waveform::ALL.iter().map(|w| (w.name(), w.label())).collect()
    }

    /// Create (or replace) an oscillator whose clock starts at `now`.
    pub fn create(&mut self, id: &str, config: OscillatorConfig, now: f64) -> &Oscillator {
        debug!(id, waveform = config.waveform.name(), "oscillator created");
        self.oscillators
            .insert(id.to_string(), Oscillator::new(id, config, now));
        &self.oscillators[id]
    }

    pub fn create_preset(&mut self, preset: OscillatorPreset, now: f64) -> &Oscillator {
        self.create(preset.name(), preset.config(), now)
    }

    /// Returns false when `id` is unknown.
    pub fn update(&mut self, id: &str, patch: &OscillatorPatch) -> bool {
        match self.oscillators.get_mut(id) {
            Some(osc) => {
                osc.apply(patch);
                true
            }
            None => false,
        }
    }

    /// Evaluate one oscillator now. Unknown or disabled ids read as 0.0.
    pub fn value(&mut self, id: &str, now: f64) -> f64 {
        match self.oscillators.get_mut(id) {
            Some(osc) => osc.evaluate(now, &mut self.rng),
            None => 0.0,
        }
    }

    /// Cached value without re-evaluating.
    pub fn current(&self, id: &str) -> Option<f64> {
        self.oscillators.get(id).map(Oscillator::current_value)
    }

    /// Cached value as readers see it: 0.0 while disabled.
    pub fn reading(&self, id: &str) -> Option<f64> {
        self.oscillators.get(id).map(|osc| {
            if osc.config().enabled {
                osc.current_value()
            } else {
                0.0
            }
        })
    }

    pub fn get(&self, id: &str) -> Option<&Oscillator> {
        self.oscillators.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.oscillators.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Oscillator> {
        self.oscillators.remove(id)
    }

    /// Evaluate every oscillator once; the per-frame driver.
    pub fn tick(&mut self, now: f64) {
        for osc in self.oscillators.values_mut() {
            osc.evaluate(now, &mut self.rng);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Oscillator> {
        self.oscillators.values()
    }

    pub fn len(&self) -> usize {
        self.oscillators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oscillators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_register_under_their_names() {
        let mut bank = OscillatorBank::new(0);
        for p in OscillatorPreset::ALL {
            bank.create_preset(p, 0.0);
        }
        assert_eq!(bank.len(), 4);
        assert!(bank.contains("breathing"));
        let hr = bank.value("heartRate", 3.0);
        assert!((60.0..=90.0).contains(&hr));
    }

    #[test]
    fn unknown_id_reads_zero() {
        let mut bank = OscillatorBank::new(0);
        assert_eq!(bank.value("missing", 1.0), 0.0);
        assert!(!bank.update("missing", &OscillatorPatch::default()));
        assert!(bank.current("missing").is_none());
    }

    #[test]
    fn tick_refreshes_cached_values() {
        let mut bank = OscillatorBank::new(0);
        bank.create("s", OscillatorConfig::default(), 0.0);
        bank.tick(std::f64::consts::FRAC_PI_2);
        assert_eq!(bank.current("s"), Some(100.0));
        bank.remove("s");
        assert!(bank.is_empty());
    }

    #[test]
    fn kinds_cover_every_waveform() {
        let kinds = OscillatorBank::kinds();
        assert_eq!(kinds.len(), Waveform::ALL.len());
        assert!(kinds.contains(&("breathe", "Breathing")));
    }
}
