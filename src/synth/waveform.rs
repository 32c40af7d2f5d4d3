use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::phase::{cycle_fraction, wrap_0_tau};

/// Waveform shapes available to oscillators. Serialized names match the
/// keys used by oscillator presets and config files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Waveform {
    #[default]
    Sine,
    Cosine,
    Triangle,
    Square,
    Sawtooth,
    RampUp,
    RampDown,
    Noise,
    Pulse,
    Bounce,
    Heartbeat,
    Breathe,
}

impl Waveform {
    pub const ALL: [Waveform; 12] = [
        Waveform::Sine,
        Waveform::Cosine,
        Waveform::Triangle,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::RampUp,
        Waveform::RampDown,
        Waveform::Noise,
        Waveform::Pulse,
        Waveform::Bounce,
        Waveform::Heartbeat,
        Waveform::Breathe,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Cosine => "cosine",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::RampUp => "rampUp",
            Waveform::RampDown => "rampDown",
            Waveform::Noise => "noise",
            Waveform::Pulse => "pulse",
            Waveform::Bounce => "bounce",
            Waveform::Heartbeat => "heartbeat",
            Waveform::Breathe => "breathe",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine Wave",
            Waveform::Cosine => "Cosine Wave",
            Waveform::Triangle => "Triangle",
            Waveform::Square => "Square Wave",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::RampUp => "Ramp Up",
            Waveform::RampDown => "Ramp Down",
            Waveform::Noise => "Random Noise",
            Waveform::Pulse => "Pulse",
            Waveform::Bounce => "Bounce",
            Waveform::Heartbeat => "Heartbeat",
            Waveform::Breathe => "Breathing",
        }
    }

    pub fn from_name(name: &str) -> Option<Waveform> {
        Waveform::ALL.into_iter().find(|w| w.name() == name)
    }

    /// Raw waveform value before clamping. `t` is elapsed seconds (phase
    /// already applied); `freq` is in radians per second.
    pub fn sample<R: Rng + ?Sized>(
        self,
        t: f64,
        freq: f64,
        amp: f64,
        offset: f64,
        rng: &mut R,
    ) -> f64 {
        let arg = t * freq;
        match self {
            Waveform::Sine => arg.sin() * amp + offset,
            Waveform::Cosine => arg.cos() * amp + offset,
            Waveform::Triangle => (2.0 * amp / PI) * arg.sin().asin() + offset,
            Waveform::Square => {
                let level = if arg.sin() > 0.0 { amp } else { -amp };
                level + offset
            }
            Waveform::Sawtooth => (2.0 * amp / PI) * (arg / 2.0).tan().atan() + offset,
            Waveform::RampUp => cycle_fraction(arg) * amp + offset,
            Waveform::RampDown => (1.0 - cycle_fraction(arg)) * amp + offset,
            Waveform::Noise => rng.random_range(-1.0..=1.0) * amp + offset,
            Waveform::Pulse => {
                let level = if wrap_0_tau(arg) < PI * 0.2 { amp } else { 0.0 };
                level + offset
            }
            Waveform::Bounce => arg.sin().abs() * amp + offset,
            Waveform::Heartbeat => {
                let c = wrap_0_tau(arg);
                if c < 0.3 {
                    (c * 10.0).sin() * amp + offset
                } else if c < 0.6 {
                    ((c - 0.3) * 15.0).sin() * amp * 0.7 + offset
                } else {
                    offset
                }
            }
            Waveform::Breathe => {
                let breath = (arg * 0.3).sin();
                breath.abs().powi(2) * breath.signum() * amp + offset
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    fn at(w: Waveform, t: f64) -> f64 {
        let mut rng = StdRng::seed_from_u64(0);
        w.sample(t, 1.0, 1.0, 0.0, &mut rng)
    }

    #[test]
    fn names_round_trip() {
        for w in Waveform::ALL {
            assert_eq!(Waveform::from_name(w.name()), Some(w));
        }
        assert_eq!(Waveform::from_name("zigzag"), None);
    }

    #[test]
    fn triangle_is_linear_between_peaks() {
        assert_abs_diff_eq!(at(Waveform::Triangle, PI / 2.0), 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(at(Waveform::Triangle, PI / 4.0), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn sawtooth_resets_each_cycle() {
        let before = at(Waveform::Sawtooth, PI - 1e-3);
        let after = at(Waveform::Sawtooth, PI + 1e-3);
        assert!(before > 0.99 && after < -0.99, "before={before} after={after}");
    }

    #[test]
    fn ramps_mirror_each_other() {
        for i in 0..20 {
            let t = i as f64 * 0.37;
            assert_abs_diff_eq!(
                at(Waveform::RampUp, t) + at(Waveform::RampDown, t),
                1.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn heartbeat_rests_after_second_lobe() {
        assert_eq!(at(Waveform::Heartbeat, 1.0), 0.0);
        assert!(at(Waveform::Heartbeat, 0.15) > 0.9);
    }

    #[test]
    fn pulse_is_narrow() {
        let n = 1000;
        let high = (0..n)
            .filter(|i| at(Waveform::Pulse, *i as f64 / n as f64 * std::f64::consts::TAU) > 0.5)
            .count();
        assert!((90..=110).contains(&high), "high samples={high}");
    }

    #[test]
    fn noise_stays_within_amplitude() {
        let mut rng = StdRng::seed_from_u64(9);
        for i in 0..500 {
            let v = Waveform::Noise.sample(i as f64, 1.0, 20.0, 45.0, &mut rng);
            assert!((25.0..=65.0).contains(&v));
        }
    }
}
