use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, trace};

use crate::core::frame_loop::FrameTime;
use crate::core::noise::NoiseParams;
use crate::core::phase::wrap_degrees;
use crate::synth::bank::{OscillatorBank, OscillatorPreset};
use crate::telemetry::activity::{ActivityState, Pedometer};
use crate::telemetry::channels::{Channel, Channels};
use crate::telemetry::media;
use crate::telemetry::mode::SimulationMode;
use crate::telemetry::snapshot::{TelemetrySnapshot, TelemetryValue};
use crate::widgets::field::FieldKind;

const SECS_PER_DAY: f64 = 86_400.0;

/// Oscillators the tick reads from; without them the tick is skipped.
pub const REQUIRED_OSCILLATORS: [OscillatorPreset; 3] = [
    OscillatorPreset::Breathing,
    OscillatorPreset::Cpu,
    OscillatorPreset::Typing,
];

#[derive(Clone, Debug, PartialEq)]
pub struct TelemetrySettings {
    pub seed: u64,
    pub mode: SimulationMode,
    pub noise: NoiseParams,
    pub step_interval_sec: f64,
    pub track_interval_sec: f64,
    /// Local time of day at session start, seconds since midnight.
    pub clock_origin_sec: f64,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            seed: 42,
            mode: SimulationMode::default(),
            noise: NoiseParams::default(),
            step_interval_sec: 0.5,
            track_interval_sec: 180.0,
            clock_origin_sec: 0.0,
        }
    }
}

pub struct TelemetryEngine {
    settings: TelemetrySettings,
    channels: Option<Channels>,
    activity: ActivityState,
    pedometer: Pedometer,
    rng: StdRng,
}

impl TelemetryEngine {
    /// Channels are built by `initialize`; ticks before that are skipped.
    pub fn new(settings: TelemetrySettings) -> Self {
        let pedometer = Pedometer::new(settings.step_interval_sec);
        let rng = StdRng::seed_from_u64(settings.seed.wrapping_add(1));
        Self {
            settings,
            channels: None,
            activity: ActivityState::Idle,
            pedometer,
            rng,
        }
    }

    pub fn initialize(&mut self) {
        if self.channels.is_none() {
            self.channels = Some(Channels::new(self.settings.seed, self.settings.noise));
            debug!(seed = self.settings.seed, "telemetry channels initialized");
        }
    }

    /// Call when the frame clock restarts from zero. Accumulated totals
    /// are kept; rate gates keyed to the old clock are cleared.
    pub fn resume(&mut self) {
        self.pedometer.rearm();
        self.activity = ActivityState::Idle;
    }

    pub fn is_initialized(&self) -> bool {
        self.channels.is_some()
    }

    pub fn settings(&self) -> &TelemetrySettings {
        &self.settings
    }

    pub fn mode(&self) -> SimulationMode {
        self.settings.mode
    }

    /// Takes effect on the next tick; accumulators carry over.
    pub fn set_mode(&mut self, mode: SimulationMode) {
        if mode != self.settings.mode {
            debug!(from = %self.settings.mode, to = %mode, "simulation mode changed");
            self.settings.mode = mode;
        }
    }

    pub fn activity(&self) -> ActivityState {
        self.activity
    }

    pub fn pedometer(&self) -> &Pedometer {
        &self.pedometer
    }

    /// Walk-cycle level in [0, 1] at `elapsed`, mode bias applied.
    pub fn walk_signal(&self, elapsed: f64) -> Option<f64> {
        let channels = self.channels.as_ref()?;
        let raw = channels.range(Channel::WalkCycle, elapsed, -0.3, 1.3);
        Some((raw + self.settings.mode.profile().walk_bias).clamp(0.0, 1.0))
    }

    /// Compute this frame's snapshot. Returns `None` (and changes nothing)
    /// when channels or required oscillators are not ready yet.
    pub fn tick(&mut self, frame: &FrameTime, bank: &OscillatorBank) -> Option<TelemetrySnapshot> {
        let Some(walk) = self.walk_signal(frame.elapsed) else {
            trace!(frame = frame.frame_index, "telemetry tick skipped: channels not ready");
            return None;
        };
        let mut osc = [0.0; REQUIRED_OSCILLATORS.len()];
        for (slot, preset) in osc.iter_mut().zip(REQUIRED_OSCILLATORS) {
            match bank.reading(preset.name()) {
                Some(v) => *slot = v,
                None => {
                    trace!(
                        frame = frame.frame_index,
                        oscillator = preset.name(),
                        "telemetry tick skipped: oscillator missing"
                    );
                    return None;
                }
            }
        }
        let [breath, cpu, typing] = osc;
        let channels = self.channels.as_ref()?;

        let t = frame.elapsed;
        let profile = self.settings.mode.profile();

        let next = self.activity.next(walk);
        if next != self.activity {
            debug!(from = ?self.activity, to = ?next, walk, elapsed = t, "activity changed");
            self.activity = next;
        }

        let altitude = channels.range(Channel::Altitude, t, 120.0, 180.0);
        self.pedometer
            .advance(self.activity, t, altitude, &mut self.rng);

        let heart_rate = channels.range(Channel::Heart, t, profile.heart_rate.0, profile.heart_rate.1)
            + walk * profile.exertion_bpm;
        let speed = if self.activity.is_walking() {
            channels.range(Channel::Speed, t, 3.8, 5.6)
        } else if let Some((lo, hi)) = profile.vehicle_speed {
            channels.range(Channel::Speed, t, lo, hi)
        } else {
            0.0
        };
        let aqi = channels.range(Channel::AirQuality, t, 15.0, 80.0);
        let air = if aqi > 50.0 { "MODERATE" } else { "GOOD" };
        let battery = (100.0 - (t / 60.0).floor() % 80.0).max(20.0);
        let eta = media::route_remaining_min(t) * channels.range(Channel::Traffic, t, 0.9, 1.3);

        use TelemetryValue::{Count, Number, Text};
        let snapshot = TelemetrySnapshot::new(t, frame.frame_index, self.activity)
            .with(
                FieldKind::Time,
                Number((self.settings.clock_origin_sec + t).rem_euclid(SECS_PER_DAY)),
            )
            .with(
                FieldKind::Bearing,
                Number(wrap_degrees(channels.range(Channel::Bearing, t, 0.0, 720.0))),
            )
            .with(FieldKind::HeartRate, Number(heart_rate))
            .with(FieldKind::Steps, Count(self.pedometer.steps()))
            .with(FieldKind::Calories, Number(self.pedometer.calories()))
            .with(FieldKind::Floors, Count(self.pedometer.floors()))
            .with(FieldKind::Distance, Number(self.pedometer.distance_km()))
            .with(FieldKind::Speed, Number(speed))
            .with(FieldKind::Altitude, Number(altitude))
            .with(
                FieldKind::Temperature,
                Number(channels.range(Channel::Temperature, t, 18.0, 25.0)),
            )
            .with(
                FieldKind::Humidity,
                Number(channels.range(Channel::Humidity, t, 35.0, 65.0)),
            )
            .with(FieldKind::AirQuality, Text(format!("{air} ({aqi:.0})")))
            .with(FieldKind::Battery, Number(battery))
            .with(FieldKind::Eta, Number(eta))
            .with(FieldKind::NextTurn, Text(media::next_turn(t)))
            .with(
                FieldKind::Track,
                Text(media::track_title(t, self.settings.track_interval_sec)),
            )
            .with(FieldKind::Activity, Text(self.activity.label().to_string()))
            .with(FieldKind::Breath, Number(breath))
            .with(FieldKind::Cpu, Number(cpu))
            .with(FieldKind::Typing, Number(typing))
            .with(FieldKind::Fps, Number(channels.range(Channel::Fps, t, profile.fps.0, profile.fps.1)))
            .with(FieldKind::Ping, Number(channels.range(Channel::Ping, t, profile.ping.0, profile.ping.1)));
        Some(snapshot)
    }
}
