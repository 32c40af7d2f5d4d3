use std::collections::BTreeMap;

use crate::telemetry::activity::ActivityState;
use crate::widgets::field::FieldKind;

#[derive(Clone, Debug, PartialEq)]
pub enum TelemetryValue {
    Number(f64),
    Count(u64),
    Text(String),
}

impl TelemetryValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TelemetryValue::Number(v) => Some(*v),
            TelemetryValue::Count(n) => Some(*n as f64),
            TelemetryValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TelemetryValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// All telemetry fields for one frame. Built once per tick and never
/// mutated afterwards; widgets rendered in the same frame read the same one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TelemetrySnapshot {
    elapsed: f64,
    frame_index: u64,
    activity: ActivityState,
    values: BTreeMap<FieldKind, TelemetryValue>,
}

impl TelemetrySnapshot {
    pub(crate) fn new(elapsed: f64, frame_index: u64, activity: ActivityState) -> Self {
        Self {
            elapsed,
            frame_index,
            activity,
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn with(mut self, kind: FieldKind, value: TelemetryValue) -> Self {
        self.values.insert(kind, value);
        self
    }

    /// Representative readings for palette previews.
    pub fn sample() -> Self {
        use TelemetryValue::*;
        Self::new(0.0, 0, ActivityState::Idle)
            .with(FieldKind::Time, Number(12.0 * 3600.0 + 34.0 * 60.0))
            .with(FieldKind::Bearing, Number(127.0))
            .with(FieldKind::HeartRate, Number(72.0))
            .with(FieldKind::Steps, Count(4521))
            .with(FieldKind::Calories, Number(181.0))
            .with(FieldKind::Floors, Count(3))
            .with(FieldKind::Distance, Number(3.53))
            .with(FieldKind::Speed, Number(4.8))
            .with(FieldKind::Altitude, Number(146.0))
            .with(FieldKind::Temperature, Number(21.5))
            .with(FieldKind::Humidity, Number(48.0))
            .with(FieldKind::AirQuality, Text("GOOD".into()))
            .with(FieldKind::Battery, Number(86.0))
            .with(FieldKind::Eta, Number(12.0))
            .with(FieldKind::NextTurn, Text("→ 0.3km".into()))
            .with(FieldKind::Track, Text("Night Drive - Lumen".into()))
            .with(FieldKind::Activity, Text("IDLE".into()))
            .with(FieldKind::Breath, Number(50.0))
            .with(FieldKind::Cpu, Number(45.0))
            .with(FieldKind::Typing, Number(20.0))
            .with(FieldKind::Fps, Number(144.0))
            .with(FieldKind::Ping, Number(24.0))
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn activity(&self) -> ActivityState {
        self.activity
    }

    pub fn get(&self, kind: FieldKind) -> Option<&TelemetryValue> {
        self.values.get(&kind)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&TelemetryValue> {
        FieldKind::from_name(name).and_then(|k| self.get(k))
    }

    pub fn number(&self, kind: FieldKind) -> Option<f64> {
        self.get(kind).and_then(TelemetryValue::as_f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &TelemetryValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
