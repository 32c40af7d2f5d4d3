//! Field + snapshot + payload -> display string. Never fails: unknown
//! fields echo their own name, missing readings show a dash.

use crate::telemetry::snapshot::{TelemetrySnapshot, TelemetryValue};
use crate::widgets::field::{FieldKind, Formatter};

pub const MISSING: &str = "--";

pub fn resolve(field_name: &str, snapshot: &TelemetrySnapshot, payload: Option<&str>) -> String {
    match FieldKind::from_name(field_name) {
        Some(kind) => resolve_kind(kind, snapshot, payload),
        None => field_name.to_string(),
    }
}

pub fn resolve_kind(kind: FieldKind, snapshot: &TelemetrySnapshot, payload: Option<&str>) -> String {
    let value = snapshot.get(kind);
    match kind.formatter() {
        Formatter::Payload { placeholder } => match payload.map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => placeholder.to_string(),
        },
        Formatter::Integer { suffix } => match value.and_then(TelemetryValue::as_f64) {
            Some(v) => format!("{}{suffix}", v.round() as i64),
            None => MISSING.to_string(),
        },
        Formatter::Fixed { decimals, suffix } => match value.and_then(TelemetryValue::as_f64) {
            Some(v) => format!("{v:.decimals$}{suffix}"),
            None => MISSING.to_string(),
        },
        Formatter::Degrees => match value.and_then(TelemetryValue::as_f64) {
            Some(v) => format!("{}°", (v.round() as i64).rem_euclid(360)),
            None => MISSING.to_string(),
        },
        Formatter::ClockTime => match value.and_then(TelemetryValue::as_f64) {
            Some(v) => clock_time(v),
            None => MISSING.to_string(),
        },
        Formatter::Verbatim => match value {
            Some(TelemetryValue::Text(s)) => s.clone(),
            Some(TelemetryValue::Number(v)) => format!("{v:.0}"),
            Some(TelemetryValue::Count(n)) => n.to_string(),
            None => MISSING.to_string(),
        },
    }
}

/// Sample text for a palette entry, independent of anything placed.
pub fn preview(field_name: &str) -> String {
    resolve(field_name, &TelemetrySnapshot::sample(), None)
}

fn clock_time(secs_of_day: f64) -> String {
    let total = secs_of_day.max(0.0).floor() as u64 % 86_400;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total / 60) % 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_reference_formats() {
        let snap = TelemetrySnapshot::sample();
        assert_eq!(resolve("bearing", &snap, None), "127°");
        assert_eq!(resolve("heartRate", &snap, None), "72 BPM");
        assert_eq!(resolve("steps", &snap, None), "4521 STEPS");
        assert_eq!(resolve("temp", &snap, None), "21.5°C");
        assert_eq!(resolve("time", &snap, None), "12:34:00");
    }

    #[test]
    fn clock_wraps_past_midnight() {
        assert_eq!(clock_time(86_400.0 + 61.5), "00:01:01");
    }
}
