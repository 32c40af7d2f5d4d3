use std::collections::{BTreeMap, VecDeque};

use hudlens::placement::{Anchor, SurfaceId};
use hudlens::synth::{OscillatorBank, OscillatorConfig, OscillatorPatch};
use hudlens::widgets::FieldKind;

/// Rolling `(time, value)` samples per oscillator for the bottom plots.
#[derive(Clone, Debug)]
pub struct OscillatorHistory {
    window_sec: f64,
    traces: BTreeMap<String, VecDeque<[f64; 2]>>,
}

impl OscillatorHistory {
    pub fn new(window_sec: f64) -> Self {
        Self {
            window_sec,
            traces: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, now: f64, bank: &OscillatorBank) {
        for osc in bank.iter() {
            let value = bank.reading(osc.id()).unwrap_or(0.0);
            let trace = self.traces.entry(osc.id().to_string()).or_default();
            trace.push_back([now, value]);
            while trace
                .front()
                .is_some_and(|[t, _]| now - *t > self.window_sec)
            {
                trace.pop_front();
            }
        }
        self.traces.retain(|id, _| bank.contains(id));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VecDeque<[f64; 2]>)> {
        self.traces.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Control-panel selections that persist between frames.
#[derive(Clone, Debug)]
pub struct EditorState {
    pub payload: String,
    pub add_field: FieldKind,
    pub add_surface: SurfaceId,
    pub add_anchor: Anchor,
    pub show_oscillators: bool,
    pub lens_width: f32,
    pub status: Option<String>,
}

impl EditorState {
    pub fn new(lens_width: f32, show_oscillators: bool) -> Self {
        Self {
            payload: String::new(),
            add_field: FieldKind::HeartRate,
            add_surface: SurfaceId::Left,
            add_anchor: Anchor::Center,
            show_oscillators,
            lens_width,
            status: None,
        }
    }

    /// Payload to attach to a new widget of `kind`, if it takes one.
    pub fn payload_for(&self, kind: Option<FieldKind>) -> Option<String> {
        let text = self.payload.trim();
        match kind {
            Some(k) if k.uses_payload() && !text.is_empty() => Some(text.to_string()),
            _ => None,
        }
    }
}

/// Patch holding only the fields the oscillator editor changed.
pub fn edited_patch(before: &OscillatorConfig, edited: &OscillatorConfig) -> Option<OscillatorPatch> {
    let patch = OscillatorPatch {
        waveform: (edited.waveform != before.waveform).then_some(edited.waveform),
        frequency: (edited.frequency != before.frequency).then_some(edited.frequency),
        amplitude: (edited.amplitude != before.amplitude).then_some(edited.amplitude),
        enabled: (edited.enabled != before.enabled).then_some(edited.enabled),
        ..OscillatorPatch::default()
    };
    (patch != OscillatorPatch::default()).then_some(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hudlens::synth::Waveform;

    #[test]
    fn history_drops_samples_outside_window() {
        let mut bank = OscillatorBank::new(0);
        bank.create("s", OscillatorConfig::default(), 0.0);
        let mut history = OscillatorHistory::new(2.0);
        for i in 0..100 {
            let t = i as f64 * 0.1;
            bank.tick(t);
            history.push(t, &bank);
        }
        let (_, trace) = history.iter().next().unwrap();
        assert!(trace.len() <= 21);
        bank.remove("s");
        history.push(10.0, &bank);
        assert_eq!(history.iter().count(), 0);
    }

    #[test]
    fn payload_only_for_text_kinds() {
        let mut state = EditorState::new(300.0, true);
        state.payload = "  GO  ".into();
        assert_eq!(state.payload_for(Some(FieldKind::Label)), Some("GO".into()));
        assert_eq!(state.payload_for(Some(FieldKind::Steps)), None);
    }

    #[test]
    fn editor_patch_carries_only_changes() {
        let before = OscillatorConfig::default();
        assert_eq!(edited_patch(&before, &before), None);
        let edited = OscillatorConfig {
            waveform: Waveform::Square,
            enabled: false,
            ..before.clone()
        };
        let patch = edited_patch(&before, &edited).unwrap();
        assert_eq!(patch.waveform, Some(Waveform::Square));
        assert_eq!(patch.enabled, Some(false));
        assert_eq!(patch.frequency, None);
        assert_eq!(patch.amplitude, None);
    }
}
