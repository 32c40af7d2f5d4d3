use hudlens::core::frame_loop::FrameLoop;
use hudlens::synth::bank::{OscillatorBank, OscillatorPreset};
use hudlens::telemetry::activity::{ActivityState, WALK_ENTER, WALK_EXIT};
use hudlens::telemetry::{SimulationMode, TelemetryEngine, TelemetrySettings};
use hudlens::widgets::FieldKind;

#[test]
fn walking_holds_until_signal_drops_below_exit() {
    let signal = [0.2, 0.75, 0.5, 0.31, 0.6, 0.29, 0.5, 0.69, 0.71];
    let expected = [
        ActivityState::Idle,
        ActivityState::Walking,
        ActivityState::Walking,
        ActivityState::Walking,
        ActivityState::Walking,
        ActivityState::Idle,
        ActivityState::Idle,
        ActivityState::Idle,
        ActivityState::Walking,
    ];
    let mut state = ActivityState::Idle;
    for (s, want) in signal.iter().zip(expected) {
        state = state.next(*s);
        assert_eq!(state, want, "signal {s}");
    }
    assert!(WALK_EXIT < WALK_ENTER);
}

fn run(mode: SimulationMode, seconds: f64) -> (TelemetryEngine, Vec<hudlens::telemetry::TelemetrySnapshot>) {
    let mut engine = TelemetryEngine::new(TelemetrySettings {
        mode,
        ..TelemetrySettings::default()
    });
    engine.initialize();
    let mut bank = OscillatorBank::new(1);
    for p in OscillatorPreset::ALL {
        bank.create_preset(p, 0.0);
    }
    let mut clock = FrameLoop::new();
    clock.start(0.0);
    let mut out = Vec::new();
    let frames = (seconds * 30.0) as u64;
    for i in 0..frames {
        let frame = clock.tick(i as f64 / 30.0).unwrap();
        bank.tick(frame.now);
        out.push(engine.tick(&frame, &bank).unwrap());
    }
    (engine, out)
}

#[test]
fn accumulators_never_decrease() {
    let (_, snaps) = run(SimulationMode::Fitness, 600.0);
    let mut last = (0.0, 0.0, 0.0);
    for s in &snaps {
        let now = (
            s.number(FieldKind::Steps).unwrap(),
            s.number(FieldKind::Calories).unwrap(),
            s.number(FieldKind::Floors).unwrap(),
        );
        assert!(now.0 >= last.0 && now.1 >= last.1 && now.2 >= last.2);
        last = now;
    }
}

#[test]
fn steps_only_grow_while_walking() {
    let (_, snaps) = run(SimulationMode::Walking, 900.0);
    for pair in snaps.windows(2) {
        let grew = pair[1].number(FieldKind::Steps) > pair[0].number(FieldKind::Steps);
        if grew {
            assert_eq!(pair[1].activity(), ActivityState::Walking);
        }
    }
}

#[test]
fn same_seed_same_telemetry() {
    let (_, a) = run(SimulationMode::Office, 30.0);
    let (_, b) = run(SimulationMode::Office, 30.0);
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.number(FieldKind::HeartRate), y.number(FieldKind::HeartRate));
        assert_eq!(x.number(FieldKind::Bearing), y.number(FieldKind::Bearing));
    }
}

#[test]
fn readings_stay_in_their_bands() {
    let (_, snaps) = run(SimulationMode::Gaming, 300.0);
    for s in &snaps {
        let bearing = s.number(FieldKind::Bearing).unwrap();
        assert!((0.0..360.0).contains(&bearing));
        let battery = s.number(FieldKind::Battery).unwrap();
        assert!((20.0..=100.0).contains(&battery));
        let time = s.number(FieldKind::Time).unwrap();
        assert!((0.0..86_400.0).contains(&time));
    }
}
