//! Simulation modes: tuning profiles for the shared telemetry model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimulationMode {
    Office,
    #[default]
    Walking,
    Driving,
    Gaming,
    Fitness,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModeProfile {
    /// Resting heart-rate band (BPM).
    pub heart_rate: (f64, f64),
    /// Extra BPM at full walk-cycle intensity.
    pub exertion_bpm: f64,
    /// Added to the walk-cycle signal before the hysteresis test.
    pub walk_bias: f64,
    /// Speed band while not walking, for modes that move in a vehicle (km/h).
    pub vehicle_speed: Option<(f64, f64)>,
    /// Frame-rate band for the gaming readouts.
    pub fps: (f64, f64),
    /// Network latency band (ms).
    pub ping: (f64, f64),
}

impl SimulationMode {
    pub const ALL: [SimulationMode; 5] = [
        SimulationMode::Office,
        SimulationMode::Walking,
        SimulationMode::Driving,
        SimulationMode::Gaming,
        SimulationMode::Fitness,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SimulationMode::Office => "office",
            SimulationMode::Walking => "walking",
            SimulationMode::Driving => "driving",
            SimulationMode::Gaming => "gaming",
            SimulationMode::Fitness => "fitness",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SimulationMode::Office => "Office Work",
            SimulationMode::Walking => "Walking/Outdoor",
            SimulationMode::Driving => "Driving/Navigation",
            SimulationMode::Gaming => "Gaming Session",
            SimulationMode::Fitness => "Workout/Exercise",
        }
    }

    pub fn profile(self) -> ModeProfile {
        match self {
            SimulationMode::Office => ModeProfile {
                heart_rate: (65.0, 80.0),
                exertion_bpm: 15.0,
                walk_bias: -0.15,
                vehicle_speed: None,
                fps: (55.0, 62.0),
                ping: (28.0, 70.0),
            },
            SimulationMode::Walking => ModeProfile {
                heart_rate: (68.0, 82.0),
                exertion_bpm: 28.0,
                walk_bias: 0.1,
                vehicle_speed: None,
                fps: (50.0, 60.0),
                ping: (35.0, 90.0),
            },
            SimulationMode::Driving => ModeProfile {
                heart_rate: (66.0, 82.0),
                exertion_bpm: 0.0,
                walk_bias: -1.0,
                vehicle_speed: Some((35.0, 90.0)),
                fps: (45.0, 60.0),
                ping: (40.0, 120.0),
            },
            SimulationMode::Gaming => ModeProfile {
                heart_rate: (70.0, 92.0),
                exertion_bpm: 10.0,
                walk_bias: -0.25,
                vehicle_speed: None,
                fps: (140.0, 160.0),
                ping: (12.0, 32.0),
            },
            SimulationMode::Fitness => ModeProfile {
                heart_rate: (105.0, 130.0),
                exertion_bpm: 40.0,
                walk_bias: 0.25,
                vehicle_speed: None,
                fps: (55.0, 60.0),
                ping: (30.0, 85.0),
            },
        }
    }
}

impl fmt::Display for SimulationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimulationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SimulationMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mode '{s}'"))
    }
}
