//! Field kinds a widget can display and how each one is formatted.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Time,
    Bearing,
    HeartRate,
    Steps,
    Calories,
    Floors,
    Distance,
    Speed,
    Altitude,
    #[serde(rename = "temp")]
    Temperature,
    Humidity,
    AirQuality,
    Battery,
    Eta,
    NextTurn,
    Track,
    Activity,
    Breath,
    Cpu,
    Typing,
    Fps,
    Ping,
    Text,
    Label,
    Custom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Biometric,
    Navigation,
    Environment,
    Device,
    Media,
    Custom,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Biometric => "Biometric",
            Category::Navigation => "Navigation",
            Category::Environment => "Environment",
            Category::Device => "Device",
            Category::Media => "Media",
            Category::Custom => "Custom",
        }
    }
}

/// Formatting strategy for a field's snapshot value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Formatter {
    /// Rounded to a whole number, followed by `suffix`.
    Integer { suffix: &'static str },
    Fixed { decimals: usize, suffix: &'static str },
    /// Whole compass degrees.
    Degrees,
    /// Seconds since midnight as `HH:MM:SS`.
    ClockTime,
    /// Snapshot text shown as-is.
    Verbatim,
    /// The widget's own payload, or `placeholder` when empty.
    Payload { placeholder: &'static str },
}

impl FieldKind {
    pub const ALL: [FieldKind; 25] = [
        FieldKind::Time,
        FieldKind::Bearing,
        FieldKind::HeartRate,
        FieldKind::Steps,
        FieldKind::Calories,
        FieldKind::Floors,
        FieldKind::Distance,
        FieldKind::Speed,
        FieldKind::Altitude,
        FieldKind::Temperature,
        FieldKind::Humidity,
        FieldKind::AirQuality,
        FieldKind::Battery,
        FieldKind::Eta,
        FieldKind::NextTurn,
        FieldKind::Track,
        FieldKind::Activity,
        FieldKind::Breath,
        FieldKind::Cpu,
        FieldKind::Typing,
        FieldKind::Fps,
        FieldKind::Ping,
        FieldKind::Text,
        FieldKind::Label,
        FieldKind::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Time => "time",
            FieldKind::Bearing => "bearing",
            FieldKind::HeartRate => "heartRate",
            FieldKind::Steps => "steps",
            FieldKind::Calories => "calories",
            FieldKind::Floors => "floors",
            FieldKind::Distance => "distance",
            FieldKind::Speed => "speed",
            FieldKind::Altitude => "altitude",
            FieldKind::Temperature => "temp",
            FieldKind::Humidity => "humidity",
            FieldKind::AirQuality => "airQuality",
            FieldKind::Battery => "battery",
            FieldKind::Eta => "eta",
            FieldKind::NextTurn => "nextTurn",
            FieldKind::Track => "track",
            FieldKind::Activity => "activity",
            FieldKind::Breath => "breath",
            FieldKind::Cpu => "cpu",
            FieldKind::Typing => "typing",
            FieldKind::Fps => "fps",
            FieldKind::Ping => "ping",
            FieldKind::Text => "text",
            FieldKind::Label => "label",
            FieldKind::Custom => "custom",
        }
    }

    pub fn from_name(name: &str) -> Option<FieldKind> {
        FieldKind::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Time => "Time",
            FieldKind::Bearing => "Bearing",
            FieldKind::HeartRate => "Heart Rate",
            FieldKind::Steps => "Steps",
            FieldKind::Calories => "Calories",
            FieldKind::Floors => "Floors",
            FieldKind::Distance => "Distance",
            FieldKind::Speed => "Speed",
            FieldKind::Altitude => "Altitude",
            FieldKind::Temperature => "Temperature",
            FieldKind::Humidity => "Humidity",
            FieldKind::AirQuality => "Air Quality",
            FieldKind::Battery => "Battery",
            FieldKind::Eta => "ETA",
            FieldKind::NextTurn => "Next Turn",
            FieldKind::Track => "Now Playing",
            FieldKind::Activity => "Activity",
            FieldKind::Breath => "Breathing",
            FieldKind::Cpu => "CPU",
            FieldKind::Typing => "Typing",
            FieldKind::Fps => "FPS",
            FieldKind::Ping => "Ping",
            FieldKind::Text => "Text",
            FieldKind::Label => "Label",
            FieldKind::Custom => "Custom",
        }
    }

    pub fn category(self) -> Category {
        use FieldKind::*;
        match self {
            HeartRate | Steps | Calories | Floors | Activity | Breath => Category::Biometric,
            Bearing | Distance | Speed | Altitude | Eta | NextTurn => Category::Navigation,
            Temperature | Humidity | AirQuality => Category::Environment,
            Time | Battery | Cpu | Typing | Fps | Ping => Category::Device,
            Track => Category::Media,
            Text | Label | Custom => Category::Custom,
        }
    }

    /// True for kinds that show the widget's payload instead of telemetry.
    pub fn uses_payload(self) -> bool {
        matches!(self.formatter(), Formatter::Payload { .. })
    }

    pub fn formatter(self) -> Formatter {
        use Formatter::*;
        match self {
            FieldKind::Time => ClockTime,
            FieldKind::Bearing => Degrees,
            FieldKind::HeartRate => Integer { suffix: " BPM" },
            FieldKind::Steps => Integer { suffix: " STEPS" },
            FieldKind::Calories => Integer { suffix: " KCAL" },
            FieldKind::Floors => Integer { suffix: " FL" },
            FieldKind::Distance => Fixed {
                decimals: 2,
                suffix: " km",
            },
            FieldKind::Speed => Fixed {
                decimals: 1,
                suffix: " km/h",
            },
            FieldKind::Altitude => Integer { suffix: " m" },
            FieldKind::Temperature => Fixed {
                decimals: 1,
                suffix: "°C",
            },
            FieldKind::Humidity => Integer { suffix: "% RH" },
            FieldKind::AirQuality => Verbatim,
            FieldKind::Battery => Integer { suffix: "%" },
            FieldKind::Eta => Integer { suffix: " min" },
            FieldKind::NextTurn => Verbatim,
            FieldKind::Track => Verbatim,
            FieldKind::Activity => Verbatim,
            FieldKind::Breath => Integer { suffix: "%" },
            FieldKind::Cpu => Integer { suffix: "% CPU" },
            FieldKind::Typing => Integer { suffix: " WPM" },
            FieldKind::Fps => Integer { suffix: " FPS" },
            FieldKind::Ping => Integer { suffix: "ms" },
            FieldKind::Text => Payload {
                placeholder: "TEXT",
            },
            FieldKind::Label => Payload {
                placeholder: "LABEL",
            },
            FieldKind::Custom => Payload {
                placeholder: "CUSTOM",
            },
        }
    }
}
