use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::noise::NoiseParams;
use crate::placement::grid::GridRules;
use crate::session::SessionSettings;
use crate::telemetry::engine::TelemetrySettings;
use crate::telemetry::mode::SimulationMode;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "SimulationConfig::default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub mode: SimulationMode,
    #[serde(default = "SimulationConfig::default_octaves")]
    pub octaves: u32,
    #[serde(default = "SimulationConfig::default_persistence")]
    pub persistence: f64,
    #[serde(default = "SimulationConfig::default_lacunarity")]
    pub lacunarity: f64,
    #[serde(default = "SimulationConfig::default_scale")]
    pub scale: f64,
    #[serde(default = "SimulationConfig::default_step_interval_sec")]
    pub step_interval_sec: f64,
    #[serde(default = "SimulationConfig::default_track_interval_sec")]
    pub track_interval_sec: f64,
}

impl SimulationConfig {
    fn default_seed() -> u64 {
        42
    }
    fn default_octaves() -> u32 {
        4
    }
    fn default_persistence() -> f64 {
        0.5
    }
    fn default_lacunarity() -> f64 {
        2.0
    }
    fn default_scale() -> f64 {
        0.02
    }
    fn default_step_interval_sec() -> f64 {
        0.5
    }
    fn default_track_interval_sec() -> f64 {
        180.0
    }

    pub fn noise_params(&self) -> NoiseParams {
        NoiseParams {
            octaves: self.octaves,
            persistence: self.persistence,
            lacunarity: self.lacunarity,
            scale: self.scale,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            mode: SimulationMode::default(),
            octaves: Self::default_octaves(),
            persistence: Self::default_persistence(),
            lacunarity: Self::default_lacunarity(),
            scale: Self::default_scale(),
            step_interval_sec: Self::default_step_interval_sec(),
            track_interval_sec: Self::default_track_interval_sec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacementConfig {
    #[serde(default = "PlacementConfig::default_grid_size")]
    pub grid_size: f32,
    #[serde(default = "PlacementConfig::default_margin")]
    pub margin: f32,
    #[serde(default = "PlacementConfig::default_settle_ms")]
    pub settle_ms: f64,
}

impl PlacementConfig {
    fn default_grid_size() -> f32 {
        5.0
    }
    fn default_margin() -> f32 {
        8.0
    }
    fn default_settle_ms() -> f64 {
        150.0
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            grid_size: Self::default_grid_size(),
            margin: Self::default_margin(),
            settle_ms: Self::default_settle_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    #[serde(default = "UiConfig::default_pixels_per_point")]
    pub pixels_per_point: f32,
    #[serde(default = "UiConfig::default_lens_width")]
    pub lens_width: f32,
    #[serde(default = "UiConfig::default_show_oscillators")]
    pub show_oscillators: bool,
}

impl UiConfig {
    fn default_pixels_per_point() -> f32 {
        1.25
    }
    fn default_lens_width() -> f32 {
        300.0
    }
    fn default_show_oscillators() -> bool {
        true
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            pixels_per_point: Self::default_pixels_per_point(),
            lens_width: Self::default_lens_width(),
            show_oscillators: Self::default_show_oscillators(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    fn round_f32(x: f32) -> f32 {
        (x * 1_000_000.0).round() / 1_000_000.0
    }

    fn format_f32_compact(x: f32) -> String {
        let mut s = format!("{:.6}", x);
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        if s.is_empty() { "0".to_string() } else { s }
    }

    fn rounded(mut self) -> Self {
        self.placement.grid_size = Self::round_f32(self.placement.grid_size);
        self.placement.margin = Self::round_f32(self.placement.margin);
        self.ui.pixels_per_point = Self::round_f32(self.ui.pixels_per_point);
        self.ui.lens_width = Self::round_f32(self.ui.lens_width);
        self
    }

    /// Session settings for this config. `clock_origin_sec` is the local
    /// time of day at startup, in seconds since midnight.
    pub fn session_settings(&self, clock_origin_sec: f64) -> SessionSettings {
        let sim = &self.simulation;
        SessionSettings {
            telemetry: TelemetrySettings {
                seed: sim.seed,
                mode: sim.mode,
                noise: sim.noise_params(),
                step_interval_sec: sim.step_interval_sec,
                track_interval_sec: sim.track_interval_sec,
                clock_origin_sec,
            },
            rules: GridRules::new(self.placement.grid_size, self.placement.margin),
            settle_secs: self.placement.settle_ms / 1000.0,
        }
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!(path, %err, "failed to parse config; using defaults");
                    }
                },
                Err(err) => {
                    warn!(path, %err, "failed to read config; using defaults");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default().rounded();
        if let Ok(text) = toml::to_string_pretty(&default_cfg) {
            let mut commented = String::new();
            for line in text.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    commented.push('\n');
                } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
                    commented.push_str(line);
                    commented.push('\n');
                } else {
                    let mut out_line = line.to_string();
                    if let Some((lhs, rhs)) = line.split_once('=') {
                        let rhs_trim = rhs.trim();
                        let has_decimal = rhs_trim.contains('.');
                        if (has_decimal || rhs_trim.contains('e') || rhs_trim.contains('E'))
                            && !rhs_trim.contains('"')
                            && rhs_trim != "true"
                            && rhs_trim != "false"
                        {
                            if let Ok(val) = rhs_trim.parse::<f32>() {
                                let mut formatted = Self::format_f32_compact(val);
                                if has_decimal && !formatted.contains('.') {
                                    formatted.push_str(".0");
                                }
                                out_line = format!("{} = {}", lhs.trim(), formatted);
                            }
                        }
                    }
                    commented.push_str("# ");
                    commented.push_str(&out_line);
                    commented.push('\n');
                }
            }
            match fs::write(path_obj, commented) {
                Ok(()) => info!(path, "wrote default config template"),
                Err(err) => warn!(path, %err, "failed to write default config"),
            }
        } else {
            warn!("failed to serialize default config; continuing with defaults");
        }
        default_cfg
    }
}
