//! Event-style fields that rotate on fixed intervals instead of every tick.

pub const TRACKS: [(&str, &str); 6] = [
    ("Lumen", "Night Drive"),
    ("Halcyon Fields", "Glass Horizon"),
    ("Arc Nine", "Low Orbit"),
    ("Mira Vale", "Signal Bloom"),
    ("Parallax", "Slow Current"),
    ("Northbound", "Static Hearts"),
];

/// Now-playing track: advances every `interval` seconds and wraps around.
pub fn track_at(elapsed: f64, interval: f64) -> (usize, &'static str, &'static str) {
    let idx = if interval > 0.0 && elapsed.is_finite() {
        ((elapsed.max(0.0) / interval).floor() as u64 % TRACKS.len() as u64) as usize
    } else {
        0
    };
    let (artist, title) = TRACKS[idx];
    (idx, artist, title)
}

pub fn track_title(elapsed: f64, interval: f64) -> String {
    let (_, artist, title) = track_at(elapsed, interval);
    format!("{title} - {artist}")
}

/// Simulated route: a loop of fixed-length legs, each ending in a turn.
pub const ROUTE_SECS: f64 = 1200.0;
pub const LEG_SECS: f64 = 90.0;
pub const LEG_KM: f64 = 0.9;
const TURNS: [&str; 3] = ["→", "←", "↑"];

/// Minutes to destination before the traffic factor is applied.
pub fn route_remaining_min(elapsed: f64) -> f64 {
    let into = elapsed.max(0.0) % ROUTE_SECS;
    (ROUTE_SECS - into) / 60.0
}

pub fn next_turn(elapsed: f64) -> String {
    let e = elapsed.max(0.0);
    let leg = (e / LEG_SECS).floor() as u64;
    let frac = (e % LEG_SECS) / LEG_SECS;
    let arrow = TURNS[(leg % TURNS.len() as u64) as usize];
    format!("{arrow} {:.1}km", LEG_KM * (1.0 - frac))
}
