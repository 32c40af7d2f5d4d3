// Entry point: launches the egui/eframe editor, or a headless telemetry run.
mod app;
mod cli;
mod ui;

use std::io::IsTerminal;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

use chrono::Timelike;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use hudlens::config::AppConfig;
use hudlens::session::{SessionSettings, SimulationSession};
use hudlens::widgets::FieldKind;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);
    Registry::default().with(filter).with(fmt_layer).init();
}

fn clock_origin_sec() -> f64 {
    chrono::Local::now().num_seconds_from_midnight() as f64
}

fn run_headless(settings: SessionSettings, duration: Option<f64>, stop_flag: Arc<AtomicBool>) {
    let mut session = SimulationSession::new(settings);
    let started = Instant::now();
    session.start(0.0);
    let mut next_report = 1.0;
    while !stop_flag.load(Ordering::SeqCst) {
        let now = started.elapsed().as_secs_f64();
        if duration.is_some_and(|d| now >= d) {
            break;
        }
        if let Some(frame) = session.tick(now) {
            if now >= next_report {
                next_report += 1.0;
                let snap = &frame.snapshot;
                info!(
                    t = %format!("{:.1}", frame.frame.elapsed),
                    activity = frame.activity().label(),
                    heart_rate = %format!("{:.0}", snap.number(FieldKind::HeartRate).unwrap_or(0.0)),
                    steps = snap.number(FieldKind::Steps).unwrap_or(0.0),
                    bearing = %format!("{:.0}", snap.number(FieldKind::Bearing).unwrap_or(0.0)),
                    "telemetry"
                );
            }
        }
        std::thread::sleep(Duration::from_millis(16));
    }
    session.stop();
}

fn main() -> eframe::Result<()> {
    init_tracing();
    let args = cli::Args::parse();

    let mut config = AppConfig::load_or_default(&args.config);
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(mode) = args.mode {
        config.simulation.mode = mode;
    }
    let settings = config.session_settings(clock_origin_sec());

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_for_ctrlc = stop_flag.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        stop_flag_for_ctrlc.store(true, Ordering::SeqCst);
    }) {
        warn!(%err, "failed to install Ctrl-C handler");
    }

    if args.nogui {
        run_headless(settings, args.duration, stop_flag);
        return Ok(());
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HUD Lens",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, &config, settings, stop_flag)))),
    )
}
