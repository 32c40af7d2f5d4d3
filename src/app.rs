use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

use tracing::info;

use hudlens::config::AppConfig;
use hudlens::session::{RenderFrame, SessionSettings, SimulationSession};

use crate::ui::viewdata::{EditorState, OscillatorHistory};

const HISTORY_SEC: f64 = 10.0;

pub struct App {
    session: SimulationSession,
    started: Instant,
    last_frame: Option<RenderFrame>,
    history: OscillatorHistory,
    view: EditorState,
    exiting: Arc<AtomicBool>,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        settings: SessionSettings,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        cc.egui_ctx.set_pixels_per_point(config.ui.pixels_per_point);

        let mut session = SimulationSession::new(settings);
        session.start(0.0);

        Self {
            session,
            started: Instant::now(),
            last_frame: None,
            history: OscillatorHistory::new(HISTORY_SEC),
            view: EditorState::new(config.ui.lens_width, config.ui.show_oscillators),
            exiting: stop_flag,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.exiting.load(Ordering::SeqCst) {
            info!("SIGINT received: closing window");
            self.session.stop();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let now = self.started.elapsed().as_secs_f64();
        if let Some(frame) = self.session.tick(now) {
            self.history.push(frame.frame.now, self.session.oscillators());
            self.last_frame = Some(frame);
        }
        crate::ui::windows::main_window(
            ctx,
            &mut self.session,
            &mut self.view,
            self.last_frame.as_ref(),
            &self.history,
        );
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.session.stop();
    }
}
