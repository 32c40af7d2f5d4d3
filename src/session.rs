//! One editing session: clock, simulator, oscillators, and both lenses.
//!
//! Everything the editor mutates lives here and is touched from a single
//! thread. Each `tick` recomputes telemetry first and only then resolves
//! widget text, so every widget in a frame reads the same snapshot.

use tracing::{debug, info};

use crate::core::frame_loop::{FrameLoop, FrameTime};
use crate::core::geometry::{Percent, Point, Rect};
use crate::placement::bounds::{LensBounds, SurfaceBounds};
use crate::placement::drag::{DragController, DragError, DropOutcome, Ghost};
use crate::placement::engine::PlacementEngine;
use crate::placement::grid::{Anchor, GridRules};
use crate::placement::settle::DEFAULT_SETTLE_SECS;
use crate::placement::surface::{MotionPhase, SurfaceId, WidgetId};
use crate::synth::bank::{OscillatorBank, OscillatorPreset};
use crate::synth::oscillator::OscillatorPatch;
use crate::telemetry::activity::ActivityState;
use crate::telemetry::engine::{TelemetryEngine, TelemetrySettings};
use crate::telemetry::mode::SimulationMode;
use crate::telemetry::snapshot::TelemetrySnapshot;
use crate::widgets::resolver::resolve;

#[derive(Clone, Debug, PartialEq)]
pub struct SessionSettings {
    pub telemetry: TelemetrySettings,
    pub rules: GridRules,
    pub settle_secs: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            telemetry: TelemetrySettings::default(),
            rules: GridRules::default(),
            settle_secs: DEFAULT_SETTLE_SECS,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedWidget {
    pub id: WidgetId,
    pub field: String,
    pub text: String,
    pub position: Percent,
    pub phase: MotionPhase,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct RenderFrame {
    pub frame: FrameTime,
    pub snapshot: TelemetrySnapshot,
    pub surfaces: [Vec<RenderedWidget>; 2],
    pub ghost: Option<Ghost>,
    pub summary: String,
}

impl RenderFrame {
    pub fn widgets(&self, surface: SurfaceId) -> &[RenderedWidget] {
        &self.surfaces[surface.index()]
    }

    pub fn activity(&self) -> ActivityState {
        self.snapshot.activity()
    }
}

pub struct SimulationSession {
    frame_loop: FrameLoop,
    telemetry: TelemetryEngine,
    bank: OscillatorBank,
    placement: PlacementEngine,
    drag: DragController,
    bounds: LensBounds,
    snapshot: Option<TelemetrySnapshot>,
    last_now: f64,
}

impl SimulationSession {
    pub fn new(settings: SessionSettings) -> Self {
        let bank = OscillatorBank::new(settings.telemetry.seed);
        Self {
            frame_loop: FrameLoop::new(),
            telemetry: TelemetryEngine::new(settings.telemetry),
            bank,
            placement: PlacementEngine::new(settings.rules, settings.settle_secs),
            drag: DragController::new(),
            bounds: LensBounds::default(),
            snapshot: None,
            last_now: 0.0,
        }
    }

    /// Build noise channels and register the preset oscillators, then
    /// begin accepting ticks.
    pub fn start(&mut self, now: f64) {
        if self.frame_loop.is_running() {
            return;
        }
        self.telemetry.initialize();
        self.telemetry.resume();
        for preset in OscillatorPreset::ALL {
            if !self.bank.contains(preset.name()) {
                self.bank.create_preset(preset, now);
            }
        }
        self.frame_loop.start(now);
        self.last_now = now;
        info!(
            seed = self.telemetry.settings().seed,
            mode = %self.telemetry.mode(),
            "session started"
        );
    }

    /// Stop ticking. A gesture in flight is cancelled and running settle
    /// animations land on their targets.
    pub fn stop(&mut self) {
        if !self.frame_loop.is_running() {
            return;
        }
        let now = self.last_now;
        self.drag.cancel(&mut self.placement, &self.bounds, now);
        let landed = self.placement.finish_all_settling();
        self.frame_loop.stop();
        info!(landed, summary = %self.placement.summary(), "session stopped");
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    pub fn tick(&mut self, now: f64) -> Option<RenderFrame> {
        let frame = self.frame_loop.tick(now)?;
        self.last_now = frame.now;
        self.bank.tick(frame.now);
        if let Some(snapshot) = self.telemetry.tick(&frame, &self.bank) {
            self.snapshot = Some(snapshot);
        }
        self.placement.advance(frame.now);

        let snapshot = self.snapshot.clone().unwrap_or_default();
        let surfaces = SurfaceId::ALL.map(|id| {
            self.placement
                .surface(id)
                .iter()
                .map(|w| RenderedWidget {
                    id: w.id(),
                    field: w.field().to_string(),
                    text: resolve(w.field(), &snapshot, w.payload()),
                    position: w.display_position(frame.now),
                    phase: w.phase(),
                })
                .collect()
        });
        Some(RenderFrame {
            frame,
            snapshot,
            surfaces,
            ghost: self.drag.ghost(),
            summary: self.placement.summary(),
        })
    }

    // ---- renderer layout ----

    pub fn set_surface_rect(&mut self, surface: SurfaceId, rect: Rect) {
        self.bounds.set(surface, rect);
    }

    pub fn bounds(&self) -> &LensBounds {
        &self.bounds
    }

    pub fn hit_test(&self, pointer: Point) -> Option<SurfaceId> {
        self.bounds.hit_test(pointer)
    }

    // ---- pointer gestures ----

    pub fn begin_create(&mut self, field: &str, payload: Option<String>, pointer: Point) -> Result<(), DragError> {
        self.drag.begin_create(&mut self.placement, field, payload, pointer)
    }

    pub fn begin_reposition(&mut self, surface: SurfaceId, widget: WidgetId, pointer: Point) -> Result<(), DragError> {
        self.drag
            .begin_reposition(&mut self.placement, surface, widget, pointer)
    }

    pub fn pointer_moved(&mut self, pointer: Point) -> Option<Ghost> {
        self.drag.pointer_moved(&mut self.placement, pointer, &self.bounds)
    }

    pub fn release(&mut self, pointer: Point) -> Option<DropOutcome> {
        self.drag
            .release(&mut self.placement, pointer, &self.bounds, self.last_now)
    }

    pub fn cancel_drag(&mut self) -> Option<DropOutcome> {
        self.drag
            .cancel(&mut self.placement, &self.bounds, self.last_now)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    // ---- direct edits ----

    pub fn place_at_anchor(
        &mut self,
        surface: SurfaceId,
        field: &str,
        payload: Option<String>,
        anchor: Anchor,
    ) -> WidgetId {
        self.placement.place_at_anchor(surface, field, payload, anchor)
    }

    pub fn remove_widget(&mut self, surface: SurfaceId, widget: WidgetId) -> bool {
        self.placement.remove_widget(surface, widget).is_some()
    }

    pub fn clear_surfaces(&mut self) {
        self.placement.clear_surfaces();
    }

    pub fn set_mode(&mut self, mode: SimulationMode) {
        self.telemetry.set_mode(mode);
    }

    pub fn mode(&self) -> SimulationMode {
        self.telemetry.mode()
    }

    pub fn update_oscillator(&mut self, id: &str, patch: &OscillatorPatch) -> bool {
        let known = self.bank.update(id, patch);
        debug!(id, known, "oscillator updated");
        known
    }

    // ---- read access ----

    pub fn placement(&self) -> &PlacementEngine {
        &self.placement
    }

    pub fn oscillators(&self) -> &OscillatorBank {
        &self.bank
    }

    pub fn telemetry(&self) -> &TelemetryEngine {
        &self.telemetry
    }

    /// Latest complete snapshot, if any tick has produced one.
    pub fn snapshot(&self) -> Option<&TelemetrySnapshot> {
        self.snapshot.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SimulationSession {
        let mut s = SimulationSession::new(SessionSettings::default());
        s.set_surface_rect(SurfaceId::Left, Rect::from_min_size(Point::new(0.0, 0.0), 256.0, 128.0));
        s.set_surface_rect(SurfaceId::Right, Rect::from_min_size(Point::new(300.0, 0.0), 256.0, 128.0));
        s
    }

    #[test]
    fn no_frames_before_start_or_after_stop() {
        let mut s = session();
        assert!(s.tick(0.0).is_none());
        s.start(0.0);
        assert!(s.tick(0.016).is_some());
        s.stop();
        assert!(s.tick(0.032).is_none());
    }

    #[test]
    fn start_registers_presets() {
        let mut s = session();
        s.start(0.0);
        assert_eq!(s.oscillators().len(), OscillatorPreset::ALL.len());
        assert!(s.telemetry().is_initialized());
    }

    #[test]
    fn every_widget_reads_the_frame_snapshot() {
        let mut s = session();
        s.start(0.0);
        s.place_at_anchor(SurfaceId::Left, "steps", None, Anchor::TopLeft);
        s.place_at_anchor(SurfaceId::Right, "steps", None, Anchor::Center);
        s.place_at_anchor(SurfaceId::Right, "label", Some("HELLO".into()), Anchor::BottomLeft);
        for i in 1..200 {
            let frame = s.tick(i as f64 * 0.05).unwrap();
            let left = &frame.widgets(SurfaceId::Left)[0].text;
            let right = &frame.widgets(SurfaceId::Right)[0].text;
            assert_eq!(left, right);
            assert_eq!(frame.widgets(SurfaceId::Right)[1].text, "HELLO");
            assert_eq!(frame.summary, "L: 1 | R: 2");
        }
    }

    #[test]
    fn stop_cancels_drag_and_lands_settles() {
        let mut s = session();
        s.start(0.0);
        let id = s.place_at_anchor(SurfaceId::Left, "time", None, Anchor::Center);
        s.tick(1.0);
        s.begin_reposition(SurfaceId::Left, id, Point::new(128.0, 64.0)).unwrap();
        s.pointer_moved(Point::new(144.0, 72.0));
        s.stop();
        assert!(!s.is_dragging());
        let w = s.placement().widget(SurfaceId::Left, id).unwrap();
        assert_eq!(w.phase(), MotionPhase::Settled);
        assert_eq!(w.position(), Percent::new(55.0, 55.0));
    }
}
