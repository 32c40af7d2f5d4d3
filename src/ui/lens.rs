//! Painting the two lenses and routing pointer input on placed widgets.

use egui::{Align2, Color32, FontId, Painter, Pos2, Sense, Stroke, StrokeKind, Ui, Vec2};
use tracing::debug;

use hudlens::core::geometry::{Percent, Point, Rect};
use hudlens::placement::{GridRules, MotionPhase, SurfaceId};
use hudlens::session::{RenderFrame, SimulationSession};

pub const LENS_FILL: Color32 = Color32::from_rgb(12, 18, 24);
pub const LENS_EDGE: Color32 = Color32::from_rgb(70, 110, 130);
pub const HUD_TEXT: Color32 = Color32::from_rgb(120, 235, 200);
pub const HUD_ACTIVE: Color32 = Color32::from_rgb(255, 210, 120);
const GRID_DOT: Color32 = Color32::from_rgba_premultiplied(60, 90, 100, 90);

pub fn to_point(p: Pos2) -> Point {
    Point::new(p.x, p.y)
}

pub fn to_pos(p: Point) -> Pos2 {
    Pos2::new(p.x, p.y)
}

pub fn to_rect(r: egui::Rect) -> Rect {
    Rect {
        min: to_point(r.min),
        max: to_point(r.max),
    }
}

fn draw_grid(painter: &Painter, rect: Rect, rules: &GridRules) {
    let g = rules.grid_size();
    if g <= 0.0 {
        return;
    }
    let lo = (rules.margin() / g).ceil() as i32;
    let hi = ((100.0 - rules.margin()) / g).floor() as i32;
    for i in lo..=hi {
        for j in lo..=hi {
            let p = rect.from_percent(Percent::new(i as f32 * g, j as f32 * g));
            painter.circle_filled(to_pos(p), 1.2, GRID_DOT);
        }
    }
}

/// One lens: records its on-screen rect with the session, paints widgets,
/// and starts reposition drags / removes widgets on right-click.
pub fn lens_view(
    ui: &mut Ui,
    session: &mut SimulationSession,
    surface: SurfaceId,
    frame: Option<&RenderFrame>,
    size: Vec2,
) {
    ui.vertical(|ui| {
        ui.strong(surface.label());
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let lens = to_rect(rect);
        session.set_surface_rect(surface, lens);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 14.0, LENS_FILL);
        painter.rect_stroke(rect, 14.0, Stroke::new(1.5, LENS_EDGE), StrokeKind::Inside);

        let Some(frame) = frame else {
            return;
        };
        if frame.ghost.as_ref().is_some_and(|g| g.target == Some(surface)) {
            draw_grid(&painter, lens, session.placement().rules());
        }

        for w in frame.widgets(surface) {
            let center = to_pos(lens.from_percent(w.position));
            let color = match w.phase {
                MotionPhase::Dragging => HUD_ACTIVE,
                _ => HUD_TEXT,
            };
            let text_rect = painter.text(
                center,
                Align2::CENTER_CENTER,
                &w.text,
                FontId::monospace(13.0),
                color,
            );
            let id = ui.id().with(("widget", surface.index(), w.id.0));
            let resp = ui.interact(text_rect.expand(4.0), id, Sense::click_and_drag());
            if resp.drag_started() {
                if let Some(p) = resp.interact_pointer_pos() {
                    if let Err(err) = session.begin_reposition(surface, w.id, to_point(p)) {
                        debug!(%err, "reposition not started");
                    }
                }
            }
            if resp.secondary_clicked() {
                session.remove_widget(surface, w.id);
            }
            resp.on_hover_text(format!("{} · right-click to remove", w.field));
        }
    });
}
