use egui::{
    Align2, Button, CentralPanel, Color32, ComboBox, CursorIcon, FontId, Id, Key, LayerId, Order,
    Sense, SidePanel, Slider, TopBottomPanel, Ui, Vec2,
};

use hudlens::placement::{Anchor, SurfaceBounds, SurfaceId};
use hudlens::session::{RenderFrame, SimulationSession};
use hudlens::synth::{OscillatorBank, Waveform};
use hudlens::telemetry::SimulationMode;
use hudlens::widgets::FieldKind;
use hudlens::widgets::catalog::{CATEGORY_ORDER, palette};
use hudlens::widgets::resolver::preview;

use crate::ui::lens::{HUD_ACTIVE, lens_view, to_point, to_pos};
use crate::ui::plots::time_plot;
use crate::ui::viewdata::{EditorState, OscillatorHistory, edited_patch};

const GHOST: Color32 = Color32::from_rgba_premultiplied(120, 200, 170, 140);

fn control_panel(ui: &mut Ui, session: &mut SimulationSession, view: &mut EditorState, frame: Option<&RenderFrame>) {
    ui.heading("HUD Lens");

    let mut mode = session.mode();
    ComboBox::from_label("Mode")
        .selected_text(mode.label())
        .show_ui(ui, |ui| {
            for m in SimulationMode::ALL {
                ui.selectable_value(&mut mode, m, m.label());
            }
        });
    session.set_mode(mode);

    if let Some(frame) = frame {
        ui.label(format!(
            "{}  ·  {:.0} s  ·  {}",
            frame.activity().label(),
            frame.frame.elapsed,
            frame.summary
        ));
    }

    ui.separator();
    ui.strong("Palette");
    ui.small("Drag an entry onto a lens.");
    ui.horizontal(|ui| {
        ui.label("Text");
        ui.text_edit_singleline(&mut view.payload);
    });
    let entries = palette();
    for category in CATEGORY_ORDER {
        egui::CollapsingHeader::new(category.label())
            .default_open(true)
            .show(ui, |ui| {
                for entry in entries.iter().filter(|e| e.category == category) {
                    ui.horizontal(|ui| {
                        let resp = ui.add(Button::new(entry.label).sense(Sense::click_and_drag()));
                        ui.weak(preview(entry.field_name));
                        if resp.drag_started() {
                            let payload = view.payload_for(FieldKind::from_name(entry.field_name));
                            let pointer = resp.interact_pointer_pos().map(to_point);
                            if let Some(pointer) = pointer {
                                view.status = session
                                    .begin_create(entry.field_name, payload, pointer)
                                    .err()
                                    .map(|e| e.to_string());
                            }
                        }
                    });
                }
            });
    }

    ui.separator();
    ui.strong("Quick add");
    ComboBox::from_label("Field")
        .selected_text(view.add_field.label())
        .show_ui(ui, |ui| {
            for kind in FieldKind::ALL {
                ui.selectable_value(&mut view.add_field, kind, kind.label());
            }
        });
    ui.horizontal(|ui| {
        for s in SurfaceId::ALL {
            ui.selectable_value(&mut view.add_surface, s, s.label());
        }
    });
    ComboBox::from_label("Anchor")
        .selected_text(view.add_anchor.label())
        .show_ui(ui, |ui| {
            for a in Anchor::ALL {
                ui.selectable_value(&mut view.add_anchor, a, a.label());
            }
        });
    ui.horizontal(|ui| {
        if ui.button("Add widget").clicked() {
            let payload = view.payload_for(Some(view.add_field));
            session.place_at_anchor(view.add_surface, view.add_field.name(), payload, view.add_anchor);
        }
        if ui.button("Clear all").clicked() {
            session.clear_surfaces();
        }
    });

    ui.separator();
    ui.checkbox(&mut view.show_oscillators, "Show oscillators");
    if let Some(status) = &view.status {
        ui.colored_label(Color32::LIGHT_RED, status);
    }
}

fn oscillator_panel(ui: &mut Ui, session: &mut SimulationSession, history: &OscillatorHistory) {
    ui.horizontal(|ui| {
        for (id, trace) in history.iter() {
            let samples: Vec<[f64; 2]> = trace.iter().copied().collect();
            ui.allocate_ui_with_layout(
                Vec2::new(240.0, 200.0),
                egui::Layout::top_down(egui::Align::LEFT),
                |ui| {
                    time_plot(ui, id, &samples, 0.0, 120.0);
                    oscillator_editor(ui, session, id);
                },
            );
        }
    });
}

fn oscillator_editor(ui: &mut Ui, session: &mut SimulationSession, id: &str) {
    let Some(before) = session.oscillators().get(id).map(|o| o.config().clone()) else {
        return;
    };
    let mut edited = before.clone();
    ui.horizontal(|ui| {
        ComboBox::from_id_salt(("waveform", id))
            .selected_text(edited.waveform.label())
            .show_ui(ui, |ui| {
                for (name, label) in OscillatorBank::kinds() {
                    if let Some(w) = Waveform::from_name(name) {
                        ui.selectable_value(&mut edited.waveform, w, label);
                    }
                }
            });
        ui.checkbox(&mut edited.enabled, "on");
    });
    ui.add(Slider::new(&mut edited.frequency, 0.01..=5.0).logarithmic(true).text("Hz"));
    ui.add(Slider::new(&mut edited.amplitude, 0.0..=100.0).text("amp"));
    if let Some(patch) = edited_patch(&before, &edited) {
        session.update_oscillator(id, &patch);
    }
}

fn paint_ghost(ctx: &egui::Context, session: &SimulationSession, frame: &RenderFrame) {
    let Some(ghost) = &frame.ghost else {
        return;
    };
    let painter = ctx.layer_painter(LayerId::new(Order::Tooltip, Id::new("drag_ghost")));
    let lens = ghost.target.and_then(|s| session.bounds().surface_rect(s));
    if ghost.is_create {
        let text = preview(&ghost.field);
        let at = match (lens, ghost.position) {
            (Some(rect), Some(p)) => to_pos(rect.from_percent(p)),
            _ => to_pos(ghost.pointer),
        };
        painter.text(at, Align2::CENTER_CENTER, text, FontId::monospace(13.0), GHOST);
    } else if let (Some(rect), Some(p)) = (lens, ghost.snapped) {
        painter.circle_stroke(to_pos(rect.from_percent(p)), 5.0, egui::Stroke::new(1.0, HUD_ACTIVE));
    }
    ctx.set_cursor_icon(CursorIcon::Grabbing);
}

/// Route the active gesture: move, release, or cancel on Escape.
fn handle_pointer(ctx: &egui::Context, session: &mut SimulationSession) {
    if !session.is_dragging() {
        return;
    }
    let (pos, released, escape) = ctx.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.any_released(),
            i.key_pressed(Key::Escape),
        )
    });
    if escape {
        session.cancel_drag();
        return;
    }
    match (pos, released) {
        (Some(p), true) => {
            session.release(to_point(p));
        }
        (Some(p), false) => {
            session.pointer_moved(to_point(p));
        }
        (None, true) => {
            session.cancel_drag();
        }
        (None, false) => {}
    }
}

/// === Main window ===
pub fn main_window(
    ctx: &egui::Context,
    session: &mut SimulationSession,
    view: &mut EditorState,
    frame: Option<&RenderFrame>,
    history: &OscillatorHistory,
) {
    SidePanel::left("controls")
        .resizable(false)
        .min_width(260.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| control_panel(ui, session, view, frame));
        });

    if view.show_oscillators {
        TopBottomPanel::bottom("oscillators").show(ctx, |ui| oscillator_panel(ui, session, history));
    }

    CentralPanel::default().show(ctx, |ui| {
        let size = Vec2::new(view.lens_width, view.lens_width * 0.7);
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            for surface in SurfaceId::ALL {
                lens_view(ui, session, surface, frame, size);
                ui.add_space(24.0);
            }
        });
    });

    if let Some(frame) = frame {
        paint_ghost(ctx, session, frame);
    }
    handle_pointer(ctx, session);
}
