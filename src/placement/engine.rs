use tracing::{debug, trace};

use crate::core::geometry::{Percent, Point};
use crate::placement::bounds::SurfaceBounds;
use crate::placement::grid::{Anchor, GridRules};
use crate::placement::settle::{DEFAULT_SETTLE_SECS, SettleAnimation};
use crate::placement::surface::{Motion, Surface, SurfaceId, Widget, WidgetId};

/// The surface under the pointer and where a drop there would land.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hover {
    pub surface: SurfaceId,
    pub proposed: Percent,
}

#[derive(Clone, Debug)]
struct PendingCreate {
    field: String,
    payload: Option<String>,
    hover: Option<Hover>,
}

/// Owns both surfaces and every widget position change.
pub struct PlacementEngine {
    rules: GridRules,
    settle_secs: f64,
    surfaces: [Surface; 2],
    next_id: u64,
    pending: Option<PendingCreate>,
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new(GridRules::default(), DEFAULT_SETTLE_SECS)
    }
}

impl PlacementEngine {
    pub fn new(rules: GridRules, settle_secs: f64) -> Self {
        Self {
            rules,
            settle_secs: if settle_secs.is_finite() { settle_secs.max(0.0) } else { DEFAULT_SETTLE_SECS },
            surfaces: [Surface::new(SurfaceId::Left), Surface::new(SurfaceId::Right)],
            next_id: 1,
            pending: None,
        }
    }

    pub fn rules(&self) -> &GridRules {
        &self.rules
    }

    pub fn surface(&self, id: SurfaceId) -> &Surface {
        &self.surfaces[id.index()]
    }

    pub fn widget(&self, surface: SurfaceId, id: WidgetId) -> Option<&Widget> {
        self.surface(surface).get(id)
    }

    pub fn counts(&self) -> (usize, usize) {
        (self.surfaces[0].len(), self.surfaces[1].len())
    }

    pub fn summary(&self) -> String {
        let (l, r) = self.counts();
        format!("L: {l} | R: {r}")
    }

    pub fn hover_at(&self, pointer: Point, bounds: &dyn SurfaceBounds) -> Option<Hover> {
        let surface = bounds.hit_test(pointer)?;
        let rect = bounds.surface_rect(surface)?;
        Some(Hover {
            surface,
            proposed: self.rules.drop_position(pointer, &rect),
        })
    }

    fn alloc_id(&mut self) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        id
    }

    fn widget_mut(&mut self, surface: SurfaceId, id: WidgetId) -> Option<&mut Widget> {
        self.surfaces[surface.index()].get_mut(id)
    }

    // ---- reposition ----

    /// Start dragging a placed widget. A widget still settling jumps to its
    /// target first. Returns the drag origin.
    pub fn begin_reposition(&mut self, surface: SurfaceId, id: WidgetId, pointer: Point) -> Option<Percent> {
        let widget = self.widget_mut(surface, id)?;
        widget.finish_settle();
        let origin = widget.position();
        widget.set_motion(Motion::Dragging {
            pointer_start: pointer,
            origin,
            live: origin,
        });
        debug!(surface = ?surface, widget = %id, x = origin.x, y = origin.y, "reposition started");
        Some(origin)
    }

    fn live_for(&self, surface: SurfaceId, id: WidgetId, pointer: Point, bounds: &dyn SurfaceBounds) -> Option<Percent> {
        let Motion::Dragging { pointer_start, origin, .. } = *self.widget(surface, id)?.motion() else {
            return None;
        };
        let delta = pointer.delta_from(pointer_start);
        Some(match bounds.surface_rect(surface) {
            Some(rect) => self.rules.live_position(origin, delta, &rect),
            None => self.rules.clamp(origin),
        })
    }

    /// Live, unsnapped preview. `None` if the widget is not being dragged.
    pub fn update_reposition(
        &mut self,
        surface: SurfaceId,
        id: WidgetId,
        pointer: Point,
        bounds: &dyn SurfaceBounds,
    ) -> Option<Percent> {
        let live = self.live_for(surface, id, pointer, bounds)?;
        let widget = self.widget_mut(surface, id)?;
        if let Motion::Dragging { pointer_start, origin, .. } = *widget.motion() {
            widget.set_motion(Motion::Dragging { pointer_start, origin, live });
        }
        trace!(widget = %id, x = live.x, y = live.y, "reposition moved");
        Some(live)
    }

    /// Snap the final position and start settling toward it.
    pub fn commit_reposition(
        &mut self,
        surface: SurfaceId,
        id: WidgetId,
        pointer: Point,
        bounds: &dyn SurfaceBounds,
        now: f64,
    ) -> Option<Percent> {
        let live = self.live_for(surface, id, pointer, bounds)?;
        let snapped = self.rules.snap(live);
        let anim = SettleAnimation::new(live, snapped, now, self.settle_secs);
        self.widget_mut(surface, id)?.set_motion(Motion::Settling(anim));
        debug!(surface = ?surface, widget = %id, x = snapped.x, y = snapped.y, "reposition committed");
        Some(snapped)
    }

    // ---- create ----

    /// Nothing is materialized until `commit_create`.
    pub fn begin_create(&mut self, field: &str, payload: Option<String>) {
        debug!(field, "create started");
        self.pending = Some(PendingCreate {
            field: field.to_string(),
            payload,
            hover: None,
        });
    }

    pub fn is_creating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn update_create_hover(&mut self, pointer: Point, bounds: &dyn SurfaceBounds) -> Option<Hover> {
        let hover = self.hover_at(pointer, bounds);
        self.pending.as_mut()?.hover = hover;
        hover
    }

    /// Materialize the pending widget where the pointer is. Released over
    /// no surface, the create is dropped silently.
    pub fn commit_create(
        &mut self,
        pointer: Point,
        bounds: &dyn SurfaceBounds,
        now: f64,
    ) -> Option<(SurfaceId, WidgetId)> {
        let pending = self.pending.take()?;
        let Some(hover) = self.hover_at(pointer, bounds) else {
            debug!(field = %pending.field, "create dropped outside any lens");
            return None;
        };
        let id = self.alloc_id();
        let mut widget = Widget::new(id, &pending.field, hover.proposed, pending.payload);
        if let Some(rect) = bounds.surface_rect(hover.surface) {
            let released = self.rules.clamp(rect.to_percent(pointer));
            if released != hover.proposed && self.settle_secs > 0.0 {
                // Provisional start; the settle carries it onto the grid.
                widget.set_motion(Motion::Settling(SettleAnimation::new(
                    released,
                    hover.proposed,
                    now,
                    self.settle_secs,
                )));
            }
        }
        self.surfaces[hover.surface.index()].push(widget);
        debug!(
            surface = ?hover.surface,
            widget = %id,
            field = %pending.field,
            x = hover.proposed.x,
            y = hover.proposed.y,
            "widget created"
        );
        Some((hover.surface, id))
    }

    pub fn cancel_create(&mut self) {
        if let Some(p) = self.pending.take() {
            debug!(field = %p.field, "create cancelled");
        }
    }

    // ---- direct edits ----

    /// Place without dragging; the position goes through the same snap rules.
    pub fn place(&mut self, surface: SurfaceId, field: &str, payload: Option<String>, at: Percent) -> WidgetId {
        let id = self.alloc_id();
        let pos = self.rules.snap(at);
        self.surfaces[surface.index()].push(Widget::new(id, field, pos, payload));
        debug!(surface = ?surface, widget = %id, field, x = pos.x, y = pos.y, "widget placed");
        id
    }

    pub fn place_at_anchor(
        &mut self,
        surface: SurfaceId,
        field: &str,
        payload: Option<String>,
        anchor: Anchor,
    ) -> WidgetId {
        self.place(surface, field, payload, anchor.percent())
    }

    pub fn remove_widget(&mut self, surface: SurfaceId, id: WidgetId) -> Option<Widget> {
        let removed = self.surfaces[surface.index()].remove(id);
        if removed.is_some() {
            debug!(surface = ?surface, widget = %id, "widget removed");
        }
        removed
    }

    pub fn clear_surfaces(&mut self) {
        for s in &mut self.surfaces {
            s.clear();
        }
        debug!("surfaces cleared");
    }

    /// Complete any settle animations that have run their course.
    pub fn advance(&mut self, now: f64) -> usize {
        let mut finished = 0;
        for widget in self.surfaces.iter_mut().flat_map(Surface::iter_mut) {
            if let Motion::Settling(anim) = *widget.motion() {
                if anim.is_finished(now) && widget.finish_settle() {
                    finished += 1;
                }
            }
        }
        finished
    }

    /// Teardown: land every in-flight settle on its target.
    pub fn finish_all_settling(&mut self) -> usize {
        self.surfaces
            .iter_mut()
            .flat_map(Surface::iter_mut)
            .map(Widget::finish_settle)
            .filter(|done| *done)
            .count()
    }
}
