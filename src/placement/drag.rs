//! The single active pointer gesture, either creating a widget from the
//! palette or moving one that is already placed.

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::geometry::{Percent, Point};
use crate::placement::bounds::SurfaceBounds;
use crate::placement::engine::PlacementEngine;
use crate::placement::surface::{SurfaceId, WidgetId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DragError {
    #[error("a drag session is already active")]
    SessionActive,
    #[error("no widget {id} on {surface:?}")]
    UnknownWidget { surface: SurfaceId, id: WidgetId },
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragKind {
    Create {
        field: String,
        payload: Option<String>,
    },
    Reposition {
        surface: SurfaceId,
        widget: WidgetId,
        origin_position: Percent,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub kind: DragKind,
    pub field: String,
    pub pointer_origin: Point,
    pub current_pointer: Point,
    pub hovered: Option<SurfaceId>,
    /// Grid-snapped landing spot while hovering a surface.
    pub proposed: Option<Percent>,
    /// Unsnapped widget position during a reposition.
    pub live: Option<Percent>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropOutcome {
    Created { surface: SurfaceId, widget: WidgetId },
    Moved { surface: SurfaceId, widget: WidgetId, position: Percent },
    Cancelled,
}

/// What the renderer draws for the gesture in progress.
#[derive(Clone, Debug, PartialEq)]
pub struct Ghost {
    pub field: String,
    pub is_create: bool,
    pub pointer: Point,
    /// Surface under the pointer.
    pub surface: Option<SurfaceId>,
    /// Surface that `position` and `snapped` refer to. A reposition always
    /// lands on its source surface.
    pub target: Option<SurfaceId>,
    /// Where the dragged item is drawn right now.
    pub position: Option<Percent>,
    /// Where it would land if released now.
    pub snapped: Option<Percent>,
}

#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    fn ensure_idle(&self) -> Result<(), DragError> {
        if self.session.is_some() {
            warn!("drag start rejected: session already active");
            return Err(DragError::SessionActive);
        }
        Ok(())
    }

    pub fn begin_create(
        &mut self,
        engine: &mut PlacementEngine,
        field: &str,
        payload: Option<String>,
        pointer: Point,
    ) -> Result<(), DragError> {
        self.ensure_idle()?;
        engine.begin_create(field, payload.clone());
        self.session = Some(DragSession {
            kind: DragKind::Create {
                field: field.to_string(),
                payload,
            },
            field: field.to_string(),
            pointer_origin: pointer,
            current_pointer: pointer,
            hovered: None,
            proposed: None,
            live: None,
        });
        Ok(())
    }

    pub fn begin_reposition(
        &mut self,
        engine: &mut PlacementEngine,
        surface: SurfaceId,
        widget: WidgetId,
        pointer: Point,
    ) -> Result<(), DragError> {
        self.ensure_idle()?;
        let field = engine
            .widget(surface, widget)
            .map(|w| w.field().to_string())
            .ok_or(DragError::UnknownWidget { surface, id: widget })?;
        let origin = engine
            .begin_reposition(surface, widget, pointer)
            .ok_or(DragError::UnknownWidget { surface, id: widget })?;
        self.session = Some(DragSession {
            kind: DragKind::Reposition {
                surface,
                widget,
                origin_position: origin,
            },
            field,
            pointer_origin: pointer,
            current_pointer: pointer,
            hovered: Some(surface),
            proposed: Some(engine.rules().snap(origin)),
            live: Some(origin),
        });
        Ok(())
    }

    /// Track the pointer. Returns the updated ghost, or `None` when idle.
    pub fn pointer_moved(
        &mut self,
        engine: &mut PlacementEngine,
        pointer: Point,
        bounds: &dyn SurfaceBounds,
    ) -> Option<Ghost> {
        let session = self.session.as_mut()?;
        session.current_pointer = pointer;
        match session.kind {
            DragKind::Create { .. } => {
                let hover = engine.update_create_hover(pointer, bounds);
                session.hovered = hover.map(|h| h.surface);
                session.proposed = hover.map(|h| h.proposed);
            }
            DragKind::Reposition { surface, widget, .. } => {
                let live = engine.update_reposition(surface, widget, pointer, bounds);
                session.hovered = engine.hover_at(pointer, bounds).map(|h| h.surface);
                session.live = live;
                session.proposed = live.map(|p| engine.rules().snap(p));
            }
        }
        self.ghost()
    }

    /// Finish the gesture at `pointer`.
    pub fn release(
        &mut self,
        engine: &mut PlacementEngine,
        pointer: Point,
        bounds: &dyn SurfaceBounds,
        now: f64,
    ) -> Option<DropOutcome> {
        let session = self.session.take()?;
        let outcome = match session.kind {
            DragKind::Create { .. } => match engine.commit_create(pointer, bounds, now) {
                Some((surface, widget)) => DropOutcome::Created { surface, widget },
                None => DropOutcome::Cancelled,
            },
            DragKind::Reposition { surface, widget, .. } => {
                match engine.commit_reposition(surface, widget, pointer, bounds, now) {
                    Some(position) => DropOutcome::Moved {
                        surface,
                        widget,
                        position,
                    },
                    // Widget vanished mid-drag (removed or cleared).
                    None => DropOutcome::Cancelled,
                }
            }
        };
        debug!(?outcome, "drag released");
        Some(outcome)
    }

    /// Interrupted gesture: a reposition still lands at the last known
    /// pointer, a create is aborted.
    pub fn cancel(
        &mut self,
        engine: &mut PlacementEngine,
        bounds: &dyn SurfaceBounds,
        now: f64,
    ) -> Option<DropOutcome> {
        let session = self.session.as_ref()?;
        if let DragKind::Reposition { .. } = session.kind {
            let pointer = session.current_pointer;
            return self.release(engine, pointer, bounds, now);
        }
        self.session = None;
        engine.cancel_create();
        debug!("drag cancelled");
        Some(DropOutcome::Cancelled)
    }

    pub fn ghost(&self) -> Option<Ghost> {
        let s = self.session.as_ref()?;
        let (is_create, target) = match s.kind {
            DragKind::Create { .. } => (true, s.hovered),
            DragKind::Reposition { surface, .. } => (false, Some(surface)),
        };
        Some(Ghost {
            field: s.field.clone(),
            is_create,
            pointer: s.current_pointer,
            surface: s.hovered,
            target,
            position: if is_create { s.proposed } else { s.live },
            snapped: s.proposed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Rect;
    use crate::placement::bounds::LensBounds;

    fn lenses() -> LensBounds {
        LensBounds::new(
            Rect::from_min_size(Point::new(0.0, 0.0), 256.0, 128.0),
            Rect::from_min_size(Point::new(300.0, 0.0), 256.0, 128.0),
        )
    }

    #[test]
    fn second_start_is_rejected() {
        let mut engine = PlacementEngine::default();
        let mut drag = DragController::new();
        drag.begin_create(&mut engine, "steps", None, Point::new(0.0, 0.0)).unwrap();
        let err = drag
            .begin_create(&mut engine, "time", None, Point::new(0.0, 0.0))
            .unwrap_err();
        assert_eq!(err, DragError::SessionActive);
        assert_eq!(drag.session().unwrap().field, "steps");
    }

    #[test]
    fn unknown_widget_is_reported() {
        let mut engine = PlacementEngine::default();
        let mut drag = DragController::new();
        let err = drag
            .begin_reposition(&mut engine, SurfaceId::Left, WidgetId(9), Point::new(0.0, 0.0))
            .unwrap_err();
        assert_eq!(
            err,
            DragError::UnknownWidget {
                surface: SurfaceId::Left,
                id: WidgetId(9)
            }
        );
        assert!(!drag.is_active());
    }

    #[test]
    fn ghost_follows_hover() {
        let mut engine = PlacementEngine::default();
        let mut drag = DragController::new();
        let bounds = lenses();
        drag.begin_create(&mut engine, "bearing", None, Point::new(-50.0, 0.0)).unwrap();
        let g = drag.pointer_moved(&mut engine, Point::new(-10.0, 10.0), &bounds).unwrap();
        assert_eq!(g.surface, None);
        let g = drag.pointer_moved(&mut engine, Point::new(428.0, 64.0), &bounds).unwrap();
        assert_eq!(g.surface, Some(SurfaceId::Right));
        assert_eq!(g.position, Some(Percent::new(50.0, 50.0)));
        assert_eq!(engine.counts(), (0, 0));
    }

    #[test]
    fn cancel_aborts_create_but_commits_reposition() {
        let mut engine = PlacementEngine::default();
        let mut drag = DragController::new();
        let bounds = lenses();

        drag.begin_create(&mut engine, "steps", None, Point::new(0.0, 0.0)).unwrap();
        drag.pointer_moved(&mut engine, Point::new(128.0, 64.0), &bounds);
        assert_eq!(drag.cancel(&mut engine, &bounds, 0.0), Some(DropOutcome::Cancelled));
        assert_eq!(engine.counts(), (0, 0));

        let id = engine.place(SurfaceId::Left, "steps", None, Percent::new(45.0, 35.0));
        drag.begin_reposition(&mut engine, SurfaceId::Left, id, Point::new(100.0, 40.0)).unwrap();
        drag.pointer_moved(&mut engine, Point::new(116.0, 48.0), &bounds);
        let outcome = drag.cancel(&mut engine, &bounds, 0.0).unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Moved {
                surface: SurfaceId::Left,
                widget: id,
                position: Percent::new(50.0, 40.0)
            }
        );
        assert!(!drag.is_active());
        assert_eq!(drag.release(&mut engine, Point::new(0.0, 0.0), &bounds, 0.0), None);
    }

    #[test]
    fn reposition_reports_hover_but_lands_on_its_source() {
        let mut engine = PlacementEngine::default();
        let mut drag = DragController::new();
        let bounds = lenses();
        let id = engine.place(SurfaceId::Left, "time", None, Percent::new(50.0, 50.0));
        drag.begin_reposition(&mut engine, SurfaceId::Left, id, Point::new(128.0, 64.0)).unwrap();
        assert_eq!(drag.session().unwrap().hovered, Some(SurfaceId::Left));

        let g = drag.pointer_moved(&mut engine, Point::new(428.0, 64.0), &bounds).unwrap();
        assert_eq!(g.surface, Some(SurfaceId::Right));
        assert_eq!(g.target, Some(SurfaceId::Left));
        let g = drag.pointer_moved(&mut engine, Point::new(280.0, 64.0), &bounds).unwrap();
        assert_eq!(g.surface, None);

        let outcome = drag.release(&mut engine, Point::new(280.0, 64.0), &bounds, 0.0).unwrap();
        assert!(matches!(
            outcome,
            DropOutcome::Moved { surface: SurfaceId::Left, widget, .. } if widget == id
        ));
        assert_eq!(engine.counts(), (1, 0));
    }
}
