//! Where the surfaces currently are on screen.

use crate::core::geometry::{Point, Rect};
use crate::placement::surface::SurfaceId;

/// Read-only view of each surface's on-screen rectangle, queried during
/// pointer handling. The renderer owns the real layout.
pub trait SurfaceBounds {
    fn surface_rect(&self, surface: SurfaceId) -> Option<Rect>;

    /// The one surface under `pointer`, if any. Left wins where rectangles overlap.
    fn hit_test(&self, pointer: Point) -> Option<SurfaceId> {
        SurfaceId::ALL.into_iter().find(|id| {
            self.surface_rect(*id)
                .is_some_and(|r| !r.is_degenerate() && r.contains(pointer))
        })
    }
}

/// Rectangles recorded by the renderer each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LensBounds {
    rects: [Option<Rect>; 2],
}

impl LensBounds {
    pub fn new(left: Rect, right: Rect) -> Self {
        Self {
            rects: [Some(left), Some(right)],
        }
    }

    pub fn set(&mut self, surface: SurfaceId, rect: Rect) {
        self.rects[surface.index()] = Some(rect);
    }
}

impl SurfaceBounds for LensBounds {
    fn surface_rect(&self, surface: SurfaceId) -> Option<Rect> {
        self.rects[surface.index()]
    }
}
