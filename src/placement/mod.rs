//! Widget placement on the two lens surfaces: grid rules, settle
//! animation, pointer-driven create/reposition, and the single drag session.

pub mod bounds;
pub mod drag;
pub mod engine;
pub mod grid;
pub mod settle;
pub mod surface;

pub use bounds::{LensBounds, SurfaceBounds};
pub use drag::{DragController, DragError, DragKind, DragSession, DropOutcome, Ghost};
pub use engine::{Hover, PlacementEngine};
pub use grid::{Anchor, GridRules};
pub use surface::{MotionPhase, Surface, SurfaceId, Widget, WidgetId};
