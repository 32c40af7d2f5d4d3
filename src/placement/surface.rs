//! The two lenses and the widgets placed on them.

use serde::{Deserialize, Serialize};

use crate::core::geometry::{Percent, Point};
use crate::placement::settle::SettleAnimation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceId {
    Left,
    Right,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 2] = [SurfaceId::Left, SurfaceId::Right];

    pub fn label(self) -> &'static str {
        match self {
            SurfaceId::Left => "Left Lens",
            SurfaceId::Right => "Right Lens",
        }
    }

    pub fn index(self) -> usize {
        match self {
            SurfaceId::Left => 0,
            SurfaceId::Right => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "w{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    Settled,
    Dragging {
        pointer_start: Point,
        origin: Percent,
        live: Percent,
    },
    Settling(SettleAnimation),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionPhase {
    Settled,
    Dragging,
    Settling,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Widget {
    id: WidgetId,
    field: String,
    position: Percent,
    payload: Option<String>,
    motion: Motion,
}

impl Widget {
    pub(crate) fn new(id: WidgetId, field: &str, position: Percent, payload: Option<String>) -> Self {
        Self {
            id,
            field: field.to_string(),
            position,
            payload,
            motion: Motion::Settled,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Committed position. While settling this is still the pre-drag value.
    pub fn position(&self) -> Percent {
        self.position
    }

    /// Where the widget will rest once any running settle completes.
    pub fn resting_position(&self) -> Percent {
        match self.motion {
            Motion::Settling(anim) => anim.target(),
            _ => self.position,
        }
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn phase(&self) -> MotionPhase {
        match self.motion {
            Motion::Settled => MotionPhase::Settled,
            Motion::Dragging { .. } => MotionPhase::Dragging,
            Motion::Settling(_) => MotionPhase::Settling,
        }
    }

    /// Position to draw this frame.
    pub fn display_position(&self, now: f64) -> Percent {
        match self.motion {
            Motion::Settled => self.position,
            Motion::Dragging { live, .. } => live,
            Motion::Settling(anim) => anim.sample(now),
        }
    }

    pub(crate) fn set_motion(&mut self, motion: Motion) {
        self.motion = motion;
    }

    /// Jump to the settle target and become `Settled`. No-op otherwise.
    pub(crate) fn finish_settle(&mut self) -> bool {
        if let Motion::Settling(anim) = self.motion {
            self.position = anim.target();
            self.motion = Motion::Settled;
            true
        } else {
            false
        }
    }
}

/// Widgets in creation order, which is also draw order.
#[derive(Clone, Debug)]
pub struct Surface {
    id: SurfaceId,
    widgets: Vec<Widget>,
}

impl Surface {
    pub fn new(id: SurfaceId) -> Self {
        Self {
            id,
            widgets: Vec::new(),
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub(crate) fn push(&mut self, widget: Widget) {
        self.widgets.push(widget);
    }

    pub(crate) fn remove(&mut self, id: WidgetId) -> Option<Widget> {
        let idx = self.widgets.iter().position(|w| w.id == id)?;
        Some(self.widgets.remove(idx))
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Widget> {
        self.widgets.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Widget> {
        self.widgets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.widgets.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settling_widget_draws_along_the_animation() {
        let mut w = Widget::new(WidgetId(1), "steps", Percent::new(45.0, 35.0), None);
        let anim = SettleAnimation::new(Percent::new(51.0, 41.0), Percent::new(50.0, 40.0), 1.0, 0.15);
        w.set_motion(Motion::Settling(anim));
        assert_eq!(w.phase(), MotionPhase::Settling);
        assert_eq!(w.display_position(1.0), Percent::new(51.0, 41.0));
        assert_eq!(w.position(), Percent::new(45.0, 35.0));
        assert_eq!(w.resting_position(), Percent::new(50.0, 40.0));
        assert!(w.finish_settle());
        assert_eq!(w.position(), Percent::new(50.0, 40.0));
        assert!(!w.finish_settle());
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut s = Surface::new(SurfaceId::Left);
        for i in 0..3 {
            s.push(Widget::new(WidgetId(i), "time", Percent::CENTER, None));
        }
        assert!(s.remove(WidgetId(1)).is_some());
        assert!(s.remove(WidgetId(1)).is_none());
        let ids: Vec<_> = s.iter().map(Widget::id).collect();
        assert_eq!(ids, vec![WidgetId(0), WidgetId(2)]);
    }
}
