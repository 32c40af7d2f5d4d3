//! Screen-space and percentage-space coordinates.
//!
//! Pointer input arrives in screen points; widgets live in percentages of
//! their surface's rectangle so a lens can be resized without moving them.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn delta_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn from_min_size(min: Point, width: f32, height: f32) -> Self {
        Self {
            min,
            max: Point::new(min.x + width, min.y + height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// A rectangle too small to divide by is treated as absent.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > f32::EPSILON && self.height() > f32::EPSILON)
    }

    /// Inclusive on all edges, so a pointer resting on the border still hovers.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Unclamped percentage position of `p` inside this rectangle.
    pub fn to_percent(&self, p: Point) -> Percent {
        if self.is_degenerate() {
            return Percent::CENTER;
        }
        Percent::new(
            (p.x - self.min.x) / self.width() * 100.0,
            (p.y - self.min.y) / self.height() * 100.0,
        )
    }

    pub fn from_percent(&self, pct: Percent) -> Point {
        Point::new(
            self.min.x + pct.x / 100.0 * self.width(),
            self.min.y + pct.y / 100.0 * self.height(),
        )
    }
}

/// Position as a percentage of a surface's width/height.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Percent {
    pub x: f32,
    pub y: f32,
}

impl Percent {
    pub const CENTER: Percent = Percent { x: 50.0, y: 50.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Percent, t: f32) -> Percent {
        Percent::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_round_trips_through_rect() {
        let rect = Rect::from_min_size(Point::new(100.0, 40.0), 300.0, 200.0);
        let p = rect.from_percent(Percent::new(25.0, 75.0));
        assert_eq!(p, Point::new(175.0, 190.0));
        assert_eq!(rect.to_percent(p), Percent::new(25.0, 75.0));
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let rect = Rect::from_min_size(Point::new(0.0, 0.0), 10.0, 10.0);
        assert!(rect.contains(Point::new(0.0, 10.0)));
        assert!(!rect.contains(Point::new(10.01, 5.0)));
    }

    #[test]
    fn degenerate_rect_maps_to_center() {
        let rect = Rect::from_min_size(Point::new(5.0, 5.0), 0.0, 10.0);
        assert!(rect.is_degenerate());
        assert_eq!(rect.to_percent(Point::new(7.0, 7.0)), Percent::CENTER);
    }
}
