//! Percentage-space clamp and snap rules.

use crate::core::geometry::{Percent, Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridRules {
    grid_size: f32,
    margin: f32,
}

impl Default for GridRules {
    fn default() -> Self {
        Self {
            grid_size: 5.0,
            margin: 8.0,
        }
    }
}

impl GridRules {
    /// `margin` is kept below 50 so the usable band is never empty;
    /// a non-positive `grid_size` disables snapping.
    pub fn new(grid_size: f32, margin: f32) -> Self {
        let margin = if margin.is_finite() { margin.clamp(0.0, 49.0) } else { 8.0 };
        let grid_size = if grid_size.is_finite() { grid_size.max(0.0) } else { 5.0 };
        Self { grid_size, margin }
    }

    pub fn grid_size(&self) -> f32 {
        self.grid_size
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    fn clamp_axis(&self, v: f32) -> f32 {
        let v = if v.is_finite() { v } else { 50.0 };
        v.clamp(self.margin, 100.0 - self.margin)
    }

    /// Keep a position inside the drawable band `[margin, 100 - margin]`.
    pub fn clamp(&self, p: Percent) -> Percent {
        Percent::new(self.clamp_axis(p.x), self.clamp_axis(p.y))
    }

    fn snap_axis(&self, v: f32) -> f32 {
        let v = self.clamp_axis(v);
        let g = self.grid_size;
        if g <= 0.0 {
            return v;
        }
        // Outermost grid lines that still sit inside the margin.
        let lo = (self.margin / g).ceil() * g;
        let hi = ((100.0 - self.margin) / g).floor() * g;
        if lo > hi {
            return v;
        }
        ((v / g).round() * g).clamp(lo, hi)
    }

    /// Clamp, then round each axis to the nearest grid line inside the margin.
    pub fn snap(&self, p: Percent) -> Percent {
        Percent::new(self.snap_axis(p.x), self.snap_axis(p.y))
    }

    /// Unsnapped drag preview: origin moved by the pointer delta, in
    /// percent of the surface, clamped to the margin band.
    pub fn live_position(&self, origin: Percent, pointer_delta: Point, bounds: &Rect) -> Percent {
        if bounds.is_degenerate() {
            return self.clamp(origin);
        }
        self.clamp(Percent::new(
            origin.x + pointer_delta.x / bounds.width() * 100.0,
            origin.y + pointer_delta.y / bounds.height() * 100.0,
        ))
    }

    /// Snapped position for a pointer dropped inside `bounds`.
    pub fn drop_position(&self, pointer: Point, bounds: &Rect) -> Percent {
        self.snap(bounds.to_percent(pointer))
    }
}

/// Quick positions for placing a widget without dragging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Anchor {
    pub const ALL: [Anchor; 5] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::Center,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Anchor::TopLeft => "Top Left",
            Anchor::TopRight => "Top Right",
            Anchor::BottomLeft => "Bottom Left",
            Anchor::BottomRight => "Bottom Right",
            Anchor::Center => "Center",
        }
    }

    /// Raw anchor point; callers run it through `GridRules::snap`.
    pub fn percent(self) -> Percent {
        match self {
            Anchor::TopLeft => Percent::new(0.0, 0.0),
            Anchor::TopRight => Percent::new(100.0, 0.0),
            Anchor::BottomLeft => Percent::new(0.0, 100.0),
            Anchor::BottomRight => Percent::new(100.0, 100.0),
            Anchor::Center => Percent::CENTER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_lands_on_grid_inside_margin() {
        let rules = GridRules::default();
        for i in -50..=150 {
            let v = i as f32 * 0.73;
            let s = rules.snap(Percent::new(v, 100.0 - v));
            for axis in [s.x, s.y] {
                assert!((10.0..=90.0).contains(&axis), "axis={axis}");
                assert_eq!(axis % 5.0, 0.0, "axis={axis}");
            }
        }
    }

    #[test]
    fn snap_examples() {
        let rules = GridRules::default();
        assert_eq!(rules.snap(Percent::new(47.0, 33.0)), Percent::new(45.0, 35.0));
        assert_eq!(rules.snap(Percent::new(0.0, 100.0)), Percent::new(10.0, 90.0));
        assert_eq!(rules.snap(Percent::new(f32::NAN, 52.4)), Percent::new(50.0, 50.0));
    }

    #[test]
    fn live_position_is_clamped_not_snapped() {
        let rules = GridRules::default();
        let bounds = Rect::from_min_size(Point::new(0.0, 0.0), 256.0, 128.0);
        let live = rules.live_position(Percent::new(45.0, 35.0), Point::new(64.0, 32.0), &bounds);
        assert_eq!(live, Percent::new(70.0, 60.0));
        let far = rules.live_position(Percent::new(45.0, 35.0), Point::new(-500.0, 500.0), &bounds);
        assert_eq!(far, Percent::new(8.0, 92.0));
    }

    #[test]
    fn oversized_margin_is_tamed() {
        let rules = GridRules::new(5.0, 80.0);
        assert_eq!(rules.margin(), 49.0);
        let s = rules.snap(Percent::new(0.0, 100.0));
        assert_eq!(s, Percent::new(50.0, 50.0));
    }

    #[test]
    fn anchors_snap_into_corners() {
        let rules = GridRules::default();
        assert_eq!(rules.snap(Anchor::TopRight.percent()), Percent::new(90.0, 10.0));
        assert_eq!(rules.snap(Anchor::Center.percent()), Percent::CENTER);
    }
}
