use crate::core::easing::ease_out_back;
use crate::core::geometry::Percent;

pub const DEFAULT_SETTLE_SECS: f64 = 0.15;

/// Eased glide from the release point to the snapped grid position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleAnimation {
    from: Percent,
    to: Percent,
    started_at: f64,
    duration: f64,
}

impl SettleAnimation {
    pub fn new(from: Percent, to: Percent, started_at: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            started_at,
            duration: duration.max(0.0),
        }
    }

    pub fn from(&self) -> Percent {
        self.from
    }

    pub fn target(&self) -> Percent {
        self.to
    }

    /// Linear progress in [0, 1].
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (((now - self.started_at) / self.duration).clamp(0.0, 1.0)) as f32
    }

    pub fn is_finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    /// Eased position; may overshoot the target slightly near the end.
    pub fn sample(&self, now: f64) -> Percent {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, ease_out_back(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_release_and_lands_on_target() {
        let a = SettleAnimation::new(Percent::new(51.0, 41.0), Percent::new(50.0, 40.0), 2.0, 0.15);
        assert_eq!(a.sample(2.0), Percent::new(51.0, 41.0));
        assert_eq!(a.sample(2.15), Percent::new(50.0, 40.0));
        assert!(a.is_finished(3.0));
        assert!(!a.is_finished(2.1));
    }

    #[test]
    fn overshoots_past_target() {
        let a = SettleAnimation::new(Percent::new(60.0, 50.0), Percent::new(50.0, 50.0), 0.0, 1.0);
        let min_x = (0..=100)
            .map(|i| a.sample(i as f64 / 100.0).x)
            .fold(f32::MAX, f32::min);
        assert!(min_x < 50.0, "min_x={min_x}");
    }

    #[test]
    fn zero_duration_is_immediate() {
        let a = SettleAnimation::new(Percent::new(0.0, 0.0), Percent::new(10.0, 10.0), 5.0, 0.0);
        assert_eq!(a.sample(5.0), Percent::new(10.0, 10.0));
    }
}
