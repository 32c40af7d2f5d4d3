//! Idle/Walking state and the accumulators it drives.

use rand::Rng;
use tracing::debug;

/// Walk-cycle level that starts a walk.
pub const WALK_ENTER: f64 = 0.7;
/// Walk-cycle level that ends a walk. The band in between holds the current state.
pub const WALK_EXIT: f64 = 0.3;

pub const STRIDE_KM: f64 = 0.000_78;
pub const KCAL_PER_STEP: f64 = 0.04;
/// Net climb that counts as one floor.
pub const FLOOR_HEIGHT_M: f64 = 3.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ActivityState {
    #[default]
    Idle,
    Walking,
}

impl ActivityState {
    pub fn next(self, walk_signal: f64) -> ActivityState {
        match self {
            ActivityState::Idle if walk_signal > WALK_ENTER => ActivityState::Walking,
            ActivityState::Walking if walk_signal < WALK_EXIT => ActivityState::Idle,
            s => s,
        }
    }

    pub fn is_walking(self) -> bool {
        self == ActivityState::Walking
    }

    pub fn label(self) -> &'static str {
        match self {
            ActivityState::Idle => "IDLE",
            ActivityState::Walking => "WALKING",
        }
    }
}

/// Monotonic step/calorie/floor counters. Steps arrive in small random
/// bursts, at most one burst per `interval` seconds, and only while walking.
#[derive(Clone, Debug)]
pub struct Pedometer {
    interval: f64,
    last_burst: Option<f64>,
    steps: u64,
    calories: f64,
    floors: u64,
    floor_mark: Option<f64>,
}

impl Pedometer {
    pub fn new(interval: f64) -> Self {
        Self {
            interval: interval.max(0.0),
            last_burst: None,
            steps: 0,
            calories: 0.0,
            floors: 0,
            floor_mark: None,
        }
    }

    /// Start from non-zero totals (e.g. a day already in progress).
    pub fn with_totals(mut self, steps: u64, floors: u64) -> Self {
        self.steps = steps;
        self.calories = steps as f64 * KCAL_PER_STEP;
        self.floors = floors;
        self
    }

    /// Forget the burst gate and floor baseline. Totals are kept.
    pub fn rearm(&mut self) {
        self.last_burst = None;
        self.floor_mark = None;
    }

    /// Returns the number of steps added this call.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        state: ActivityState,
        elapsed: f64,
        altitude_m: f64,
        rng: &mut R,
    ) -> u64 {
        self.track_floors(state, altitude_m);
        if !state.is_walking() {
            return 0;
        }
        // A gate time ahead of `elapsed` means the clock restarted.
        if self
            .last_burst
            .is_some_and(|last| (0.0..self.interval).contains(&(elapsed - last)))
        {
            return 0;
        }
        self.last_burst = Some(elapsed);
        let added: u64 = rng.random_range(0..=2);
        self.steps = self.steps.saturating_add(added);
        self.calories += added as f64 * KCAL_PER_STEP;
        added
    }

    fn track_floors(&mut self, state: ActivityState, altitude_m: f64) {
        let mark = match self.floor_mark {
            Some(mark) if state.is_walking() => mark,
            // Altitude drift while idle is not climbing.
            _ => {
                self.floor_mark = Some(altitude_m);
                return;
            }
        };
        if altitude_m < mark {
            self.floor_mark = Some(altitude_m);
        } else if altitude_m - mark >= FLOOR_HEIGHT_M {
            self.floors += 1;
            self.floor_mark = Some(altitude_m);
            debug!(floors = self.floors, "floor climbed");
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn calories(&self) -> f64 {
        self.calories
    }

    pub fn floors(&self) -> u64 {
        self.floors
    }

    pub fn distance_km(&self) -> f64 {
        self.steps as f64 * STRIDE_KM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn hysteresis_band_holds_state() {
        assert_eq!(ActivityState::Idle.next(0.5), ActivityState::Idle);
        assert_eq!(ActivityState::Idle.next(0.71), ActivityState::Walking);
        assert_eq!(ActivityState::Walking.next(0.5), ActivityState::Walking);
        assert_eq!(ActivityState::Walking.next(0.29), ActivityState::Idle);
    }

    #[test]
    fn idle_never_counts_steps() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut p = Pedometer::new(0.5);
        for i in 0..100 {
            p.advance(ActivityState::Idle, i as f64, 100.0, &mut rng);
        }
        assert_eq!(p.steps(), 0);
    }

    #[test]
    fn bursts_are_rate_limited() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Pedometer::new(0.5);
        let mut bursts = 0;
        // 60 fps for 10 s
        for i in 0..600 {
            let t = i as f64 / 60.0;
            let before = p.last_burst;
            p.advance(ActivityState::Walking, t, 100.0, &mut rng);
            if p.last_burst != before {
                bursts += 1;
            }
        }
        assert!((19..=21).contains(&bursts), "bursts={bursts}");
        assert!(p.steps() <= 2 * bursts as u64);
    }

    #[test]
    fn climbing_while_walking_counts_floors() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut p = Pedometer::new(0.5);
        for i in 0..=10 {
            p.advance(ActivityState::Walking, i as f64, 100.0 + i as f64, &mut rng);
        }
        assert_eq!(p.floors(), 3);
    }

    #[test]
    fn descent_then_climb_only_counts_net_gain() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut p = Pedometer::new(0.5);
        let path = [100.0, 102.0, 95.0, 97.0, 98.5];
        for (i, alt) in path.iter().enumerate() {
            p.advance(ActivityState::Walking, i as f64, *alt, &mut rng);
        }
        assert_eq!(p.floors(), 1);
    }

    #[test]
    fn clock_restart_keeps_counting() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = Pedometer::new(0.5);
        for i in 0..=600 {
            p.advance(ActivityState::Walking, i as f64, 100.0, &mut rng);
        }
        let before = p.steps();
        for i in 0..200 {
            p.advance(ActivityState::Walking, i as f64 * 0.5, 100.0, &mut rng);
        }
        assert!(p.steps() > before);
        assert_eq!(p.last_burst, Some(99.5));
    }

    #[test]
    fn rearm_keeps_totals_and_resets_the_floor_baseline() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut p = Pedometer::new(0.5).with_totals(40, 2);
        p.advance(ActivityState::Walking, 10.0, 100.0, &mut rng);
        p.rearm();
        assert_eq!(p.last_burst, None);
        // The new baseline is taken from the first reading after the rearm.
        p.advance(ActivityState::Walking, 0.0, 150.0, &mut rng);
        p.advance(ActivityState::Walking, 1.0, 151.0, &mut rng);
        assert_eq!(p.floors(), 2);
        assert!(p.steps() >= 40);
    }
}
