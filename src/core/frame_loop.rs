//! Frame scheduler decoupled from any UI toolkit.
//!
//! The host calls `tick(now)` from its repaint callback (or a test calls it
//! with synthetic timestamps). Time never runs backward: a timestamp older
//! than the previous one is treated as "no time passed".

use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Monotonic timestamp in seconds, after clamping.
    pub now: f64,
    /// Seconds since `start`.
    pub elapsed: f64,
    /// Seconds since the previous tick (zero on the first tick).
    pub dt: f64,
    pub frame_index: u64,
}

#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    origin: f64,
    last: Option<f64>,
    frame_index: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: f64) {
        if self.running {
            return;
        }
        let now = if now.is_finite() { now } else { 0.0 };
        debug!(now, "frame loop started");
        self.running = true;
        self.origin = now;
        self.last = None;
        self.frame_index = 0;
    }

    /// Stops scheduling; later ticks are ignored until `start` is called again.
    pub fn stop(&mut self) {
        if self.running {
            debug!(frames = self.frame_index, "frame loop stopped");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&mut self, now: f64) -> Option<FrameTime> {
        if !self.running {
            trace!("tick ignored: frame loop stopped");
            return None;
        }
        let floor = self.last.unwrap_or(self.origin);
        let now = if now.is_finite() { now.max(floor) } else { floor };
        let dt = self.last.map_or(0.0, |last| now - last);
        self.last = Some(now);
        let frame = FrameTime {
            now,
            elapsed: now - self.origin,
            dt,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.saturating_add(1);
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_before_start_is_skipped() {
        let mut fl = FrameLoop::new();
        assert!(fl.tick(1.0).is_none());
    }

    #[test]
    fn backward_clock_is_clamped() {
        let mut fl = FrameLoop::new();
        fl.start(10.0);
        let a = fl.tick(12.0).unwrap();
        let b = fl.tick(11.0).unwrap();
        assert_eq!(a.elapsed, 2.0);
        assert_eq!(b.now, 12.0);
        assert_eq!(b.dt, 0.0);
        assert_eq!(b.frame_index, 1);
    }

    #[test]
    fn stop_halts_ticks_and_restart_resets_origin() {
        let mut fl = FrameLoop::new();
        fl.start(0.0);
        assert!(fl.tick(0.5).is_some());
        fl.stop();
        assert!(fl.tick(1.0).is_none());
        fl.start(5.0);
        let f = fl.tick(5.25).unwrap();
        assert_eq!(f.elapsed, 0.25);
        assert_eq!(f.frame_index, 0);
    }
}
