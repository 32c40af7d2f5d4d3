//! Numeric primitives shared by the simulator and the placement engine.

pub mod easing;
pub mod frame_loop;
pub mod geometry;
pub mod noise;
pub mod phase;
