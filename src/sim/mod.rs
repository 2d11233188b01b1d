// sim/ - Per-frame animation
//
// One shared clock drives every animated entity. Frames arrive in
// wall-clock order from the host loop.

mod activation;
mod oscillator;

pub use activation::{ActivationPolicy, ActivationTracker};
pub use oscillator::{Spin, flight_circle, flight_heading, oscillate, wrap_angle};

/// Session clock shared by all animations
#[derive(Debug, Clone, Default)]
pub struct Clock {
    elapsed: f32,
    delta: f32,
    frame: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.delta = dt;
        self.elapsed += dt;
        self.frame += 1;
    }

    pub fn elapsed(&self) -> f32 { self.elapsed }
    pub fn delta(&self) -> f32 { self.delta }
    pub fn frame(&self) -> u64 { self.frame }
}
