// oscillator.rs - Sinusoidal motion
//
// Pure functions of elapsed time and a per-entity phase. The only state
// is the spin accumulator, which is advanced by frame delta.

use std::f32::consts::TAU;

use glam::Vec3;

/// amplitude * sin(frequency * (t + phase))
#[inline]
pub fn oscillate(t: f32, phase: f32, amplitude: f32, frequency: f32) -> f32 {
    amplitude * (frequency * (t + phase)).sin()
}

/// Position on a horizontal circle of `radius` around `anchor`
#[inline]
pub fn flight_circle(anchor: Vec3, t: f32, phase: f32, radius: f32, speed: f32) -> Vec3 {
    let a = t * speed + phase;
    anchor + Vec3::new(radius * a.sin(), 0.0, radius * a.cos())
}

/// Yaw that faces along the flight circle's direction of travel
#[inline]
pub fn flight_heading(t: f32, phase: f32, speed: f32) -> f32 {
    // Tangent of (sin a, cos a) is (cos a, -sin a); yaw = atan2(dx, dz)
    let a = t * speed + phase;
    wrap_angle(a.cos().atan2(-a.sin()))
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Continuous rotation: angle += rate * dt, kept in [0, 2π)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    angle: f32,
    rate: f32,
}

impl Spin {
    pub fn new(rate: f32) -> Self {
        Self { angle: 0.0, rate }
    }

    pub fn advance(&mut self, dt: f32) -> f32 {
        self.angle = wrap_angle(self.angle + self.rate * dt);
        self.angle
    }

    pub fn angle(&self) -> f32 { self.angle }
}
