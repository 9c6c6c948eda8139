//! Ballistic integration for the airborne player

use glam::Vec2;

/// Advance one tick with semi-implicit Euler.
///
/// Position moves by the velocity held at the start of the tick; gravity is
/// applied afterwards and only affects the next tick.
#[inline]
pub fn step(pos: &mut Vec2, vel: &mut Vec2, dt: f32, gravity: f32) {
    *pos += *vel * dt;
    vel.y += gravity;
}
