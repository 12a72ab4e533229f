//! Position Verlet integration
//!
//! Velocity is never stored: it is the difference between the current and
//! previous position. Any positional correction made after integration
//! therefore carries into the next tick's velocity automatically.

use glam::Vec2;

use super::body::BodyStore;

/// Advance every dynamic body by one tick under `gravity`
///
/// Gravity is written into the body's acceleration first, then
/// `pos += (pos - prev) + accel * dt²`. Static bodies are left untouched.
pub fn integrate(bodies: &mut BodyStore, gravity: Vec2, dt: f32) {
    let dt_sq = dt * dt;
    for i in 0..bodies.len() {
        if bodies.statics[i] {
            continue;
        }
        bodies.accelerations[i] = gravity;

        let current = bodies.positions[i];
        let velocity = current - bodies.previous[i];
        bodies.previous[i] = current;
        bodies.positions[i] = current + velocity + bodies.accelerations[i] * dt_sq;
    }
}
