//! Per-tick pipeline
//!
//! Fixed order, one pass each, no substepping:
//! integrate -> rebuild grid -> boundary -> collisions.

use super::boundary::apply_boundary;
use super::collision::{CollisionStats, resolve_collisions};
use super::engine::Engine;
use super::integrator::integrate;

/// Advance the engine by one tick of `dt` seconds
///
/// `dt` is used as given; callers clamp it to a stable range.
pub fn step(engine: &mut Engine, dt: f32) -> CollisionStats {
    integrate(&mut engine.bodies, engine.settings.gravity, dt);

    // Positions moved, so the broad phase is stale
    engine.grid.build(&engine.bodies);

    apply_boundary(&mut engine.bodies, &engine.settings);

    let stats = resolve_collisions(&mut engine.bodies, &engine.grid, &mut engine.pairs);

    engine.tick_count += 1;
    engine.last_stats = stats;

    if stats.contacts > 0 || stats.degenerate > 0 {
        log::debug!(
            "Tick {}: {} bodies, {} pairs, {} contacts, {} degenerate",
            engine.tick_count,
            engine.bodies.len(),
            stats.pairs_tested,
            stats.contacts,
            stats.degenerate
        );
    }

    stats
}
