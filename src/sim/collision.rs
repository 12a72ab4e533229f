//! Narrow phase and positional correction
//!
//! One sweep per tick: every candidate pair from the grid is tested at most
//! once and overlapping circles are pushed apart along the line between their
//! centers. Corrections are not re-checked within the tick, so dense clusters
//! settle over several ticks.

use std::collections::HashSet;

use glam::Vec2;
use serde::Serialize;

use super::body::{BodyStore, BodyType};
use super::grid::SpatialGrid;

/// Counters from one collision sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollisionStats {
    /// Distinct candidate pairs tested
    pub pairs_tested: u32,
    /// Pairs that overlapped and were corrected
    pub contacts: u32,
    /// Pairs skipped because their centers coincided
    pub degenerate: u32,
}

/// Unordered pairs already handled this tick
#[derive(Debug, Clone, Default)]
pub struct PairSet {
    seen: HashSet<(usize, usize)>,
}

impl PairSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pair; false if it was already present
    pub fn insert(&mut self, a: usize, b: usize) -> bool {
        self.seen.insert(Self::key(a, b))
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.seen.contains(&Self::key(a, b))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    #[inline]
    fn key(a: usize, b: usize) -> (usize, usize) {
        if a < b { (a, b) } else { (b, a) }
    }
}

/// Outcome of testing one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// Not overlapping, or both bodies static
    Clear,
    /// Centers coincide; no direction to separate along
    Degenerate,
    /// Overlap removed
    Corrected,
}

/// Resolve overlaps between all grid neighbors
///
/// `pairs` is cleared first and holds every pair tested once this returns.
pub fn resolve_collisions(
    bodies: &mut BodyStore,
    grid: &SpatialGrid,
    pairs: &mut PairSet,
) -> CollisionStats {
    pairs.clear();
    let mut stats = CollisionStats::default();
    let mut nearby = Vec::new();

    for a in 0..bodies.len() {
        if bodies.types[a] != BodyType::Circle {
            continue;
        }
        nearby.clear();
        grid.neighbors_into(bodies.positions[a], &mut nearby);

        for &b in &nearby {
            if a == b || bodies.types[b] != BodyType::Circle {
                continue;
            }
            if !pairs.insert(a, b) {
                continue;
            }
            stats.pairs_tested += 1;

            match separate_pair(bodies, a, b) {
                PairOutcome::Clear => {}
                PairOutcome::Degenerate => stats.degenerate += 1,
                PairOutcome::Corrected => stats.contacts += 1,
            }
        }
    }

    stats
}

/// Push bodies `a` and `b` apart if their circles overlap
///
/// A static body never moves: against a static body the dynamic one takes the
/// full overlap, between two dynamic bodies it is split evenly.
pub fn separate_pair(bodies: &mut BodyStore, a: usize, b: usize) -> PairOutcome {
    let delta = bodies.positions[a] - bodies.positions[b];
    let dist_sq = delta.length_squared();
    let min_dist = bodies.radii[a] + bodies.radii[b];

    if dist_sq >= min_dist * min_dist {
        return PairOutcome::Clear;
    }
    if dist_sq == 0.0 {
        return PairOutcome::Degenerate;
    }

    let dist = dist_sq.sqrt();
    let normal: Vec2 = delta / dist;
    let overlap = min_dist - dist;

    match (bodies.statics[a], bodies.statics[b]) {
        (true, true) => return PairOutcome::Clear,
        (true, false) => bodies.positions[b] -= normal * overlap,
        (false, true) => bodies.positions[a] += normal * overlap,
        (false, false) => {
            let half = normal * (0.5 * overlap);
            bodies.positions[a] += half;
            bodies.positions[b] -= half;
        }
    }
    PairOutcome::Corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{BodyDef, Color};

    fn sweep(bodies: &mut BodyStore) -> (CollisionStats, PairSet) {
        let mut grid = SpatialGrid::new(50.0);
        grid.build(bodies);
        let mut pairs = PairSet::new();
        let stats = resolve_collisions(bodies, &grid, &mut pairs);
        (stats, pairs)
    }

    #[test]
    fn test_symmetric_separation() {
        let r = 10.0;
        let eps = 0.5;
        let mut bodies = BodyStore::with_capacity(2);
        bodies.spawn(100.0, 100.0, r, false, Color::BLACK).unwrap();
        bodies.spawn(100.0 + 2.0 * r - eps, 100.0, r, false, Color::BLACK).unwrap();

        let (stats, _) = sweep(&mut bodies);
        assert_eq!(stats.contacts, 1);

        let a = bodies.position(0).unwrap();
        let b = bodies.position(1).unwrap();
        assert!((a.distance(b) - 2.0 * r).abs() < 1e-4);
        assert!((a - Vec2::new(100.0 - eps / 2.0, 100.0)).length() < 1e-4);
        assert!((b - Vec2::new(100.0 + 2.0 * r - eps / 2.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_static_body_immovable() {
        let mut bodies = BodyStore::with_capacity(2);
        bodies.spawn(100.0, 100.0, 10.0, true, Color::BLACK).unwrap();
        bodies.spawn(100.0, 88.0, 5.0, false, Color::BLACK).unwrap();

        let (stats, _) = sweep(&mut bodies);
        assert_eq!(stats.contacts, 1);

        // Overlap of 3 taken entirely by the dynamic body, away from the static one
        assert_eq!(bodies.position(0), Some(Vec2::new(100.0, 100.0)));
        let moved = bodies.position(1).unwrap();
        assert!((moved - Vec2::new(100.0, 85.0)).length() < 1e-4);
    }

    #[test]
    fn test_static_body_as_second_of_pair() {
        let mut bodies = BodyStore::with_capacity(2);
        bodies.spawn(100.0, 88.0, 5.0, false, Color::BLACK).unwrap();
        bodies.spawn(100.0, 100.0, 10.0, true, Color::BLACK).unwrap();

        sweep(&mut bodies);

        assert_eq!(bodies.position(1), Some(Vec2::new(100.0, 100.0)));
        assert!((bodies.position(0).unwrap() - Vec2::new(100.0, 85.0)).length() < 1e-4);
    }

    #[test]
    fn test_two_static_bodies_untouched() {
        let mut bodies = BodyStore::with_capacity(2);
        bodies.spawn(100.0, 100.0, 10.0, true, Color::BLACK).unwrap();
        bodies.spawn(105.0, 100.0, 10.0, true, Color::BLACK).unwrap();

        let (stats, _) = sweep(&mut bodies);
        assert_eq!(stats.contacts, 0);
        assert_eq!(stats.pairs_tested, 1);
        assert_eq!(bodies.position(0), Some(Vec2::new(100.0, 100.0)));
        assert_eq!(bodies.position(1), Some(Vec2::new(105.0, 100.0)));
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let mut bodies = BodyStore::with_capacity(2);
        bodies.spawn(50.0, 50.0, 10.0, false, Color::BLACK).unwrap();
        bodies.spawn(50.0, 50.0, 10.0, false, Color::BLACK).unwrap();

        let (stats, _) = sweep(&mut bodies);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.contacts, 0);
        assert_eq!(bodies.position(0), bodies.position(1));
        assert!(bodies.position(0).unwrap().is_finite());
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let mut bodies = BodyStore::with_capacity(2);
        bodies.spawn(100.0, 100.0, 10.0, false, Color::BLACK).unwrap();
        bodies.spawn(120.0, 100.0, 10.0, false, Color::BLACK).unwrap();

        let (stats, _) = sweep(&mut bodies);
        assert_eq!(stats.contacts, 0);
        assert_eq!(bodies.position(1), Some(Vec2::new(120.0, 100.0)));
    }

    #[test]
    fn test_rectangles_are_not_collided() {
        let mut bodies = BodyStore::with_capacity(2);
        bodies.spawn(100.0, 100.0, 10.0, false, Color::BLACK).unwrap();
        bodies
            .spawn_body(
                BodyDef::circle(Vec2::new(105.0, 100.0), 10.0).with_type(BodyType::Rectangle),
            )
            .unwrap();

        let (stats, pairs) = sweep(&mut bodies);
        assert_eq!(stats.pairs_tested, 0);
        assert!(pairs.is_empty());
        assert_eq!(bodies.position(0), Some(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_each_pair_tested_once_per_sweep() {
        // Tight cluster sharing a handful of cells
        let mut bodies = BodyStore::with_capacity(36);
        for i in 0..6 {
            for j in 0..6 {
                let x = 40.0 + i as f32 * 12.0;
                let y = 40.0 + j as f32 * 12.0;
                bodies.spawn(x, y, 7.0, (i + j) % 5 == 0, Color::BLACK).unwrap();
            }
        }

        let (stats, pairs) = sweep(&mut bodies);
        assert_eq!(stats.pairs_tested as usize, pairs.len());
        assert!(stats.contacts > 0);

        // A second sweep starts from an empty set
        let (again, pairs) = sweep(&mut bodies);
        assert_eq!(again.pairs_tested as usize, pairs.len());
    }

    #[test]
    fn test_pair_set_is_unordered() {
        let mut pairs = PairSet::new();
        assert!(pairs.insert(3, 1));
        assert!(!pairs.insert(1, 3));
        assert!(pairs.contains(3, 1));
        assert_eq!(pairs.len(), 1);
        pairs.clear();
        assert!(pairs.is_empty());
    }
}
