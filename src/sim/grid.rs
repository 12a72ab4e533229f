//! Uniform grid broad phase
//!
//! Bodies are bucketed by the cell containing their center. Candidates for a
//! body are everything in the 3x3 block of cells around it, which finds every
//! overlapping pair as long as `cell_size` is at least the largest body
//! diameter. The grid is derived data and is rebuilt from scratch every tick.

use std::collections::HashMap;

use glam::Vec2;

use super::body::BodyStore;

/// Integer cell coordinate, exact for every (x, y) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Key offset by (dx, dy) cells
    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Cell key -> body indices in that cell, in index order
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing `position`
    #[inline]
    pub fn cell_of(&self, position: Vec2) -> CellKey {
        CellKey::new(
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Columns and rows needed to cover a `width` x `height` region
    pub fn dimensions(&self, width: f32, height: f32) -> (u32, u32) {
        (
            (width / self.cell_size).ceil().max(0.0) as u32,
            (height / self.cell_size).ceil().max(0.0) as u32,
        )
    }

    /// Clear and re-insert every live body at its current position
    pub fn build(&mut self, bodies: &BodyStore) {
        self.cells.clear();
        for (index, &position) in bodies.positions.iter().enumerate() {
            let key = self.cell_of(position);
            self.cells.entry(key).or_default().push(index);
        }
    }

    /// Bodies bucketed in one cell
    pub fn cell(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of non-empty cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Append the contents of the 3x3 cells around `position` to `out`
    pub fn neighbors_into(&self, position: Vec2, out: &mut Vec<usize>) {
        let center = self.cell_of(position);
        for dx in -1..=1 {
            for dy in -1..=1 {
                out.extend_from_slice(self.cell(center.offset(dx, dy)));
            }
        }
    }

    /// Candidate neighbors of body `index`, including the body itself
    ///
    /// Returns an empty list for indices outside the live range.
    pub fn neighbors(&self, bodies: &BodyStore, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        if let Some(position) = bodies.position(index) {
            self.neighbors_into(position, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Color;
    use proptest::prelude::*;

    fn store_with(points: &[(f32, f32, f32)]) -> BodyStore {
        let mut store = BodyStore::with_capacity(points.len());
        for &(x, y, r) in points {
            store.spawn(x, y, r, false, Color::BLACK).unwrap();
        }
        store
    }

    #[test]
    fn test_cell_of_floors_negative_coordinates() {
        let grid = SpatialGrid::new(50.0);
        assert_eq!(grid.cell_of(Vec2::new(0.0, 0.0)), CellKey::new(0, 0));
        assert_eq!(grid.cell_of(Vec2::new(49.9, 50.0)), CellKey::new(0, 1));
        assert_eq!(grid.cell_of(Vec2::new(-0.1, -50.0)), CellKey::new(-1, -1));
        assert_eq!(grid.cell_of(Vec2::new(-50.1, 125.0)), CellKey::new(-2, 2));
    }

    #[test]
    fn test_cell_keys_are_distinct() {
        // A string or summed key would collide on these
        assert_ne!(CellKey::new(1, 23), CellKey::new(12, 3));
        assert_ne!(CellKey::new(1, -2), CellKey::new(-2, 1));
    }

    #[test]
    fn test_build_buckets_in_index_order() {
        let store = store_with(&[(10.0, 10.0, 5.0), (60.0, 10.0, 5.0), (20.0, 30.0, 5.0)]);
        let mut grid = SpatialGrid::new(50.0);
        grid.build(&store);

        assert_eq!(grid.cell(CellKey::new(0, 0)), &[0, 2]);
        assert_eq!(grid.cell(CellKey::new(1, 0)), &[1]);
        assert!(grid.cell(CellKey::new(5, 5)).is_empty());
        assert_eq!(grid.occupied_cells(), 2);
    }

    #[test]
    fn test_build_discards_previous_contents() {
        let mut store = store_with(&[(10.0, 10.0, 5.0)]);
        let mut grid = SpatialGrid::new(50.0);
        grid.build(&store);
        store.positions[0] = Vec2::new(210.0, 10.0);
        grid.build(&store);

        assert!(grid.cell(CellKey::new(0, 0)).is_empty());
        assert_eq!(grid.cell(CellKey::new(4, 0)), &[0]);
    }

    #[test]
    fn test_neighbors_cover_3x3_block() {
        let store = store_with(&[
            (75.0, 75.0, 5.0),   // center cell (1, 1)
            (10.0, 10.0, 5.0),   // (0, 0) diagonal neighbor
            (140.0, 110.0, 5.0), // (2, 2) diagonal neighbor
            (160.0, 75.0, 5.0),  // (3, 1) too far
        ]);
        let mut grid = SpatialGrid::new(50.0);
        grid.build(&store);

        let mut found = grid.neighbors(&store, 0);
        found.sort_unstable();
        assert_eq!(found, vec![0, 1, 2]);
        assert!(grid.neighbors(&store, 42).is_empty());
    }

    #[test]
    fn test_dimensions() {
        let grid = SpatialGrid::new(50.0);
        assert_eq!(grid.dimensions(400.0, 820.0), (8, 17));
    }

    proptest! {
        #[test]
        fn prop_overlapping_pairs_are_neighbors(
            bodies in prop::collection::vec(
                (-300.0f32..300.0, -300.0f32..300.0, 1.0f32..25.0),
                2..40,
            )
        ) {
            // Cell size at least the largest possible diameter
            let store = store_with(&bodies);
            let mut grid = SpatialGrid::new(50.0);
            grid.build(&store);

            for a in 0..store.len() {
                let near_a = grid.neighbors(&store, a);
                for b in (a + 1)..store.len() {
                    let min_dist = store.radii[a] + store.radii[b];
                    if store.positions[a].distance(store.positions[b]) < min_dist {
                        prop_assert!(near_a.contains(&b));
                        prop_assert!(grid.neighbors(&store, b).contains(&a));
                    }
                }
            }
        }
    }
}
