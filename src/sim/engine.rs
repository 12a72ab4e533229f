//! Engine aggregate
//!
//! Owns the body store, settings, broad-phase grid and per-tick scratch state.
//! Constructed once per simulation session and dropped with it.

use glam::Vec2;

use super::body::{BodyDef, BodyHandle, BodyStore, BodyView, Color};
use super::collision::{CollisionStats, PairSet};
use super::error::SimError;
use super::grid::SpatialGrid;
use super::snapshot::RenderSnapshot;
use super::tick;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) settings: Settings,
    pub(crate) bodies: BodyStore,
    pub(crate) grid: SpatialGrid,
    pub(crate) pairs: PairSet,
    pub(crate) tick_count: u64,
    pub(crate) last_stats: CollisionStats,
}

impl Engine {
    /// Build an empty engine from validated settings
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        log::info!(
            "Engine created: {}x{} world, capacity {}, gravity ({}, {}), {} boundary",
            settings.width,
            settings.height,
            settings.capacity,
            settings.gravity.x,
            settings.gravity.y,
            settings.boundary.as_str()
        );
        Ok(Self {
            bodies: BodyStore::with_capacity(settings.capacity),
            grid: SpatialGrid::new(settings.cell_size),
            pairs: PairSet::new(),
            tick_count: 0,
            last_stats: CollisionStats::default(),
            settings,
        })
    }

    /// `new` with default cell size and a rectangular boundary
    pub fn create(width: f32, height: f32, capacity: usize, gravity: Vec2) -> Result<Self, SimError> {
        Self::new(Settings::new(width, height, capacity, gravity))
    }

    /// Spawn a circle at rest; color defaults to black
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        is_static: bool,
        color: Option<Color>,
    ) -> Result<BodyHandle, SimError> {
        self.spawn_body(
            BodyDef::circle(Vec2::new(x, y), radius)
                .with_static(is_static)
                .with_color(color.unwrap_or_default()),
        )
    }

    pub fn spawn_body(&mut self, def: BodyDef) -> Result<BodyHandle, SimError> {
        // Warn once per new widest body rather than on every later spawn
        if def.radius > self.bodies.max_radius() && def.radius * 2.0 > self.grid.cell_size() {
            log::warn!(
                "Body diameter {} exceeds grid cell size {}; some overlaps may be missed",
                def.radius * 2.0,
                self.grid.cell_size()
            );
        }
        self.bodies.spawn_body(def).inspect_err(|e| {
            log::warn!("Spawn at ({}, {}) rejected: {}", def.position.x, def.position.y, e);
        })
    }

    /// Advance one tick
    pub fn step(&mut self, dt: f32) -> CollisionStats {
        tick::step(self, dt)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn bodies(&self) -> &BodyStore {
        &self.bodies
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Whether the grid cell is wide enough for every live pair of bodies
    pub fn broad_phase_covers(&self) -> bool {
        self.bodies.max_radius() * 2.0 <= self.grid.cell_size()
    }

    /// Pairs tested during the last tick
    pub fn pairs(&self) -> &PairSet {
        &self.pairs
    }

    /// Number of live bodies
    pub fn count(&self) -> usize {
        self.bodies.len()
    }

    pub fn capacity(&self) -> usize {
        self.bodies.capacity()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn last_stats(&self) -> CollisionStats {
        self.last_stats
    }

    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.bodies.position(index)
    }

    pub fn radius(&self, index: usize) -> Option<f32> {
        self.bodies.radius(index)
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        self.bodies.color(index)
    }

    pub fn body(&self, index: usize) -> Option<BodyView> {
        self.bodies.body(index)
    }

    /// Copy of everything a renderer draws
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.bodies, self.tick_count)
    }
}
