//! Simulation core
//!
//! Bodies are plain slot indices into a fixed-capacity struct-of-arrays.
//! One tick runs four passes over it in a fixed order:
//! - Verlet integration under gravity (static bodies skipped)
//! - Broad-phase grid rebuild
//! - Boundary constraint
//! - Single-pass collision correction

pub mod body;
pub mod boundary;
pub mod collision;
pub mod engine;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod shared;
pub mod snapshot;
pub mod tick;

pub use body::{BodyDef, BodyHandle, BodyStore, BodyType, BodyView, Color};
pub use boundary::{apply_boundary, clamp_rectangular, contain_circular};
pub use collision::{CollisionStats, PairOutcome, PairSet, resolve_collisions, separate_pair};
pub use engine::Engine;
pub use error::SimError;
pub use grid::{CellKey, SpatialGrid};
pub use integrator::integrate;
pub use shared::SharedEngine;
pub use snapshot::{BodyInstance, RenderSnapshot};
pub use tick::step;
