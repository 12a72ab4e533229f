//! circle-verlet - A fixed-capacity 2D circle physics core
//!
//! Core modules:
//! - `sim`: Body store, Verlet integrator, grid broad phase, boundary and collision passes
//! - `settings`: Serializable engine configuration
//! - `platform`: Frame timing helpers and browser bindings

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{BoundaryShape, Settings, SettingsError};
pub use sim::{BodyHandle, Color, Engine, SharedEngine, SimError};

/// Engine configuration constants
pub mod consts {
    /// Default body capacity
    pub const MAX_BODIES: usize = 400;

    /// Broad-phase cell size; must be at least the largest body diameter
    pub const GRID_CELL_SIZE: f32 = 50.0;

    /// Default world gravity (pixels/s², +y is down)
    pub const DEFAULT_GRAVITY: (f32, f32) = (0.0, 200.0);

    /// Default boundary extents
    pub const DEFAULT_WIDTH: f32 = 400.0;
    pub const DEFAULT_HEIGHT: f32 = 800.0;

    /// Circular container radius as a fraction of half the width
    pub const CONTAINER_SCALE: f32 = 0.95;

    /// Radius used by the demo spawner
    pub const DEFAULT_BODY_RADIUS: f32 = 15.0;

    /// Frame delta used when the clock reports nothing useful (ms)
    pub const FALLBACK_FRAME_MS: f64 = 16.67;
    /// Largest frame delta handed to the stepper (ms)
    pub const MAX_FRAME_MS: f64 = 33.34;
}
