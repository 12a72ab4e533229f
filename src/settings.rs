//! Engine settings
//!
//! Loaded from JSON on native builds; every field falls back to its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::SimError;

/// Upper bound on body capacity accepted by [`Settings::validate`]
pub const MAX_CAPACITY: usize = 1 << 20;

/// Shape of the region bodies are kept inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryShape {
    /// Axis-aligned box from (0, 0) to (width, height)
    #[default]
    Rectangular,
    /// Circle centered in the box, radius = width / 2 * container_scale
    Circular,
}

impl BoundaryShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryShape::Rectangular => "rectangular",
            BoundaryShape::Circular => "circular",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rectangular" | "rect" | "box" => Some(BoundaryShape::Rectangular),
            "circular" | "circle" => Some(BoundaryShape::Circular),
            _ => None,
        }
    }
}

/// Errors from loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read or write settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] SimError),
}

/// Engine configuration, fixed for the engine's lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// World width (pixels)
    pub width: f32,
    /// World height (pixels)
    pub height: f32,
    /// Maximum number of live bodies
    pub capacity: usize,
    /// Acceleration applied to every dynamic body
    pub gravity: Vec2,
    /// Broad-phase cell edge length
    pub cell_size: f32,
    /// Boundary policy
    pub boundary: BoundaryShape,
    /// Circular container radius as a fraction of width / 2
    pub container_scale: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            capacity: MAX_BODIES,
            gravity: Vec2::new(DEFAULT_GRAVITY.0, DEFAULT_GRAVITY.1),
            cell_size: GRID_CELL_SIZE,
            boundary: BoundaryShape::Rectangular,
            container_scale: CONTAINER_SCALE,
        }
    }
}

impl Settings {
    /// Settings for a `width` x `height` world with the remaining fields defaulted
    pub fn new(width: f32, height: f32, capacity: usize, gravity: Vec2) -> Self {
        Self {
            width,
            height,
            capacity,
            gravity,
            ..Self::default()
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryShape) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Center of the world box
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Radius of the circular container
    #[inline]
    pub fn container_radius(&self) -> f32 {
        self.width / 2.0 * self.container_scale
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(SimError::InvalidSettings("width must be positive and finite"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(SimError::InvalidSettings("height must be positive and finite"));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(SimError::InvalidSettings("capacity is too large"));
        }
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidSettings("gravity must be finite"));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(SimError::InvalidSettings("cell size must be positive and finite"));
        }
        if !(self.container_scale > 0.0 && self.container_scale <= 1.0) {
            return Err(SimError::InvalidSettings("container scale must be in (0, 1]"));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
