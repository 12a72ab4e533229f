//! Body store
//!
//! Bodies live in a fixed-capacity struct-of-arrays. A body is addressed by
//! its slot index; slots are handed out densely and never reclaimed.

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::SimError;

/// Opaque display color, carried for the renderer and ignored by physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (leading `#` optional)
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Normalized RGBA for GPU upload
    pub fn to_f32_array(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{s}'")))
    }
}

/// Body shapes. Only circles take part in collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyType {
    #[default]
    Circle,
    /// Stored and integrated, but never collided
    Rectangle,
}

/// Slot index of a spawned body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyHandle(pub usize);

impl BodyHandle {
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Spawn parameters for one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    pub position: Vec2,
    pub radius: f32,
    pub is_static: bool,
    pub color: Color,
    pub body_type: BodyType,
}

impl BodyDef {
    /// A dynamic black circle
    pub fn circle(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            is_static: false,
            color: Color::BLACK,
            body_type: BodyType::Circle,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_type(mut self, body_type: BodyType) -> Self {
        self.body_type = body_type;
        self
    }
}

/// Read-only copy of one body's attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyView {
    pub index: usize,
    pub position: Vec2,
    pub previous_position: Vec2,
    pub acceleration: Vec2,
    pub radius: f32,
    pub color: Color,
    pub body_type: BodyType,
    pub is_static: bool,
}

impl BodyView {
    /// Displacement over the last tick
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous_position
    }
}

/// Fixed-capacity struct-of-arrays holding every live body
///
/// All arrays have length `len()`; the live range is `[0, len())`.
#[derive(Debug, Clone)]
pub struct BodyStore {
    capacity: usize,
    pub(crate) positions: Vec<Vec2>,
    pub(crate) previous: Vec<Vec2>,
    pub(crate) accelerations: Vec<Vec2>,
    pub(crate) radii: Vec<f32>,
    pub(crate) colors: Vec<Color>,
    pub(crate) types: Vec<BodyType>,
    pub(crate) statics: Vec<bool>,
}

impl BodyStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            positions: Vec::with_capacity(capacity),
            previous: Vec::with_capacity(capacity),
            accelerations: Vec::with_capacity(capacity),
            radii: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            types: Vec::with_capacity(capacity),
            statics: Vec::with_capacity(capacity),
        }
    }

    /// Spawn a circle at rest at (x, y)
    pub fn spawn(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        is_static: bool,
        color: Color,
    ) -> Result<BodyHandle, SimError> {
        self.spawn_body(
            BodyDef::circle(Vec2::new(x, y), radius)
                .with_static(is_static)
                .with_color(color),
        )
    }

    /// Append a body to the live range. Fails without mutating when full.
    pub fn spawn_body(&mut self, def: BodyDef) -> Result<BodyHandle, SimError> {
        if self.is_full() {
            return Err(SimError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if !(def.radius.is_finite() && def.radius > 0.0) {
            return Err(SimError::InvalidBody("radius must be positive and finite"));
        }
        if !def.position.is_finite() {
            return Err(SimError::InvalidBody("position must be finite"));
        }

        let index = self.positions.len();
        self.positions.push(def.position);
        self.previous.push(def.position);
        self.accelerations.push(Vec2::ZERO);
        self.radii.push(def.radius);
        self.colors.push(def.color);
        self.types.push(def.body_type);
        self.statics.push(def.is_static);
        Ok(BodyHandle(index))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    pub fn position(&self, index: usize) -> Option<Vec2> {
        self.positions.get(index).copied()
    }

    pub fn previous_position(&self, index: usize) -> Option<Vec2> {
        self.previous.get(index).copied()
    }

    pub fn acceleration(&self, index: usize) -> Option<Vec2> {
        self.accelerations.get(index).copied()
    }

    pub fn velocity(&self, index: usize) -> Option<Vec2> {
        Some(self.position(index)? - self.previous_position(index)?)
    }

    pub fn radius(&self, index: usize) -> Option<f32> {
        self.radii.get(index).copied()
    }

    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn body_type(&self, index: usize) -> Option<BodyType> {
        self.types.get(index).copied()
    }

    pub fn is_static(&self, index: usize) -> Option<bool> {
        self.statics.get(index).copied()
    }

    /// Largest radius among live bodies (0 when empty)
    pub fn max_radius(&self) -> f32 {
        self.radii.iter().copied().fold(0.0, f32::max)
    }

    pub fn body(&self, index: usize) -> Option<BodyView> {
        if index >= self.len() {
            return None;
        }
        Some(BodyView {
            index,
            position: self.positions[index],
            previous_position: self.previous[index],
            acceleration: self.accelerations[index],
            radius: self.radii[index],
            color: self.colors[index],
            body_type: self.types[index],
            is_static: self.statics[index],
        })
    }

    /// Live bodies in index order
    pub fn iter(&self) -> impl Iterator<Item = BodyView> + '_ {
        (0..self.len()).filter_map(|i| self.body(i))
    }
}
