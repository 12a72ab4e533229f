//! Browser bindings
//!
//! Exposes the shared engine to a JavaScript application shell. The shell's
//! frame callback calls `step_frame` and then reads the flat position and
//! radius arrays to draw; gesture handlers call `spawn`.

use js_sys::{Array, Float32Array};
use wasm_bindgen::prelude::*;

use crate::settings::{BoundaryShape, Settings};
use crate::sim::{Color, SharedEngine};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Ignore a second init when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebEngine {
    shared: SharedEngine,
}

#[wasm_bindgen]
impl WebEngine {
    /// An uninitialized engine; call `init` once screen dimensions are known
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebEngine {
        WebEngine {
            shared: SharedEngine::new(),
        }
    }

    /// Returns false if the engine already existed
    pub fn init(
        &self,
        width: f32,
        height: f32,
        capacity: u32,
        gravity_x: f32,
        gravity_y: f32,
        boundary: &str,
    ) -> Result<bool, JsValue> {
        let shape = BoundaryShape::from_name(boundary)
            .ok_or_else(|| JsValue::from_str(&format!("unknown boundary '{boundary}'")))?;
        let settings = Settings::new(
            width,
            height,
            capacity as usize,
            glam::Vec2::new(gravity_x, gravity_y),
        )
        .with_boundary(shape);
        self.shared
            .init(settings)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Slot index of the new body, or undefined before `init`
    pub fn spawn(
        &self,
        x: f32,
        y: f32,
        radius: f32,
        is_static: bool,
        color: Option<String>,
    ) -> Result<Option<u32>, JsValue> {
        let color = match color.as_deref() {
            Some(hex) => Some(
                Color::from_hex(hex)
                    .ok_or_else(|| JsValue::from_str(&format!("invalid color '{hex}'")))?,
            ),
            None => None,
        };
        self.shared
            .spawn(x, y, radius, is_static, color)
            .map(|handle| handle.map(|h| h.index() as u32))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Advance one tick from the frame clock's elapsed milliseconds
    pub fn step_frame(&self, elapsed_ms: Option<f64>) {
        self.shared.step(crate::platform::frame_dt(elapsed_ms));
    }

    pub fn count(&self) -> u32 {
        self.shared.count() as u32
    }

    /// Interleaved x, y for every live body
    pub fn positions(&self) -> Float32Array {
        let data = self
            .shared
            .snapshot()
            .map(|s| s.positions())
            .unwrap_or_default();
        Float32Array::from(data.as_slice())
    }

    pub fn radii(&self) -> Float32Array {
        let data = self
            .shared
            .snapshot()
            .map(|s| s.radii())
            .unwrap_or_default();
        Float32Array::from(data.as_slice())
    }

    /// Hex color strings, one per live body
    pub fn colors(&self) -> Array {
        let colors = Array::new();
        self.shared.with(|engine| {
            for body in engine.bodies().iter() {
                colors.push(&JsValue::from_str(&body.color.to_hex()));
            }
        });
        colors
    }
}

impl Default for WebEngine {
    fn default() -> Self {
        Self::new()
    }
}
