//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (clamping the delta handed to the stepper)
//! - Browser bindings (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::{FALLBACK_FRAME_MS, MAX_FRAME_MS};

/// Convert a frame clock reading (ms since the previous frame) to a tick `dt`
/// in seconds
///
/// Missing or non-positive readings use a nominal 60 Hz frame; long frames are
/// capped so a stall cannot produce a destabilizing step.
pub fn frame_dt(elapsed_ms: Option<f64>) -> f32 {
    let ms = match elapsed_ms {
        Some(ms) if ms > 0.0 => ms,
        _ => FALLBACK_FRAME_MS,
    };
    (ms.min(MAX_FRAME_MS) / 1000.0) as f32
}
