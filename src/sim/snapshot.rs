//! Render snapshot
//!
//! A renderer that runs beside the simulation thread draws from a copy taken
//! between ticks, never from the live store.

use bytemuck::{Pod, Zeroable};
use serde::Serialize;

use super::body::BodyStore;

/// Per-body instance data, laid out for a GPU instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct BodyInstance {
    pub position: [f32; 2],
    pub radius: f32,
    #[serde(skip)]
    pub _pad: f32,
    pub color: [f32; 4],
}

impl BodyInstance {
    pub const STRIDE: usize = std::mem::size_of::<BodyInstance>();
}

/// Body data as of the end of tick `tick`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub instances: Vec<BodyInstance>,
}

impl RenderSnapshot {
    pub fn capture(bodies: &BodyStore, tick: u64) -> Self {
        let instances = bodies
            .iter()
            .map(|body| BodyInstance {
                position: body.position.to_array(),
                radius: body.radius,
                _pad: 0.0,
                color: body.color.to_f32_array(),
            })
            .collect();
        Self { tick, instances }
    }

    /// Number of bodies captured
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Positions as interleaved x, y
    pub fn positions(&self) -> Vec<f32> {
        self.instances.iter().flat_map(|i| i.position).collect()
    }

    pub fn radii(&self) -> Vec<f32> {
        self.instances.iter().map(|i| i.radius).collect()
    }
}
