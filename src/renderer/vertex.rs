//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.53, 0.81, 0.98, 1.0];
    pub const SKY_HORIZON: [f32; 4] = [0.88, 0.96, 1.0, 1.0];
    pub const SEA_SURFACE: [f32; 4] = [0.16, 0.55, 0.78, 1.0];
    pub const SEA_DEEP: [f32; 4] = [0.03, 0.2, 0.42, 1.0];
    pub const WAVE_CREST: [f32; 4] = [0.85, 0.95, 1.0, 0.6];
    /// Wood gradient (#8d6e63 -> #3e2723)
    pub const PLATFORM_TOP: [f32; 4] = [0.553, 0.431, 0.388, 1.0];
    pub const PLATFORM_BOTTOM: [f32; 4] = [0.243, 0.153, 0.137, 1.0];
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    /// Teal (#00796b)
    pub const PLAYER: [f32; 4] = [0.0, 0.475, 0.42, 1.0];
    pub const PLAYER_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CHARGE_LOW: [f32; 4] = [0.3, 0.69, 0.31, 1.0];
    pub const CHARGE_HIGH: [f32; 4] = [0.96, 0.26, 0.21, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.53, 0.81, 0.98, 1.0];
}
