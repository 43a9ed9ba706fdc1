//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in canvas pixels (NDC after upload) with RGBA color
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

    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching `shader.wgsl` locations 0 (position) and 1 (color)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use crate::renderer::color::hex;

    pub const BACKGROUND_EDGE: [f32; 4] = hex(0x0a0e17, 1.0);
    pub const BACKGROUND_MID: [f32; 4] = hex(0x1a1b3a, 1.0);
    pub const DISTANT_STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER: [f32; 4] = hex(0x40c9ff, 1.0);
    pub const PLAYER_CORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_RIM: [f32; 4] = hex(0x40c9ff, 0.3);
    pub const PLAYER_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_PUPIL: [f32; 4] = hex(0x0a0e17, 1.0);
    pub const BOOST: [f32; 4] = hex(0xffd166, 1.0);
    /// Fades outward from star bodies
    pub const STAR_RIM: [f32; 4] = hex(0xffd700, 0.3);
    pub const PAUSE_OVERLAY: [f32; 4] = hex(0x0a0e17, 0.9);
}
