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

/// Same color with a different alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    pub const GRASS: [f32; 4] = [0.278, 0.702, 0.212, 1.0];
    pub const SKY: [f32; 4] = [0.529, 0.808, 0.922, 1.0];
    pub const TRAIL: [f32; 4] = [0.627, 1.0, 0.196, 1.0];
    pub const GLOW_INNER: [f32; 4] = [0.784, 1.0, 0.157, 0.65];
    pub const GLOW_MID: [f32; 4] = [0.627, 1.0, 0.0, 0.22];
    pub const RIM_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
    pub const RIM_TEAL: [f32; 4] = [0.0, 0.831, 0.784, 1.0];
    pub const HOLE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const HOLE_CENTER: [f32; 4] = [0.102, 0.102, 0.102, 1.0];
    pub const HOLE_HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.07];
    pub const SHADOW: [f32; 4] = [0.0, 0.0, 0.0, 0.22];
    pub const PLATE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLATE_EDGE: [f32; 4] = [0.0, 0.0, 0.0, 0.1];
    pub const PARTICLE: [f32; 4] = [1.0, 0.902, 0.0, 1.0];
    pub const CURSOR_OUTER: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
    pub const CURSOR_INNER: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
}
