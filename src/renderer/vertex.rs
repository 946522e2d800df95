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

    /// Byte stride of one vertex in a vertex buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` within a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();
}

/// Colors for scene elements (pinks from the desktop sidebar theme)
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const PINK1: [f32; 4] = rgb(253, 228, 242);
    pub const PINK2: [f32; 4] = rgb(249, 206, 231);
    pub const PINK3: [f32; 4] = rgb(244, 184, 218);
    pub const PINK4: [f32; 4] = rgb(238, 161, 205);
    pub const PINK5: [f32; 4] = rgb(230, 139, 190);

    pub const ARENA: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const WALL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = PINK5;

    /// Palette balls are drawn from in the demo scene
    pub const BALL_PALETTE: [[f32; 4]; 4] = [PINK1, PINK2, PINK3, PINK4];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::COLOR_OFFSET, 8);
        let v = Vertex::new(1.0, 2.0, colors::WALL);
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), Vertex::STRIDE);
    }

    #[test]
    fn test_palette_is_opaque() {
        assert!(colors::BALL_PALETTE.iter().all(|c| c[3] == 1.0));
        assert!((colors::PINK5[0] - 230.0 / 255.0).abs() < 1e-6);
    }
}
