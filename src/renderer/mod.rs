//! Render adapter
//!
//! Turns a simulation snapshot into a triangle list any 2D backend can upload.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::consts::WALL_THICKNESS;
use crate::sim::Rect;
pub use vertex::{Vertex, colors};

/// A ball as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub center: Vec2,
    pub radius: f32,
    pub color: [f32; 4],
}

/// A wall as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallView {
    pub start: Vec2,
    pub end: Vec2,
}

/// Geometry of one whole frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSnapshot {
    pub frame: u64,
    pub balls: Vec<BallView>,
    pub walls: Vec<WallView>,
}

/// Triangles for the arena, the walls and the balls, back to front
pub fn build_frame(snapshot: &RenderSnapshot, arena: &Rect) -> Vec<Vertex> {
    let mut vertices = shapes::rect(arena, colors::ARENA);

    for wall in &snapshot.walls {
        vertices.extend(shapes::wall_quad(wall.start, wall.end, WALL_THICKNESS, colors::WALL));
    }

    for ball in &snapshot.balls {
        let segments = shapes::circle_segments(ball.radius);
        vertices.extend(shapes::circle(ball.center, ball.radius, ball.color, segments));
    }

    vertices
}

/// Raw bytes of a vertex list, ready for a vertex buffer
pub fn vertex_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
