//! Shape generation for 2D primitives
//!
//! Every shape is emitted as a plain triangle list.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Fewest segments a circle is drawn with
pub const MIN_CIRCLE_SEGMENTS: u32 = 8;

/// Segment count that keeps a circle of `radius` pixels looking round
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 1.5).ceil() as u32).clamp(MIN_CIRCLE_SEGMENTS, 64)
}

/// Filled circle as a fan of `segments` triangles
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(segments as usize * 3);

    for i in 0..segments {
        let a1 = i as f32 / segments as f32 * TAU;
        let a2 = (i + 1) as f32 / segments as f32 * TAU;
        let p1 = center + Vec2::new(a1.cos(), a1.sin()) * radius;
        let p2 = center + Vec2::new(a2.cos(), a2.sin()) * radius;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Wall drawn as a rectangle `thickness` wide, centered on the segment
pub fn wall_quad(start: Vec2, end: Vec2, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (end - start).normalize_or_zero();
    let perp = dir.perp() * (thickness * 0.5);

    let a = start + perp;
    let b = start - perp;
    let c = end + perp;
    let d = end - perp;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Axis-aligned filled rectangle (the arena background)
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let min = r.min;
    let max = r.max();
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}
