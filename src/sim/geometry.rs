//! Line and vector geometry for ball/wall collisions
//!
//! Everything here is a pure function of its arguments.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::PARALLEL_EPSILON;

/// Axis-aligned rectangle: the arena boundary
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Whether a point lies inside the rectangle (edges included)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// Interpolation parameters `(t, u)` of the crossing of segments `p1p2` and `p3p4`
///
/// The crossing point is `p1 + t(p2 - p1) = p3 + u(p4 - p3)`. Returns `None`
/// unless both parameters are in `[0, 1]`. Parallel segments (including
/// collinear and zero-length ones) never intersect.
pub fn segment_intersect_params(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<(f32, f32)> {
    let r = p2 - p1;
    let s = p4 - p3;
    let qp = p3 - p1;

    let denominator = r.perp_dot(s);
    if denominator.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = qp.perp_dot(s) / denominator;
    let u = qp.perp_dot(r) / denominator;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some((t, u))
    } else {
        None
    }
}

/// Intersection point of segments `p1p2` and `p3p4`, if they cross
pub fn segment_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> Option<Vec2> {
    segment_intersect_params(p1, p2, p3, p4).map(|(t, _)| p1 + (p2 - p1) * t)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n, `normal` must be unit length.
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`
pub fn distance_point_to_line(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    let d = b - a;
    let len = d.length();
    if len < PARALLEL_EPSILON {
        return (p - a).length();
    }
    d.perp_dot(p - a).abs() / len
}

/// Unit normal of the segment `start -> end`
///
/// Always the left-hand perpendicular `(-d.y, d.x)`; which side that ends up
/// facing depends only on the endpoint order.
#[inline]
pub fn wall_normal(start: Vec2, end: Vec2) -> Vec2 {
    (end - start).perp().normalize_or_zero()
}

/// Flip `normal` so it opposes `velocity` (`velocity · result <= 0`)
#[inline]
pub fn facing(normal: Vec2, velocity: Vec2) -> Vec2 {
    if velocity.dot(normal) > 0.0 { -normal } else { normal }
}
