//! Static line-segment walls

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::wall_normal;
use crate::error::SpawnError;

/// A wall segment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    start: Vec2,
    end: Vec2,
}

impl Wall {
    /// Create a wall, rejecting zero-length and non-finite segments
    pub fn new(start: Vec2, end: Vec2) -> Result<Self, SpawnError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SpawnError::NonFinite);
        }
        if start == end {
            return Err(SpawnError::DegenerateWall);
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.end
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        self.direction().length()
    }

    /// Rotation of the wall in radians (for drawing it as a rotated rectangle)
    pub fn angle(&self) -> f32 {
        let d = self.direction();
        d.y.atan2(d.x)
    }

    pub fn midpoint(&self) -> Vec2 {
        (self.start + self.end) * 0.5
    }

    /// Unit normal; one of the two perpendiculars, chosen by endpoint order
    pub fn normal(&self) -> Vec2 {
        wall_normal(self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_length_wall_rejected() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(Wall::new(p, p), Err(SpawnError::DegenerateWall));
    }

    #[test]
    fn test_non_finite_wall_rejected() {
        let err = Wall::new(Vec2::new(f32::NAN, 0.0), Vec2::new(1.0, 1.0));
        assert_eq!(err, Err(SpawnError::NonFinite));
    }

    #[test]
    fn test_wall_shape() {
        let wall = Wall::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0)).unwrap();
        assert!((wall.length() - 10.0).abs() < 1e-5);
        assert!((wall.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(wall.midpoint(), Vec2::new(0.0, 5.0));
        let n = wall.normal();
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(n.y.abs() < 1e-5);
    }
}
