//! Ball entity and the per-ball integration step

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, facing, reflect, segment_intersect_params};
use super::spawn::BallSpec;
use super::wall::Wall;
use crate::error::SpawnError;
use crate::{degrees_of, velocity_from_polar};

/// How a ball picks the wall it bounces off when its path crosses several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallScan {
    /// First wall in registry order whose segment the path crosses
    FirstInOrder,
    /// Wall crossed closest to the start of the path
    #[default]
    Nearest,
}

/// What a single update bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounce {
    /// A boundary edge flipped a velocity component
    pub boundary: bool,
    /// Registry index of the wall that reflected the ball
    pub wall: Option<usize>,
}

/// A ball. `pos` is the circle center, Y grows downward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// RGBA, cosmetic only
    pub color: [f32; 4],
}

impl Ball {
    /// Create a ball moving at `speed` in the direction `angle_degrees`
    pub fn new(center: Vec2, radius: f32, color: [f32; 4], speed: f32, angle_degrees: f32) -> Self {
        Self {
            pos: center,
            vel: velocity_from_polar(speed, angle_degrees),
            radius,
            color,
        }
    }

    /// Create a ball from a spawn spec, checking radius and speed
    pub fn from_spec(spec: &BallSpec) -> Result<Self, SpawnError> {
        let finite = [spec.x, spec.y, spec.radius, spec.speed, spec.angle_degrees]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(SpawnError::NonFinite);
        }
        if spec.radius <= 0.0 {
            return Err(SpawnError::InvalidRadius(spec.radius));
        }
        if spec.speed < 0.0 {
            return Err(SpawnError::InvalidSpeed(spec.speed));
        }
        Ok(Self::new(
            Vec2::new(spec.x, spec.y),
            spec.radius,
            spec.color,
            spec.speed,
            spec.angle_degrees,
        ))
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Heading in degrees
    pub fn angle_degrees(&self) -> f32 {
        degrees_of(self.vel)
    }

    /// Advance the ball by `dt` seconds against the arena boundary and the walls
    ///
    /// The boundary is resolved first on both axes, then the (clamped) path is
    /// tested against the walls. Only one wall is resolved per call. When the
    /// path hits a wall the wall wins: the edge flip is discarded, the velocity
    /// the ball arrived with is reflected, and the ball backs off along it.
    pub fn update(&mut self, boundary: &Rect, walls: &[Wall], dt: f32, scan: WallScan) -> Bounce {
        let mut bounce = Bounce::default();
        if dt <= 0.0 || !dt.is_finite() {
            return bounce;
        }

        let incoming = self.vel;
        let mut end = self.pos + incoming * dt;
        bounce.boundary = self.clamp_to(boundary, &mut end);

        if let Some((index, hit)) = first_wall_hit(self.pos, end, walls, scan) {
            let normal = facing(walls[index].normal(), incoming);
            self.vel = reflect(incoming, normal);
            // Back off along the incoming path so the next frame starts in front of the wall
            self.pos = self.inside(boundary, hit - incoming * (0.5 * dt));
            bounce.wall = Some(index);
        } else {
            self.pos = end;
        }

        bounce
    }

    /// `p` pulled into the radius-inset arena, without touching the velocity
    fn inside(&self, boundary: &Rect, p: Vec2) -> Vec2 {
        let min = boundary.min + Vec2::splat(self.radius);
        let max = boundary.max() - Vec2::splat(self.radius);
        let center = boundary.center();
        let mut out = p;
        for axis in 0..2 {
            out[axis] = if min[axis] > max[axis] {
                center[axis]
            } else {
                p[axis].clamp(min[axis], max[axis])
            };
        }
        out
    }

    /// Clamp `end` so the circle stays inside `boundary`, flipping velocity on
    /// each axis that was violated. Returns whether anything was clamped.
    fn clamp_to(&mut self, boundary: &Rect, end: &mut Vec2) -> bool {
        let min = boundary.min + Vec2::splat(self.radius);
        let max = boundary.max() - Vec2::splat(self.radius);
        let center = boundary.center();
        let mut clamped = false;

        for axis in 0..2 {
            if min[axis] > max[axis] {
                // Arena narrower than the ball on this axis
                end[axis] = center[axis];
                continue;
            }
            if end[axis] < min[axis] {
                end[axis] = min[axis];
                self.vel[axis] = -self.vel[axis];
                clamped = true;
            } else if end[axis] > max[axis] {
                end[axis] = max[axis];
                self.vel[axis] = -self.vel[axis];
                clamped = true;
            }
        }

        clamped
    }
}

/// Wall crossed by the path `from -> to`, with the crossing point
fn first_wall_hit(from: Vec2, to: Vec2, walls: &[Wall], scan: WallScan) -> Option<(usize, Vec2)> {
    if from == to {
        return None;
    }

    let mut best: Option<(usize, f32)> = None;
    for (index, wall) in walls.iter().enumerate() {
        let Some((t, _)) = segment_intersect_params(from, to, wall.start(), wall.end()) else {
            continue;
        };
        match scan {
            WallScan::FirstInOrder => {
                best = Some((index, t));
                break;
            }
            WallScan::Nearest => {
                if best.is_none_or(|(_, best_t)| t < best_t) {
                    best = Some((index, t));
                }
            }
        }
    }

    best.map(|(index, t)| (index, from + (to - from) * t))
}
