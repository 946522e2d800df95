//! Spawn specifications for single balls and interpolated batches

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SpawnError;
use crate::lerp;

/// Parameters of one ball, in core coordinates (center, Y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallSpec {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: [f32; 4],
    pub speed: f32,
    pub angle_degrees: f32,
}

impl BallSpec {
    pub fn new(
        x: f32,
        y: f32,
        radius: f32,
        color: [f32; 4],
        speed: f32,
        angle_degrees: f32,
    ) -> Self {
        Self {
            x,
            y,
            radius,
            color,
            speed,
            angle_degrees,
        }
    }
}

/// The parameter a batch varies; the start value comes from the base spec
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Sweep {
    /// Spawn point moves along a line to `(end_x, end_y)`
    Line { end_x: f32, end_y: f32 },
    /// Launch angle fans out to `end_degrees`
    Angle { end_degrees: f32 },
    /// Speed ramps to `end_speed`
    Speed { end_speed: f32 },
}

/// `count` balls interpolated linearly from `base` to the sweep's end value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchSpawn {
    pub count: usize,
    pub base: BallSpec,
    pub sweep: Sweep,
}

/// A validated request from the UI, ready for the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpawnRequest {
    Ball(BallSpec),
    Batch(BatchSpawn),
    Wall { start: Vec2, end: Vec2 },
}

/// Interpolation parameter of ball `i` out of `count` (0 for a single ball)
#[inline]
pub fn interpolation_t(i: usize, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        i as f32 / (count - 1) as f32
    }
}

impl BatchSpawn {
    /// Specs for every ball in the batch, both endpoints included
    pub fn specs(&self) -> Result<Vec<BallSpec>, SpawnError> {
        if self.count == 0 {
            return Err(SpawnError::EmptyBatch);
        }

        let base = self.base;
        let specs = (0..self.count)
            .map(|i| {
                let t = interpolation_t(i, self.count);
                let mut spec = base;
                match self.sweep {
                    Sweep::Line { end_x, end_y } => {
                        spec.x = lerp(base.x, end_x, t);
                        spec.y = lerp(base.y, end_y, t);
                    }
                    Sweep::Angle { end_degrees } => {
                        spec.angle_degrees = lerp(base.angle_degrees, end_degrees, t);
                    }
                    Sweep::Speed { end_speed } => {
                        spec.speed = lerp(base.speed, end_speed, t);
                    }
                }
                spec
            })
            .collect();

        Ok(specs)
    }
}
