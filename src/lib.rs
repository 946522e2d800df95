//! Bouncy Ball - balls bouncing around a rectangular arena with line walls
//!
//! Core modules:
//! - `sim`: Motion and collision core (geometry, balls, walls, scheduling)
//! - `input`: Translation of UI text input into validated spawn requests
//! - `renderer`: Snapshot to vertex data for whatever draws the frame
//! - `settings`: Data-driven simulation configuration
//! - `error`: Spawn, input and config errors

pub mod error;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, InputError, SpawnError};
pub use settings::{SchedulePreset, SimConfig};
pub use sim::Simulation;

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Desktop window size the arena defaults are derived from
    pub const WINDOW_WIDTH: f32 = 1280.0;
    pub const WINDOW_HEIGHT: f32 = 720.0;
    /// Sidebar holding the spawn forms, to the right of the arena
    pub const SIDEBAR_WIDTH: f32 = 320.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;

    /// Rendered wall thickness (pixels)
    pub const WALL_THICKNESS: f32 = 2.0;

    /// Frames between updates of the same ball under round-robin scheduling
    pub const UPDATE_INTERVAL: u32 = 5;

    /// Frame-rate cap of the frame loop
    pub const FRAME_RATE: u32 = 60;

    /// How long an input error stays on screen (seconds)
    pub const ERROR_DISPLAY_SECS: f32 = 3.0;

    /// Segment-intersection denominators below this are treated as parallel
    pub const PARALLEL_EPSILON: f32 = 1e-6;
}

/// Unit vector for an angle given in degrees
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Velocity vector from a speed and an angle in degrees
#[inline]
pub fn velocity_from_polar(speed: f32, degrees: f32) -> Vec2 {
    direction_from_degrees(degrees) * speed
}

/// Angle of a vector in degrees, in (-180, 180]
#[inline]
pub fn degrees_of(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}

/// Linear interpolation between two scalars
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_from_polar() {
        let v = velocity_from_polar(10.0, 90.0);
        assert!(v.x.abs() < 1e-4);
        assert!((v.y - 10.0).abs() < 1e-4);

        let v = velocity_from_polar(5.0, 180.0);
        assert!((v.x + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_degrees_of_roundtrips_direction() {
        let d = degrees_of(direction_from_degrees(45.0));
        assert!((d - 45.0).abs() < 1e-3);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
    }
}
