//! Simulation settings
//!
//! Loaded from JSON at startup; every field has a default so partial files work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::renderer::vertex::colors;
use crate::sim::{Rect, SchedulePolicy, WallScan};

/// Scheduling presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SchedulePreset {
    /// Every ball every frame, across all cores
    #[default]
    Accurate,
    /// Round-robin partial updates for very large populations
    Throughput,
}

impl SchedulePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulePreset::Accurate => "Accurate",
            SchedulePreset::Throughput => "Throughput",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "accurate" => Some(SchedulePreset::Accurate),
            "throughput" | "fast" => Some(SchedulePreset::Throughput),
            _ => None,
        }
    }

    /// Scheduling policy for this preset
    pub fn policy(&self) -> SchedulePolicy {
        match self {
            SchedulePreset::Accurate => SchedulePolicy::FullParallel { workers: None },
            SchedulePreset::Throughput => SchedulePolicy::RoundRobin {
                interval: UPDATE_INTERVAL,
            },
        }
    }
}

/// What happens when a spawn would exceed `max_balls`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OverflowPolicy {
    /// Refuse the new balls
    #[default]
    Reject,
    /// Drop the oldest balls to make room
    EvictOldest,
}

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Arena boundary in window pixels
    pub arena: Rect,

    // === Spawning ===
    /// Radius given to balls spawned from the sidebar
    pub ball_radius: f32,
    /// Color given to balls spawned from the sidebar
    pub ball_color: [f32; 4],
    /// Population cap (None = unbounded)
    pub max_balls: Option<usize>,
    /// Behavior at the cap
    pub overflow: OverflowPolicy,

    // === Physics ===
    /// Which balls update each frame
    pub schedule: SchedulePolicy,
    /// Which wall wins when a path crosses several
    pub wall_scan: WallScan,

    // === Frame loop ===
    /// Frame-rate cap
    pub frame_rate: u32,

    // === Input ===
    /// Users type Y measured from the bottom of the arena
    pub y_up: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena: Rect::new(0.0, 0.0, WINDOW_WIDTH - SIDEBAR_WIDTH, WINDOW_HEIGHT),

            ball_radius: BALL_RADIUS,
            ball_color: colors::PINK2,
            max_balls: None,
            overflow: OverflowPolicy::Reject,

            schedule: SchedulePolicy::default(),
            wall_scan: WallScan::default(),

            frame_rate: FRAME_RATE,

            y_up: true,
        }
    }
}

impl SimConfig {
    /// Create settings from a schedule preset
    pub fn from_preset(preset: SchedulePreset) -> Self {
        Self {
            schedule: preset.policy(),
            ..Self::default()
        }
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena.size.x > 0.0 && self.arena.size.y > 0.0) || !self.arena.min.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "arena must have a positive size (got {}x{})",
                self.arena.size.x, self.arena.size.y
            )));
        }
        if !(self.ball_radius > 0.0) || !self.ball_radius.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "ball_radius must be positive (got {})",
                self.ball_radius
            )));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be at least 1".into()));
        }
        if let SchedulePolicy::RoundRobin { interval: 0 } = self.schedule {
            return Err(ConfigError::Invalid(
                "round robin interval must be at least 1".into(),
            ));
        }
        if let SchedulePolicy::FullParallel { workers: Some(0) } = self.schedule {
            return Err(ConfigError::Invalid("workers must be at least 1".into()));
        }
        if self.max_balls == Some(0) {
            return Err(ConfigError::Invalid("max_balls must be at least 1".into()));
        }
        Ok(())
    }

    /// Seconds per frame at the frame-rate cap
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}
