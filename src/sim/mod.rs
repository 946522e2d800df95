//! Motion and collision core
//!
//! Pure physics: no rendering, no input parsing, no platform dependencies.
//! - Position is the circle center, Y grows downward
//! - Balls never collide with each other
//! - One trajectory segment is checked per ball per frame

pub mod ball;
pub mod geometry;
pub mod obstacles;
pub mod scheduler;
pub mod simulation;
pub mod spawn;
pub mod wall;

pub use ball::{Ball, Bounce, WallScan};
pub use geometry::{
    Rect, distance_point_to_line, facing, reflect, segment_intersect, segment_intersect_params,
    wall_normal,
};
pub use obstacles::ObstacleRegistry;
pub use scheduler::{FrameStats, SchedulePolicy, Scheduler};
pub use simulation::Simulation;
pub use spawn::{BallSpec, BatchSpawn, SpawnRequest, Sweep, interpolation_t};
pub use wall::Wall;
