//! The simulation aggregate: arena, balls, walls and scheduler in one place
//!
//! Lock order is scheduler, then balls, then walls. `step_frame` holds the
//! ball lock for the whole update, so spawns and render snapshots only ever
//! see whole frames.

use std::ops::Range;

use glam::Vec2;
use parking_lot::{Mutex, RwLock};

use super::ball::Ball;
use super::geometry::Rect;
use super::obstacles::ObstacleRegistry;
use super::scheduler::{FrameStats, SchedulePolicy, Scheduler};
use super::spawn::{BallSpec, BatchSpawn, SpawnRequest};
use crate::error::SpawnError;
use crate::renderer::{BallView, RenderSnapshot, WallView};
use crate::settings::{OverflowPolicy, SimConfig};

/// Everything that moves or blocks movement, shareable across threads
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    scheduler: Mutex<Scheduler>,
    balls: Mutex<Vec<Ball>>,
    walls: RwLock<ObstacleRegistry>,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let scheduler = Scheduler::new(config.schedule);
        Self {
            config,
            scheduler: Mutex::new(scheduler),
            balls: Mutex::new(Vec::new()),
            walls: RwLock::new(ObstacleRegistry::new()),
        }
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn boundary(&self) -> &Rect {
        &self.config.arena
    }

    pub fn ball_count(&self) -> usize {
        self.balls.lock().len()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.read().len()
    }

    /// Frames stepped so far
    pub fn frame(&self) -> u64 {
        self.scheduler.lock().frame()
    }

    pub fn policy(&self) -> SchedulePolicy {
        self.scheduler.lock().policy()
    }

    /// Switch scheduling policy; takes effect on the next frame
    pub fn set_policy(&self, policy: SchedulePolicy) {
        log::info!("Schedule policy -> {:?}", policy);
        self.scheduler.lock().set_policy(policy);
    }

    /// Copy of every ball's current state
    pub fn balls(&self) -> Vec<Ball> {
        self.balls.lock().clone()
    }

    /// Spawn one ball. Its center must lie inside the arena.
    pub fn spawn_ball(&self, spec: BallSpec) -> Result<usize, SpawnError> {
        let ball = self.checked_ball(&spec)?;
        let mut balls = self.balls.lock();
        self.make_room(&mut balls, 1)?;
        balls.push(ball);
        log::debug!("Spawned ball at ({}, {}), {} total", spec.x, spec.y, balls.len());
        Ok(balls.len() - 1)
    }

    /// Spawn a batch of balls. Nothing is spawned unless every ball is valid.
    pub fn spawn_ball_batch(&self, batch: &BatchSpawn) -> Result<Range<usize>, SpawnError> {
        let new_balls = batch
            .specs()?
            .iter()
            .map(|spec| self.checked_ball(spec))
            .collect::<Result<Vec<_>, _>>()?;

        let mut balls = self.balls.lock();
        self.make_room(&mut balls, new_balls.len())?;
        let start = balls.len();
        balls.extend(new_balls);
        log::debug!("Spawned batch of {}, {} total", batch.count, balls.len());
        Ok(start..balls.len())
    }

    /// Spawn a wall between two points inside the arena
    pub fn spawn_wall(&self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<usize, SpawnError> {
        let index = self
            .walls
            .write()
            .add_wall(&self.config.arena, Vec2::new(x1, y1), Vec2::new(x2, y2))?;
        log::debug!("Spawned wall ({}, {}) -> ({}, {})", x1, y1, x2, y2);
        Ok(index)
    }

    /// Apply a request produced by the input translator
    pub fn apply(&self, request: SpawnRequest) -> Result<(), SpawnError> {
        match request {
            SpawnRequest::Ball(spec) => self.spawn_ball(spec).map(|_| ()),
            SpawnRequest::Batch(batch) => self.spawn_ball_batch(&batch).map(|_| ()),
            SpawnRequest::Wall { start, end } => {
                self.spawn_wall(start.x, start.y, end.x, end.y).map(|_| ())
            }
        }
    }

    /// Advance the population by one frame under the active policy
    ///
    /// Returns once every scheduled ball has been integrated. Frames with no
    /// elapsed time leave the frame counter alone.
    pub fn step_frame(&self, dt: f32) -> FrameStats {
        debug_assert!(dt >= 0.0 && dt.is_finite(), "frame delta must be >= 0, got {}", dt);

        let mut scheduler = self.scheduler.lock();
        if dt < 0.0 || !dt.is_finite() {
            log::warn!("Ignoring frame with delta {}", dt);
            return FrameStats {
                frame: scheduler.frame(),
                ..FrameStats::default()
            };
        }

        let mut balls = self.balls.lock();
        let walls = self.walls.read();
        scheduler.step(
            &mut balls,
            &self.config.arena,
            walls.walls(),
            dt,
            self.config.wall_scan,
        )
    }

    /// Current geometry for drawing
    ///
    /// Takes the locks in the same order as `step_frame`, so `frame` always
    /// matches the positions it is returned with.
    pub fn snapshot_for_render(&self) -> RenderSnapshot {
        let scheduler = self.scheduler.lock();
        let balls = self.balls.lock();
        let walls = self.walls.read();
        RenderSnapshot {
            frame: scheduler.frame(),
            balls: balls
                .iter()
                .map(|b| BallView {
                    center: b.pos,
                    radius: b.radius,
                    color: b.color,
                })
                .collect(),
            walls: walls
                .iter()
                .map(|w| WallView {
                    start: w.start(),
                    end: w.end(),
                })
                .collect(),
        }
    }

    fn checked_ball(&self, spec: &BallSpec) -> Result<Ball, SpawnError> {
        let ball = Ball::from_spec(spec)?;
        if !self.config.arena.contains(ball.pos) {
            return Err(SpawnError::OutOfArena);
        }
        Ok(ball)
    }

    /// Enforce the population cap before adding `incoming` balls
    fn make_room(&self, balls: &mut Vec<Ball>, incoming: usize) -> Result<(), SpawnError> {
        let Some(max) = self.config.max_balls else {
            return Ok(());
        };
        let total = balls.len() + incoming;
        if total <= max {
            return Ok(());
        }
        match self.config.overflow {
            OverflowPolicy::EvictOldest if incoming <= max => {
                let excess = total - max;
                balls.drain(..excess);
                log::debug!("Evicted {} oldest balls", excess);
                Ok(())
            }
            _ => Err(SpawnError::PopulationFull { max }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::sim::Sweep;

    const PINK: [f32; 4] = [0.98, 0.81, 0.91, 1.0];

    fn sim() -> Simulation {
        Simulation::new(SimConfig::default())
    }

    fn spec(x: f32, y: f32) -> BallSpec {
        BallSpec::new(x, y, 10.0, PINK, 120.0, 30.0)
    }

    #[test]
    fn test_spawn_ball_appends() {
        let sim = sim();
        assert_eq!(sim.spawn_ball(spec(100.0, 100.0)), Ok(0));
        assert_eq!(sim.spawn_ball(spec(200.0, 100.0)), Ok(1));
        assert_eq!(sim.ball_count(), 2);
    }

    #[test]
    fn test_spawn_ball_outside_arena_rejected() {
        let sim = sim();
        assert_eq!(sim.spawn_ball(spec(2000.0, 100.0)), Err(SpawnError::OutOfArena));
        assert_eq!(sim.ball_count(), 0);
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let sim = sim();
        // Line runs off the right edge of the arena
        let batch = BatchSpawn {
            count: 4,
            base: spec(900.0, 100.0),
            sweep: Sweep::Line { end_x: 1200.0, end_y: 100.0 },
        };
        assert_eq!(sim.spawn_ball_batch(&batch), Err(SpawnError::OutOfArena));
        assert_eq!(sim.ball_count(), 0);

        let batch = BatchSpawn {
            count: 4,
            base: spec(100.0, 100.0),
            sweep: Sweep::Line { end_x: 400.0, end_y: 100.0 },
        };
        assert_eq!(sim.spawn_ball_batch(&batch), Ok(0..4));
    }

    #[test]
    fn test_wall_rejection_leaves_registry_unchanged() {
        let sim = sim();
        sim.spawn_wall(10.0, 10.0, 100.0, 100.0).unwrap();
        assert_eq!(sim.spawn_wall(10.0, 10.0, 5000.0, 100.0), Err(SpawnError::OutOfArena));
        assert_eq!(sim.wall_count(), 1);
    }

    #[test]
    fn test_population_cap_rejects() {
        let config = SimConfig {
            max_balls: Some(2),
            ..SimConfig::default()
        };
        let sim = Simulation::new(config);
        sim.spawn_ball(spec(100.0, 100.0)).unwrap();
        sim.spawn_ball(spec(110.0, 100.0)).unwrap();
        assert_eq!(
            sim.spawn_ball(spec(120.0, 100.0)),
            Err(SpawnError::PopulationFull { max: 2 })
        );
        assert_eq!(sim.ball_count(), 2);
    }

    #[test]
    fn test_population_cap_evicts_oldest() {
        let config = SimConfig {
            max_balls: Some(2),
            overflow: OverflowPolicy::EvictOldest,
            ..SimConfig::default()
        };
        let sim = Simulation::new(config);
        for x in [100.0, 110.0, 120.0] {
            sim.spawn_ball(spec(x, 100.0)).unwrap();
        }
        let xs: Vec<f32> = sim.balls().iter().map(|b| b.pos.x).collect();
        assert_eq!(xs, vec![110.0, 120.0]);
    }

    #[test]
    fn test_step_frame_moves_balls() {
        let sim = sim();
        sim.spawn_ball(BallSpec::new(100.0, 100.0, 10.0, PINK, 60.0, 0.0)).unwrap();
        let stats = sim.step_frame(0.5);
        assert_eq!(stats.updated, 1);
        assert!((sim.balls()[0].pos.x - 130.0).abs() < 1e-3);
        assert_eq!(sim.frame(), 1);
    }

    #[test]
    fn test_zero_dt_frame_is_not_counted() {
        let sim = sim();
        sim.spawn_ball(spec(100.0, 100.0)).unwrap();
        let stats = sim.step_frame(0.0);
        assert_eq!(stats.updated, 0);
        assert_eq!(sim.frame(), 0);
        assert_eq!(sim.balls()[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_snapshot_frame_matches_positions_while_stepping() {
        // One pixel per frame along x, exact in f32
        let sim = Arc::new(sim());
        sim.spawn_ball(BallSpec::new(100.0, 100.0, 10.0, PINK, 2.0, 0.0)).unwrap();

        let stepper = {
            let sim = Arc::clone(&sim);
            thread::spawn(move || {
                for _ in 0..500 {
                    sim.step_frame(0.5);
                }
            })
        };
        for _ in 0..500 {
            let snapshot = sim.snapshot_for_render();
            assert_eq!(snapshot.balls[0].center.x, 100.0 + snapshot.frame as f32);
        }
        stepper.join().unwrap();
        assert_eq!(sim.frame(), 500);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let sim = sim();
        sim.spawn_ball(spec(100.0, 100.0)).unwrap();
        sim.spawn_wall(10.0, 10.0, 100.0, 10.0).unwrap();
        let snapshot = sim.snapshot_for_render();
        assert_eq!(snapshot.balls.len(), 1);
        assert_eq!(snapshot.balls[0].center, Vec2::new(100.0, 100.0));
        assert_eq!(snapshot.walls[0].end, Vec2::new(100.0, 10.0));
    }

    #[test]
    fn test_apply_dispatches_requests() {
        let sim = sim();
        sim.apply(SpawnRequest::Ball(spec(50.0, 50.0))).unwrap();
        sim.apply(SpawnRequest::Wall {
            start: Vec2::new(1.0, 1.0),
            end: Vec2::new(2.0, 2.0),
        })
        .unwrap();
        assert_eq!((sim.ball_count(), sim.wall_count()), (1, 1));
    }

    #[test]
    fn test_apply_returns_rejection_untouched() {
        let sim = sim();
        let result = sim.apply(SpawnRequest::Wall {
            start: Vec2::new(10.0, 10.0),
            end: Vec2::new(5000.0, 10.0),
        });
        assert_eq!(result, Err(SpawnError::OutOfArena));
        assert_eq!(sim.wall_count(), 0);
    }

    #[test]
    fn test_set_policy() {
        let sim = sim();
        sim.set_policy(SchedulePolicy::RoundRobin { interval: 3 });
        assert_eq!(sim.policy(), SchedulePolicy::RoundRobin { interval: 3 });
    }
}
