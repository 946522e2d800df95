//! Per-frame scheduling of ball updates
//!
//! Decides which balls advance on a frame and where the work runs. Every
//! policy finishes all of its work before `step` returns, so a frame never
//! leaks into the next one.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, Bounce, WallScan};
use super::geometry::Rect;
use super::wall::Wall;

/// Which balls are integrated each frame, and on which threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulePolicy {
    /// Every ball, on the calling thread
    Sequential,
    /// Every ball, split into contiguous chunks updated on the rayon pool
    FullParallel {
        /// Number of chunks; defaults to the pool's thread count
        #[serde(default)]
        workers: Option<usize>,
    },
    /// A rotating `1/interval` slice of the population per frame
    ///
    /// Each ball moves once every `interval` frames using only that frame's
    /// `dt`, so balls advance in bursts and cover less ground than under the
    /// other policies. That stutter is the price of the lower per-frame cost.
    RoundRobin { interval: u32 },
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        SchedulePolicy::FullParallel { workers: None }
    }
}

/// Counters for one scheduled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Frame number this step ran as
    pub frame: u64,
    /// Balls integrated this frame
    pub updated: usize,
    pub boundary_bounces: usize,
    pub wall_bounces: usize,
}

impl FrameStats {
    fn record(&mut self, bounce: Bounce) {
        self.updated += 1;
        if bounce.boundary {
            self.boundary_bounces += 1;
        }
        if bounce.wall.is_some() {
            self.wall_bounces += 1;
        }
    }

    fn merge(mut self, other: FrameStats) -> FrameStats {
        self.updated += other.updated;
        self.boundary_bounces += other.boundary_bounces;
        self.wall_bounces += other.wall_bounces;
        self
    }
}

/// Frame counter plus the active policy
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    policy: SchedulePolicy,
    frame: u64,
}

impl Scheduler {
    pub fn new(policy: SchedulePolicy) -> Self {
        Self { policy, frame: 0 }
    }

    #[inline]
    pub fn policy(&self) -> SchedulePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: SchedulePolicy) {
        self.policy = policy;
    }

    /// Number of frames stepped so far
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Round-robin interval, never zero
    fn interval(&self) -> u64 {
        match self.policy {
            SchedulePolicy::RoundRobin { interval } => u64::from(interval.max(1)),
            _ => 1,
        }
    }

    /// Whether ball `index` is integrated on `frame`
    pub fn selects(&self, index: usize, frame: u64) -> bool {
        let interval = self.interval();
        index as u64 % interval == frame % interval
    }

    /// Chunk length for splitting `len` balls across the workers
    pub fn chunk_len(&self, len: usize) -> usize {
        let workers = match self.policy {
            SchedulePolicy::FullParallel { workers } => {
                workers.unwrap_or_else(rayon::current_num_threads)
            }
            _ => 1,
        }
        .max(1);
        len.div_ceil(workers).max(1)
    }

    /// Integrate this frame's balls, then advance the frame counter
    ///
    /// A frame with no elapsed time is not a frame: nothing is integrated and
    /// the counter stays put, so round-robin groups keep their turn.
    pub fn step(
        &mut self,
        balls: &mut [Ball],
        boundary: &Rect,
        walls: &[Wall],
        dt: f32,
        scan: WallScan,
    ) -> FrameStats {
        let frame = self.frame;
        if dt <= 0.0 || !dt.is_finite() {
            return FrameStats {
                frame,
                ..FrameStats::default()
            };
        }

        let mut stats = match self.policy {
            SchedulePolicy::Sequential => {
                let mut stats = FrameStats::default();
                for ball in balls.iter_mut() {
                    stats.record(ball.update(boundary, walls, dt, scan));
                }
                stats
            }
            SchedulePolicy::FullParallel { .. } => {
                let chunk_len = self.chunk_len(balls.len());
                // Walls and boundary are shared read-only; chunks never overlap
                balls
                    .par_chunks_mut(chunk_len)
                    .map(|chunk| {
                        let mut stats = FrameStats::default();
                        for ball in chunk {
                            stats.record(ball.update(boundary, walls, dt, scan));
                        }
                        stats
                    })
                    .reduce(FrameStats::default, FrameStats::merge)
            }
            SchedulePolicy::RoundRobin { .. } => {
                let interval = self.interval() as usize;
                let offset = (frame % interval as u64) as usize;
                let mut stats = FrameStats::default();
                for ball in balls.iter_mut().skip(offset).step_by(interval) {
                    stats.record(ball.update(boundary, walls, dt, scan));
                }
                stats
            }
        };

        stats.frame = frame;
        self.frame += 1;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn arena() -> Rect {
        Rect::new(0.0, 0.0, 960.0, 720.0)
    }

    fn population(n: usize) -> Vec<Ball> {
        (0..n)
            .map(|i| {
                let x = 20.0 + (i % 40) as f32 * 20.0;
                let y = 20.0 + (i / 40) as f32 * 20.0;
                Ball::new(Vec2::new(x, y), 5.0, [1.0; 4], 150.0, i as f32 * 7.0)
            })
            .collect()
    }

    #[test]
    fn test_round_robin_selection() {
        let scheduler = Scheduler::new(SchedulePolicy::RoundRobin { interval: 5 });
        assert!(scheduler.selects(0, 0));
        assert!(scheduler.selects(7, 2));
        assert!(scheduler.selects(7, 12));
        assert!(!scheduler.selects(7, 3));
    }

    #[test]
    fn test_round_robin_updates_each_ball_once_per_interval() {
        let mut scheduler = Scheduler::new(SchedulePolicy::RoundRobin { interval: 5 });
        let mut balls = population(23);
        let start: Vec<Vec2> = balls.iter().map(|b| b.pos).collect();
        let mut moved_on = vec![Vec::new(); balls.len()];

        for _ in 0..5 {
            let before: Vec<Vec2> = balls.iter().map(|b| b.pos).collect();
            let stats = scheduler.step(&mut balls, &arena(), &[], 1.0 / 60.0, WallScan::Nearest);
            for (i, ball) in balls.iter().enumerate() {
                if ball.pos != before[i] {
                    moved_on[i].push(stats.frame);
                }
            }
        }

        for (i, frames) in moved_on.iter().enumerate() {
            assert_eq!(frames.len(), 1, "ball {} moved {:?}", i, frames);
            assert_eq!(frames[0] % 5, i as u64 % 5);
            assert_ne!(balls[i].pos, start[i]);
        }
        assert_eq!(scheduler.frame(), 5);
    }

    #[test]
    fn test_zero_dt_keeps_round_robin_turn() {
        let mut scheduler = Scheduler::new(SchedulePolicy::RoundRobin { interval: 5 });
        let mut balls = population(10);
        let before = balls.clone();

        let stats = scheduler.step(&mut balls, &arena(), &[], 0.0, WallScan::Nearest);
        assert_eq!(stats, FrameStats::default());
        assert_eq!(scheduler.frame(), 0);
        assert_eq!(balls, before);

        // Group 0 still moves on the next real frame
        let stats = scheduler.step(&mut balls, &arena(), &[], 1.0 / 60.0, WallScan::Nearest);
        assert_eq!(stats.frame, 0);
        assert_eq!(stats.updated, 2);
        assert_ne!(balls[0].pos, before[0].pos);
        assert_ne!(balls[5].pos, before[5].pos);
    }

    #[test]
    fn test_round_robin_zero_interval_updates_everything() {
        let mut scheduler = Scheduler::new(SchedulePolicy::RoundRobin { interval: 0 });
        let mut balls = population(10);
        let stats = scheduler.step(&mut balls, &arena(), &[], 1.0 / 60.0, WallScan::Nearest);
        assert_eq!(stats.updated, 10);
    }

    #[test]
    fn test_chunk_len_covers_population() {
        let scheduler = Scheduler::new(SchedulePolicy::FullParallel { workers: Some(4) });
        assert_eq!(scheduler.chunk_len(10), 3);
        assert_eq!(scheduler.chunk_len(0), 1);
        assert_eq!(scheduler.chunk_len(3), 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let walls = vec![
            Wall::new(Vec2::new(100.0, 10.0), Vec2::new(120.0, 400.0)).unwrap(),
            Wall::new(Vec2::new(300.0, 300.0), Vec2::new(700.0, 320.0)).unwrap(),
        ];
        let mut sequential = population(333);
        let mut parallel = sequential.clone();

        let mut seq = Scheduler::new(SchedulePolicy::Sequential);
        let mut par = Scheduler::new(SchedulePolicy::FullParallel { workers: Some(7) });
        for _ in 0..120 {
            seq.step(&mut sequential, &arena(), &walls, 1.0 / 60.0, WallScan::Nearest);
            par.step(&mut parallel, &arena(), &walls, 1.0 / 60.0, WallScan::Nearest);
        }

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_stats_count_every_ball() {
        let mut scheduler = Scheduler::new(SchedulePolicy::FullParallel { workers: None });
        let mut balls = population(50);
        let stats = scheduler.step(&mut balls, &arena(), &[], 1.0 / 60.0, WallScan::Nearest);
        assert_eq!(stats.updated, 50);
        assert_eq!(stats.frame, 0);
        assert_eq!(scheduler.frame(), 1);
    }

    #[test]
    fn test_policy_json_shape() {
        let policy: SchedulePolicy =
            serde_json::from_str(r#"{"kind":"round_robin","interval":5}"#).unwrap();
        assert_eq!(policy, SchedulePolicy::RoundRobin { interval: 5 });

        let policy: SchedulePolicy = serde_json::from_str(r#"{"kind":"full_parallel"}"#).unwrap();
        assert_eq!(policy, SchedulePolicy::FullParallel { workers: None });
    }
}
