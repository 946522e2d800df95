//! Bouncy Ball entry point
//!
//! Runs the simulation headless at the configured frame-rate cap and logs
//! per-second statistics. Windowing and the sidebar live in a separate UI.
//!
//! Usage: bouncy-ball [config.json] [--frames N] [--balls N] [--seed S]

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use bouncy_ball::input::{
    BallForm, BatchForm, CoordinateFrame, ErrorBanner, SweepForm, WallForm, submit,
};
use bouncy_ball::renderer::{build_frame, colors, vertex_bytes};
use bouncy_ball::{SimConfig, Simulation};

/// Command-line options
struct Options {
    config_path: Option<String>,
    frames: u64,
    balls: usize,
    seed: u64,
}

impl Options {
    fn parse() -> Result<Self, String> {
        let mut options = Options {
            config_path: None,
            frames: 600,
            balls: 200,
            seed: 12345,
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .ok_or_else(|| format!("{} needs a value", name))
            };
            match arg.as_str() {
                "--frames" => {
                    options.frames = value(&arg)?.parse().map_err(|e| format!("{}: {}", arg, e))?
                }
                "--balls" => {
                    options.balls = value(&arg)?.parse().map_err(|e| format!("{}: {}", arg, e))?
                }
                "--seed" => {
                    options.seed = value(&arg)?.parse().map_err(|e| format!("{}: {}", arg, e))?
                }
                other if other.starts_with("--") => return Err(format!("unknown option {}", other)),
                path => options.config_path = Some(path.to_string()),
            }
        }

        Ok(options)
    }
}

/// Fill the arena the way a user at the sidebar would
fn seed_scene(sim: &Simulation, options: &Options, banner: &mut ErrorBanner) {
    let config = sim.config();
    let frame = CoordinateFrame::new(config.arena, config.y_up);
    let size = config.arena.size;
    let mut rng = Pcg32::seed_from_u64(options.seed);

    let walls = [
        (size.x * 0.25, size.y * 0.2, size.x * 0.25, size.y * 0.8),
        (size.x * 0.5, size.y * 0.5, size.x * 0.9, size.y * 0.6),
        (size.x * 0.6, size.y * 0.1, size.x * 0.8, size.y * 0.3),
    ];
    for (x1, y1, x2, y2) in walls {
        let form = WallForm {
            x1: x1.to_string(),
            y1: y1.to_string(),
            x2: x2.to_string(),
            y2: y2.to_string(),
        };
        submit(sim, banner, form.to_request(&frame));
    }

    // One batch sweeping launch angles from the middle of the arena
    let batch = BatchForm {
        count: "36".into(),
        x: (size.x * 0.5).to_string(),
        y: (size.y * 0.5).to_string(),
        angle: "0".into(),
        speed: "180".into(),
        sweep: SweepForm::Angle { end: "350".into() },
    };
    submit(sim, banner, batch.to_request(&frame, config.ball_radius, colors::PINK3));

    let radius = config.ball_radius;
    if size.x <= 2.0 * radius || size.y <= 2.0 * radius {
        return;
    }
    for _ in 0..options.balls {
        let form = BallForm {
            x: rng.random_range(radius..size.x - radius).to_string(),
            y: rng.random_range(radius..size.y - radius).to_string(),
            angle: rng.random_range(0.0f32..360.0).to_string(),
            speed: rng.random_range(50.0f32..300.0).to_string(),
        };
        let color = colors::BALL_PALETTE[rng.random_range(0..colors::BALL_PALETTE.len())];
        submit(sim, banner, form.to_request(&frame, radius, color));
    }
}

fn run(options: Options) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &options.config_path {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    log::info!(
        "Arena {}x{}, schedule {:?}, {} fps cap",
        config.arena.size.x,
        config.arena.size.y,
        config.schedule,
        config.frame_rate
    );

    let sim = Simulation::new(config);
    let mut banner = ErrorBanner::default();
    seed_scene(&sim, &options, &mut banner);
    log::info!("Scene ready: {} balls, {} walls", sim.ball_count(), sim.wall_count());

    let frame_budget = Duration::from_secs_f32(sim.config().frame_duration());
    let mut last = Instant::now();
    let mut window_start = last;
    let mut window_frames = 0u32;
    let mut window_wall_bounces = 0usize;
    let mut vertex_bytes_total = 0usize;

    for _ in 0..options.frames {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last).as_secs_f32().min(0.1);
        last = frame_start;

        let stats = sim.step_frame(dt);
        banner.tick(dt);

        // Render pass: runs only after the update has fully joined
        let snapshot = sim.snapshot_for_render();
        let vertices = build_frame(&snapshot, sim.boundary());
        vertex_bytes_total = vertex_bytes(&vertices).len();

        window_frames += 1;
        window_wall_bounces += stats.wall_bounces;
        if frame_start.duration_since(window_start) >= Duration::from_secs(1) {
            log::info!(
                "frame {}: {} fps, {} wall bounces, {} balls, {} KiB vertices",
                stats.frame,
                window_frames,
                window_wall_bounces,
                snapshot.balls.len(),
                vertex_bytes_total / 1024
            );
            window_start = frame_start;
            window_frames = 0;
            window_wall_bounces = 0;
        }

        if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    log::info!(
        "Finished {} frames, last frame {} bytes of vertex data",
        sim.frame(),
        vertex_bytes_total
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Bouncy Ball (headless) starting...");

    let options = match Options::parse() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: bouncy-ball [config.json] [--frames N] [--balls N] [--seed S]");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(options) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
