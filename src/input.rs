//! Spawn-request translation
//!
//! The sidebar hands over raw text fields. This module parses them, converts
//! user coordinates (arena-relative, optionally Y-up) into core coordinates,
//! and reports failures through a short-lived error banner. Nothing reaches
//! the simulation unless the whole form is valid.

use glam::Vec2;

use crate::consts::ERROR_DISPLAY_SECS;
use crate::error::InputError;
use crate::sim::{BallSpec, BatchSpawn, Rect, Simulation, SpawnRequest, Sweep};

/// Parse a numeric text field
pub fn parse_number(field: &'static str, text: &str) -> Result<f32, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty { field });
    }
    match trimmed.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InputError::NotANumber {
            field,
            text: text.to_string(),
        }),
    }
}

/// Parse a numeric field that must not be negative
pub fn parse_non_negative(field: &'static str, text: &str) -> Result<f32, InputError> {
    let v = parse_number(field, text)?;
    if v < 0.0 {
        return Err(InputError::Negative { field });
    }
    Ok(v)
}

/// Parse a ball count (a whole number of at least 1)
pub fn parse_count(field: &'static str, text: &str) -> Result<usize, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty { field });
    }
    match trimmed.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(InputError::NotACount {
            field,
            text: text.to_string(),
        }),
    }
}

/// Mapping between what the user types and core coordinates
///
/// Users give positions relative to the arena's corner. With `y_up` the Y axis
/// is measured from the bottom edge and angles turn counter-clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateFrame {
    pub arena: Rect,
    pub y_up: bool,
}

impl CoordinateFrame {
    pub fn new(arena: Rect, y_up: bool) -> Self {
        Self { arena, y_up }
    }

    pub fn to_core(&self, x: f32, y: f32) -> Vec2 {
        let y = if self.y_up { self.arena.size.y - y } else { y };
        self.arena.min + Vec2::new(x, y)
    }

    pub fn to_user(&self, p: Vec2) -> Vec2 {
        let local = p - self.arena.min;
        if self.y_up {
            Vec2::new(local.x, self.arena.size.y - local.y)
        } else {
            local
        }
    }

    pub fn angle_to_core(&self, degrees: f32) -> f32 {
        if self.y_up { -degrees } else { degrees }
    }
}

/// Text fields of the single-ball form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BallForm {
    pub x: String,
    pub y: String,
    pub angle: String,
    pub speed: String,
}

impl BallForm {
    fn base_spec(
        frame: &CoordinateFrame,
        (x, y, angle, speed): (&str, &str, &str, &str),
        radius: f32,
        color: [f32; 4],
    ) -> Result<BallSpec, InputError> {
        let x = parse_number("X", x)?;
        let y = parse_number("Y", y)?;
        let angle = parse_number("Angle", angle)?;
        let speed = parse_non_negative("Velocity", speed)?;
        let center = frame.to_core(x, y);
        Ok(BallSpec::new(
            center.x,
            center.y,
            radius,
            color,
            speed,
            frame.angle_to_core(angle),
        ))
    }

    pub fn to_request(
        &self,
        frame: &CoordinateFrame,
        radius: f32,
        color: [f32; 4],
    ) -> Result<SpawnRequest, InputError> {
        let fields = (
            self.x.as_str(),
            self.y.as_str(),
            self.angle.as_str(),
            self.speed.as_str(),
        );
        Self::base_spec(frame, fields, radius, color).map(SpawnRequest::Ball)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Text fields of the wall form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallForm {
    pub x1: String,
    pub y1: String,
    pub x2: String,
    pub y2: String,
}

impl WallForm {
    pub fn to_request(&self, frame: &CoordinateFrame) -> Result<SpawnRequest, InputError> {
        let x1 = parse_number("X1", &self.x1)?;
        let y1 = parse_number("Y1", &self.y1)?;
        let x2 = parse_number("X2", &self.x2)?;
        let y2 = parse_number("Y2", &self.y2)?;
        Ok(SpawnRequest::Wall {
            start: frame.to_core(x1, y1),
            end: frame.to_core(x2, y2),
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The varying parameter of the batch form
#[derive(Debug, Clone, PartialEq)]
pub enum SweepForm {
    Line { end_x: String, end_y: String },
    Angle { end: String },
    Speed { end: String },
}

impl Default for SweepForm {
    fn default() -> Self {
        SweepForm::Line {
            end_x: String::new(),
            end_y: String::new(),
        }
    }
}

/// Text fields of the batch form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchForm {
    pub count: String,
    pub x: String,
    pub y: String,
    pub angle: String,
    pub speed: String,
    pub sweep: SweepForm,
}

impl BatchForm {
    pub fn to_request(
        &self,
        frame: &CoordinateFrame,
        radius: f32,
        color: [f32; 4],
    ) -> Result<SpawnRequest, InputError> {
        let count = parse_count("Count", &self.count)?;
        let fields = (
            self.x.as_str(),
            self.y.as_str(),
            self.angle.as_str(),
            self.speed.as_str(),
        );
        let base = BallForm::base_spec(frame, fields, radius, color)?;

        let sweep = match &self.sweep {
            SweepForm::Line { end_x, end_y } => {
                let end_x = parse_number("End X", end_x)?;
                let end_y = parse_number("End Y", end_y)?;
                let end = frame.to_core(end_x, end_y);
                Sweep::Line {
                    end_x: end.x,
                    end_y: end.y,
                }
            }
            SweepForm::Angle { end } => Sweep::Angle {
                end_degrees: frame.angle_to_core(parse_number("End angle", end)?),
            },
            SweepForm::Speed { end } => Sweep::Speed {
                end_speed: parse_non_negative("End velocity", end)?,
            },
        };

        Ok(SpawnRequest::Batch(BatchSpawn { count, base, sweep }))
    }

    pub fn clear(&mut self) {
        let sweep = match self.sweep {
            SweepForm::Line { .. } => SweepForm::default(),
            SweepForm::Angle { .. } => SweepForm::Angle { end: String::new() },
            SweepForm::Speed { .. } => SweepForm::Speed { end: String::new() },
        };
        *self = Self {
            sweep,
            ..Self::default()
        };
    }
}

/// Transient error message that hides itself after a few seconds
#[derive(Debug, Clone)]
pub struct ErrorBanner {
    message: Option<String>,
    remaining: f32,
    duration: f32,
}

impl Default for ErrorBanner {
    fn default() -> Self {
        Self::new(ERROR_DISPLAY_SECS)
    }
}

impl ErrorBanner {
    pub fn new(duration: f32) -> Self {
        Self {
            message: None,
            remaining: 0.0,
            duration,
        }
    }

    /// Show a message, replacing any current one and restarting the timer
    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
        self.remaining = self.duration;
    }

    /// Count down by `dt` seconds, hiding the message when time runs out
    pub fn tick(&mut self, dt: f32) {
        if self.message.is_none() {
            return;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.message = None;
            self.remaining = 0.0;
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

/// Apply a translated request, or put its error on the banner
///
/// Returns whether the simulation accepted the request.
pub fn submit(
    sim: &Simulation,
    banner: &mut ErrorBanner,
    request: Result<SpawnRequest, InputError>,
) -> bool {
    let result = request.and_then(|req| sim.apply(req).map_err(InputError::from));
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Input rejected: {}", e);
            banner.show(e.to_string());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpawnError;
    use crate::settings::SimConfig;

    const PINK: [f32; 4] = [0.98, 0.81, 0.91, 1.0];

    fn frame(y_up: bool) -> CoordinateFrame {
        CoordinateFrame::new(Rect::new(0.0, 0.0, 960.0, 720.0), y_up)
    }

    fn wall_form(x1: &str, y1: &str, x2: &str, y2: &str) -> WallForm {
        WallForm {
            x1: x1.into(),
            y1: y1.into(),
            x2: x2.into(),
            y2: y2.into(),
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("X", " 12.5 "), Ok(12.5));
        assert_eq!(parse_number("X", ""), Err(InputError::Empty { field: "X" }));
        assert!(matches!(parse_number("X", "abc"), Err(InputError::NotANumber { .. })));
        assert!(matches!(parse_number("X", "inf"), Err(InputError::NotANumber { .. })));
        assert_eq!(
            parse_non_negative("Velocity", "-3"),
            Err(InputError::Negative { field: "Velocity" })
        );
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("Count", "5"), Ok(5));
        assert!(matches!(parse_count("Count", "0"), Err(InputError::NotACount { .. })));
        assert!(matches!(parse_count("Count", "2.5"), Err(InputError::NotACount { .. })));
    }

    #[test]
    fn test_y_up_flips_position_and_angle() {
        let f = frame(true);
        assert_eq!(f.to_core(10.0, 0.0), Vec2::new(10.0, 720.0));
        assert_eq!(f.to_user(Vec2::new(10.0, 720.0)), Vec2::new(10.0, 0.0));
        assert_eq!(f.angle_to_core(30.0), -30.0);

        let f = frame(false);
        assert_eq!(f.to_core(10.0, 5.0), Vec2::new(10.0, 5.0));
        assert_eq!(f.angle_to_core(30.0), 30.0);
    }

    #[test]
    fn test_ball_form_to_request() {
        let form = BallForm {
            x: "100".into(),
            y: "20".into(),
            angle: "90".into(),
            speed: "50".into(),
        };
        let req = form.to_request(&frame(true), 10.0, PINK).unwrap();
        let SpawnRequest::Ball(spec) = req else {
            panic!("expected a ball request");
        };
        assert_eq!((spec.x, spec.y), (100.0, 700.0));
        // "Up" on screen is -Y in core coordinates
        assert_eq!(spec.angle_degrees, -90.0);
    }

    #[test]
    fn test_batch_form_line_sweep() {
        let form = BatchForm {
            count: "5".into(),
            x: "0".into(),
            y: "0".into(),
            angle: "0".into(),
            speed: "10".into(),
            sweep: SweepForm::Line {
                end_x: "40".into(),
                end_y: "0".into(),
            },
        };
        let SpawnRequest::Batch(batch) = form.to_request(&frame(false), 10.0, PINK).unwrap() else {
            panic!("expected a batch request");
        };
        let xs: Vec<f32> = batch.specs().unwrap().iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_batch_form_clear_keeps_sweep_kind() {
        let mut form = BatchForm {
            count: "3".into(),
            sweep: SweepForm::Speed { end: "9".into() },
            ..BatchForm::default()
        };
        form.clear();
        assert_eq!(form.count, "");
        assert_eq!(form.sweep, SweepForm::Speed { end: String::new() });
    }

    #[test]
    fn test_error_banner_auto_dismisses() {
        let mut banner = ErrorBanner::default();
        banner.show("bad input");
        assert_eq!(banner.message(), Some("bad input"));
        banner.tick(2.0);
        assert!(banner.is_visible());
        banner.tick(1.0);
        assert!(!banner.is_visible());
    }

    #[test]
    fn test_submit_out_of_arena_wall_shows_error() {
        let sim = Simulation::new(SimConfig::default());
        let mut banner = ErrorBanner::default();
        let f = frame(false);

        let ok = submit(&sim, &mut banner, wall_form("10", "10", "100", "100").to_request(&f));
        assert!(ok);
        assert!(!banner.is_visible());

        let ok = submit(&sim, &mut banner, wall_form("10", "10", "5000", "100").to_request(&f));
        assert!(!ok);
        assert_eq!(sim.wall_count(), 1);
        assert_eq!(banner.message(), Some(SpawnError::OutOfArena.to_string().as_str()));
    }

    #[test]
    fn test_submit_unparseable_input_leaves_state_alone() {
        let sim = Simulation::new(SimConfig::default());
        let mut banner = ErrorBanner::default();
        let form = BallForm {
            x: "ten".into(),
            ..BallForm::default()
        };
        let ok = submit(&sim, &mut banner, form.to_request(&frame(true), 10.0, PINK));
        assert!(!ok);
        assert_eq!(sim.ball_count(), 0);
        assert!(banner.is_visible());
    }
}
