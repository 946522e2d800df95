//! Error types
//!
//! The physics core itself cannot fail; errors only exist at the boundary where
//! spawn requests, user input and configuration files enter the simulation.

use std::fmt;

/// Reasons a ball or wall spawn request is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnError {
    /// A spawn point or wall endpoint lies outside the arena.
    OutOfArena,
    /// Wall endpoints are identical.
    DegenerateWall,
    /// Ball radius must be positive.
    InvalidRadius(f32),
    /// Ball speed must be non-negative.
    InvalidSpeed(f32),
    /// A coordinate, speed or angle was NaN or infinite.
    NonFinite,
    /// A batch was requested with zero balls.
    EmptyBatch,
    /// The population cap was reached and the overflow policy rejects new balls.
    PopulationFull { max: usize },
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::OutOfArena => write!(f, "Coordinates must be within the display area"),
            SpawnError::DegenerateWall => write!(f, "Wall start and end must differ"),
            SpawnError::InvalidRadius(r) => write!(f, "Radius must be positive (got {})", r),
            SpawnError::InvalidSpeed(s) => write!(f, "Speed must not be negative (got {})", s),
            SpawnError::NonFinite => write!(f, "Values must be finite numbers"),
            SpawnError::EmptyBatch => write!(f, "Batch must contain at least one ball"),
            SpawnError::PopulationFull { max } => {
                write!(f, "Ball limit reached ({} balls)", max)
            }
        }
    }
}

impl std::error::Error for SpawnError {}

/// Errors raised while translating text fields into spawn requests.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// A required field was left blank.
    Empty { field: &'static str },
    /// A field did not parse as a finite number.
    NotANumber { field: &'static str, text: String },
    /// A field that must be non-negative was negative.
    Negative { field: &'static str },
    /// A count field was not a positive integer.
    NotACount { field: &'static str, text: String },
    /// The request parsed but the core rejected it.
    Spawn(SpawnError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty { field } => write!(f, "{} is required", field),
            InputError::NotANumber { field, text } => {
                write!(f, "{} must be a number (got {:?})", field, text)
            }
            InputError::Negative { field } => write!(f, "{} must not be negative", field),
            InputError::NotACount { field, text } => {
                write!(f, "{} must be a whole number of at least 1 (got {:?})", field, text)
            }
            InputError::Spawn(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Spawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpawnError> for InputError {
    fn from(e: SpawnError) -> Self {
        InputError::Spawn(e)
    }
}

/// Errors that can occur loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the file.
    Io(std::io::Error),
    /// The file is not valid configuration JSON.
    Parse(serde_json::Error),
    /// The configuration parsed but holds unusable values.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}
