//! Error types
//!
//! Configuration problems are fatal and surface to the caller. Audio cue
//! failures are transient and never reach the simulation tick.

use std::fmt;

/// Invalid settings or playfield dimensions
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Width or height was zero or negative
    InvalidPlayfield { width: i32, height: i32 },
    /// A sizing or step constant that must be positive was not
    NonPositive { field: &'static str, value: i64 },
    /// A count that would not fit the board arithmetic
    TooLarge { field: &'static str, value: u64 },
    /// No colors to paint bricks with
    EmptyPalette,
    /// Gap probability outside [0, 1)
    GapProbability(f64),
    /// Settings JSON could not be parsed
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPlayfield { width, height } => {
                write!(f, "invalid playfield {width}x{height}: both sides must be positive")
            }
            ConfigError::NonPositive { field, value } => {
                write!(f, "setting `{field}` must be positive, got {value}")
            }
            ConfigError::TooLarge { field, value } => {
                write!(f, "setting `{field}` is too large: {value}")
            }
            ConfigError::EmptyPalette => write!(f, "brick color palette is empty"),
            ConfigError::GapProbability(p) => {
                write!(f, "gap probability {p} is outside [0, 1)")
            }
            ConfigError::Parse(msg) => write!(f, "could not parse settings: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// A sound cue could not be delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueError {
    /// The audio consumer hung up
    Disconnected,
}

impl fmt::Display for CueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CueError::Disconnected => write!(f, "audio cue receiver disconnected"),
        }
    }
}

impl std::error::Error for CueError {}
