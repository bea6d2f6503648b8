//! Brick Breaker - headless simulation core of a Breakout-style arcade game
//!
//! Core modules:
//! - `sim`: Game state, collisions, brick walls and the per-frame tick
//! - `simulation`: Thread-safe `GameSimulation` with snapshots and commands
//! - `driver`: Fixed-rate driver thread that ticks and publishes frames
//! - `audio`: Fire-and-forget sound cue notifications
//! - `settings`: Immutable tunables passed at construction

pub mod audio;
pub mod driver;
pub mod error;
pub mod settings;
pub mod sim;
pub mod simulation;

pub use audio::{AudioCue, ChannelCue, SilentCue, SoundEffect};
pub use driver::{Frame, Renderer};
pub use error::{ConfigError, CueError};
pub use settings::{Playfield, Settings};
pub use simulation::{BatDirection, Command, GameSimulation};

/// Game configuration defaults
pub mod consts {
    /// Border round the edge of the playfield
    pub const BORDER: i32 = 6;
    /// Height of the menu bar space at the top
    pub const MENU_BAR: i32 = 40;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 15;
    /// Units the ball moves along each axis per tick
    pub const BALL_STEP: i32 = 3;
    /// Ball spawn height (x is always the playfield centre)
    pub const BALL_SPAWN_Y: i32 = 500;

    /// Brick defaults
    pub const BRICK_WIDTH: i32 = 35;
    pub const BRICK_HEIGHT: i32 = 20;
    pub const BRICK_GAP_X: i32 = 3;
    pub const BRICK_GAP_Y: i32 = 5;
    pub const WALL_TOP: i32 = 100;
    pub const BRICK_ROWS: u32 = 10;
    pub const GAP_PROBABILITY: f64 = 0.4;
    /// Upper bound on bricks in one wall
    pub const MAX_BRICKS: u64 = 100_000;

    /// Distance the bat moves per command
    pub const BAT_STEP: i32 = 10;

    /// Scoring
    pub const BRICK_SCORE: i64 = 50;
    pub const BOTTOM_PENALTY: i64 = -200;

    pub const START_LIVES: i32 = 3;
    pub const START_LEVEL: u32 = 1;

    /// Driver cadence in milliseconds
    pub const TICK_MS: u64 = 20;
    pub const FAST_TICK_MS: u64 = 10;
}
