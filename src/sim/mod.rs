//! Simulation module
//!
//! All gameplay logic lives here:
//! - Integer positions, fixed step per tick
//! - Seeded RNG only (brick walls)
//! - Stable iteration order (balls and bricks by index)
//! - No rendering, audio or threading dependencies

pub mod autopilot;
pub mod collision;
pub mod state;
pub mod tick;
pub mod wall;

pub use collision::{WallContact, aabb_overlap, wall_contact};
pub use state::{Ball, Bat, Brick, Color, GameEvent, GameState, Rect, RunState, Snapshot};
pub use tick::{check_game_over, check_level_advance, clear_level, move_bat, tick};
pub use wall::{Wall, build_wall};
