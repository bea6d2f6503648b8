//! Brick wall generation
//!
//! Rows are laid out left to right from `wall_top`. Each brick gets a random
//! palette color and an independent chance of starting hidden.

use rand::Rng;

use super::state::{Brick, Rect};
use crate::settings::Settings;

/// A freshly generated wall
#[derive(Debug, Clone)]
pub struct Wall {
    /// Row-major, `bricks_per_row * brick_rows` entries including gaps
    pub bricks: Vec<Brick>,
    /// Bricks that start visible; clearing these finishes the level
    pub target: u32,
}

/// Build a wall for a playfield of the given width
pub fn build_wall<R: Rng>(width: i32, settings: &Settings, rng: &mut R) -> Wall {
    let per_row = settings.bricks_per_row(width).max(0);
    let rows = i32::try_from(settings.brick_rows).unwrap_or(i32::MAX);
    let pitch_x = settings.brick_width + settings.brick_gap_x;
    let pitch_y = settings.brick_height + settings.brick_gap_y;

    // Settings and playfield checks keep this under MAX_BRICKS
    let mut bricks = Vec::with_capacity(settings.wall_size(width) as usize);
    let mut gaps = 0u32;

    for row in 0..rows {
        for i in 0..per_row {
            let color = settings.palette[rng.random_range(0..settings.palette.len())];
            let visible = !rng.random_bool(settings.gap_probability);
            if !visible {
                gaps += 1;
            }
            bricks.push(Brick {
                rect: Rect::new(
                    i * pitch_x,
                    settings.wall_top + row * pitch_y,
                    settings.brick_width,
                    settings.brick_height,
                    color,
                ),
                visible,
            });
        }
    }

    let target = bricks.len() as u32 - gaps;
    log::trace!("Built wall: {} bricks, {} gaps", bricks.len(), gaps);
    Wall { bricks, target }
}
