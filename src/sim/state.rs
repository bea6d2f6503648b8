//! Game state and core simulation types
//!
//! Everything the tick mutates lives in `GameState`. Renderers only ever see a
//! `Snapshot` cloned out of it.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::aabb_overlap;
use super::wall::build_wall;
use crate::consts::START_LEVEL;
use crate::settings::{Playfield, Settings};

/// Packed 0xRRGGBB color tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);

    pub fn rgb(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

/// Top-level lifecycle of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Running,
    /// Lives ran out; only a restart leaves this state
    Finished,
}

/// Axis-aligned rectangle shared by balls, bricks and the bat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: IVec2,
    pub size: IVec2,
    pub color: Color,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32, color: Color) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
            color,
        }
    }

    /// Bottom-right corner (exclusive)
    pub fn max(&self) -> IVec2 {
        self.pos + self.size
    }

    pub fn hit_by(&self, other: &Rect) -> bool {
        aabb_overlap(self, other)
    }
}

/// A ball entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Direction per axis, each component is -1 or +1
    pub dir: IVec2,
}

impl Ball {
    /// Ball at the spawn point heading down and to the right
    pub fn spawn(playfield: Playfield, settings: &Settings) -> Self {
        Self {
            rect: Rect::new(
                playfield.width() / 2,
                settings.ball_spawn_y,
                settings.ball_size,
                settings.ball_size,
                Color::WHITE,
            ),
            dir: IVec2::ONE,
        }
    }

    pub fn pos(&self) -> IVec2 {
        self.rect.pos
    }

    /// Advance `units` along both axes in the current direction
    pub fn advance(&mut self, units: i32) {
        self.rect.pos += self.dir * units;
    }

    pub fn bounce_x(&mut self) {
        self.dir.x = -self.dir.x;
    }

    pub fn bounce_y(&mut self) {
        self.dir.y = -self.dir.y;
    }
}

/// The player's bat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bat {
    pub rect: Rect,
}

impl Bat {
    /// Bat centred-ish near the bottom of the playfield
    pub fn spawn(playfield: Playfield, settings: &Settings) -> Self {
        let (width, height) = settings.bat_size();
        Self {
            rect: Rect::new(
                playfield.width() / 2,
                playfield.height() - settings.brick_height * 3 / 2,
                width,
                height,
                Color::WHITE,
            ),
        }
    }

    pub fn shift(&mut self, dx: i32) {
        self.rect.pos.x += dx;
    }

    /// Centre x coordinate
    pub fn center_x(&self) -> i32 {
        self.rect.pos.x + self.rect.size.x / 2
    }
}

/// A brick entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Hidden bricks are gaps or already broken; neither collides
    pub visible: bool,
}

/// Something the tick wants the outside world to hear about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BrickHit { ball: usize, brick: usize },
    BottomHit { ball: usize },
    BatHit { ball: usize },
}

/// Read-only copy of the whole game for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub playfield: Playfield,
    pub balls: Vec<Ball>,
    pub bat: Bat,
    pub bricks: Vec<Brick>,
    pub score: i64,
    pub lives: i32,
    pub level: u32,
    pub num_balls: u32,
    pub hit_bricks: u32,
    pub target_bricks: u32,
    pub run_state: RunState,
    pub fast: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub playfield: Playfield,
    pub balls: Vec<Ball>,
    pub bat: Bat,
    pub bricks: Vec<Brick>,
    /// Can go negative through bottom penalties
    pub score: i64,
    /// Game ends once this drops below zero
    pub lives: i32,
    pub level: u32,
    pub num_balls: u32,
    /// Bricks broken this level
    pub hit_bricks: u32,
    /// Bricks that started visible this level
    pub target_bricks: u32,
    pub run_state: RunState,
    pub fast: bool,
    rng: Pcg32,
}

impl GameState {
    /// Fresh game at level 1
    pub fn new(playfield: Playfield, settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random::<u64>);
        let mut state = Self {
            playfield,
            balls: Vec::new(),
            bat: Bat::spawn(playfield, settings),
            bricks: Vec::new(),
            score: 0,
            lives: settings.start_lives,
            level: START_LEVEL,
            num_balls: 1,
            hit_bricks: 0,
            target_bricks: 0,
            run_state: RunState::Running,
            fast: false,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset(playfield, settings);
        state
    }

    /// Start a new game on `playfield`; `level` is deliberately carried over
    pub fn reset(&mut self, playfield: Playfield, settings: &Settings) {
        self.playfield = playfield;
        self.score = 0;
        self.lives = settings.start_lives;
        self.num_balls = 1;
        self.hit_bricks = 0;
        self.run_state = RunState::Running;
        self.spawn_balls(settings);
        self.bat = Bat::spawn(playfield, settings);
        self.rebuild_wall(settings);
    }

    /// Replace every ball with `num_balls` fresh ones at the spawn point
    pub fn spawn_balls(&mut self, settings: &Settings) {
        let ball = Ball::spawn(self.playfield, settings);
        self.balls = vec![ball; self.num_balls as usize];
    }

    /// Replace the brick wall and its clear target
    pub fn rebuild_wall(&mut self, settings: &Settings) {
        let wall = build_wall(self.playfield.width(), settings, &mut self.rng);
        self.target_bricks = wall.target;
        self.bricks = wall.bricks;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            playfield: self.playfield,
            balls: self.balls.clone(),
            bat: self.bat,
            bricks: self.bricks.clone(),
            score: self.score,
            lives: self.lives,
            level: self.level,
            num_balls: self.num_balls,
            hit_bricks: self.hit_bricks,
            target_bricks: self.target_bricks,
            run_state: self.run_state,
            fast: self.fast,
        }
    }
}
