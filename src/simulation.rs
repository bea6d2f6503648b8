//! Thread-safe game simulation
//!
//! `GameSimulation` wraps the whole `GameState` in one mutex. Every command and
//! every read takes that lock, so a renderer can never observe a half-applied
//! tick. Sound cues gathered during a tick are sent after the lock is released,
//! as are the music start/stop cues around each game.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::{AudioCue, SilentCue, SoundEffect};
use crate::consts::MAX_BRICKS;
use crate::error::ConfigError;
use crate::settings::{Playfield, Settings};
use crate::sim::{self, Ball, Bat, Brick, GameState, RunState, Snapshot};

/// Horizontal bat movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatDirection {
    Left,
    Right,
}

impl BatDirection {
    pub fn sign(self) -> i32 {
        match self {
            BatDirection::Left => -1,
            BatDirection::Right => 1,
        }
    }

    /// `-1` is left, `+1` is right, anything else is rejected
    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign {
            -1 => Some(BatDirection::Left),
            1 => Some(BatDirection::Right),
            _ => None,
        }
    }
}

/// Discrete requests from an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveBat(BatDirection),
    SetFast(bool),
    Restart,
}

/// The simulation core: entities, rules and the lock around them
pub struct GameSimulation {
    settings: Settings,
    state: Mutex<GameState>,
    cue: Box<dyn AudioCue>,
}

impl std::fmt::Debug for GameSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSimulation")
            .field("settings", &self.settings)
            .field("state", &self.lock())
            .finish_non_exhaustive()
    }
}

impl GameSimulation {
    /// New game with silent audio
    pub fn new(width: i32, height: i32, settings: Settings) -> Result<Self, ConfigError> {
        Self::with_cue(width, height, settings, SilentCue)
    }

    /// New game reporting sound cues to `cue`
    pub fn with_cue(
        width: i32,
        height: i32,
        settings: Settings,
        cue: impl AudioCue + 'static,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        let playfield = checked_playfield(width, height, &settings)?;
        let state = GameState::new(playfield, &settings);
        log::info!(
            "Game initialised on {}x{}: {} bricks to clear",
            width,
            height,
            state.target_bricks
        );
        let sim = Self {
            settings,
            state: Mutex::new(state),
            cue: Box::new(cue),
        };
        sim.cue.on_game_start();
        Ok(sim)
    }

    /// The lock is recovered after a panic elsewhere; state is only ever
    /// mutated through the functions in `sim`, none of which panic midway.
    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Reset score, lives and balls and build a new wall on a new playfield
    ///
    /// The level counter is kept. Fails without touching state if the
    /// playfield is unusable.
    pub fn initialize(&self, width: i32, height: i32) -> Result<(), ConfigError> {
        let playfield = checked_playfield(width, height, &self.settings)?;
        {
            let mut state = self.lock();
            state.reset(playfield, &self.settings);
            log::info!(
                "Game initialised on {}x{} at level {}",
                width,
                height,
                state.level
            );
        }
        self.cue.on_game_start();
        Ok(())
    }

    /// Start over on the current playfield
    pub fn restart(&self) {
        {
            let mut state = self.lock();
            let playfield = state.playfield;
            state.reset(playfield, &self.settings);
            log::debug!("Restarted at level {}", state.level);
        }
        self.cue.on_game_start();
    }

    /// Advance one frame, then report sound cues
    pub fn tick(&self) {
        let mut events = Vec::new();
        {
            let mut state = self.lock();
            sim::tick(&mut state, &self.settings, &mut events);
        }
        for event in events {
            self.cue.play(SoundEffect::from(event));
        }
    }

    /// Run after `tick`; true if a new level started
    pub fn check_level_advance(&self) -> bool {
        sim::check_level_advance(&mut self.lock(), &self.settings)
    }

    /// Finish the game once lives drop below zero; the music stops on that
    /// transition only
    pub fn check_game_over(&self) -> RunState {
        let (was, now) = {
            let mut state = self.lock();
            let was = state.run_state;
            (was, sim::check_game_over(&mut state))
        };
        if was == RunState::Running && now == RunState::Finished {
            self.cue.on_game_over();
        }
        now
    }

    pub fn move_bat(&self, direction: BatDirection) {
        sim::move_bat(&mut self.lock(), &self.settings, direction.sign());
    }

    pub fn set_fast(&self, fast: bool) {
        self.lock().fast = fast;
    }

    /// Apply a command from an input source
    pub fn apply(&self, command: Command) {
        match command {
            Command::MoveBat(direction) => self.move_bat(direction),
            Command::SetFast(fast) => self.set_fast(fast),
            Command::Restart => self.restart(),
        }
    }

    /// Mark the level as cleared; the next level check advances
    pub fn debug_clear_level(&self) {
        sim::clear_level(&mut self.lock());
    }

    /// Driver sleep for the current speed
    pub fn tick_interval(&self) -> Duration {
        self.settings.tick_interval(self.is_fast())
    }

    // === Snapshots ===

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn balls(&self) -> Vec<Ball> {
        self.lock().balls.clone()
    }

    pub fn bat(&self) -> Bat {
        self.lock().bat
    }

    pub fn bricks(&self) -> Vec<Brick> {
        self.lock().bricks.clone()
    }

    pub fn score(&self) -> i64 {
        self.lock().score
    }

    pub fn lives(&self) -> i32 {
        self.lock().lives
    }

    pub fn level(&self) -> u32 {
        self.lock().level
    }

    pub fn num_balls(&self) -> u32 {
        self.lock().num_balls
    }

    pub fn run_state(&self) -> RunState {
        self.lock().run_state
    }

    pub fn is_fast(&self) -> bool {
        self.lock().fast
    }

    /// Run `f` with exclusive access to the raw state
    #[cfg(test)]
    pub(crate) fn with_state<T>(&self, f: impl FnOnce(&mut GameState) -> T) -> T {
        f(&mut self.lock())
    }
}

/// Playfield that is positive, wide enough for at least one brick column and
/// small enough that the wall stays under `MAX_BRICKS`
fn checked_playfield(
    width: i32,
    height: i32,
    settings: &Settings,
) -> Result<Playfield, ConfigError> {
    let playfield = Playfield::new(width, height)?;
    let per_row = settings.bricks_per_row(width);
    if per_row <= 0 {
        return Err(ConfigError::NonPositive {
            field: "bricks_per_row",
            value: per_row as i64,
        });
    }
    let bricks = settings.wall_size(width);
    if bricks > MAX_BRICKS {
        return Err(ConfigError::TooLarge {
            field: "brick_count",
            value: bricks,
        });
    }
    Ok(playfield)
}
