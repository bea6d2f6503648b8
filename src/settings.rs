//! Simulation settings
//!
//! Every sizing, movement and scoring constant lives here. A `Settings` value is
//! validated once and then shared read-only by the simulation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Color;

/// Default brick palette (green, blue, yellow, pink, coral)
pub const DEFAULT_PALETTE: [Color; 5] = [
    Color(0x74c365),
    Color(0x4666ff),
    Color(0xf4c325),
    Color(0xf85376),
    Color(0xff7f50),
];

/// Tunable simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Border round the edge of the playfield
    pub border: i32,
    /// Height reserved for the menu bar at the top
    pub menu_bar: i32,

    // === Ball ===
    pub ball_size: i32,
    /// Distance moved along each axis per tick
    pub ball_step: i32,
    pub ball_spawn_y: i32,

    // === Bricks ===
    pub brick_width: i32,
    pub brick_height: i32,
    /// Extra horizontal space between neighbouring bricks
    pub brick_gap_x: i32,
    /// Extra vertical space between rows
    pub brick_gap_y: i32,
    /// Y of the first brick row
    pub wall_top: i32,
    pub brick_rows: u32,
    /// Chance that a brick starts hidden, in [0.0, 1.0)
    pub gap_probability: f64,
    pub palette: Vec<Color>,

    // === Bat ===
    /// Distance moved per bat command
    pub bat_step: i32,
    /// Keep the bat inside the borders
    pub clamp_bat: bool,

    // === Scoring ===
    pub brick_score: i64,
    /// Added to the score when a ball hits the bottom (negative)
    pub bottom_penalty: i64,
    pub start_lives: i32,

    // === Timing ===
    pub tick_ms: u64,
    pub fast_tick_ms: u64,

    /// RNG seed for brick walls; `None` picks a fresh one per simulation
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            border: BORDER,
            menu_bar: MENU_BAR,

            ball_size: BALL_SIZE,
            ball_step: BALL_STEP,
            ball_spawn_y: BALL_SPAWN_Y,

            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_gap_x: BRICK_GAP_X,
            brick_gap_y: BRICK_GAP_Y,
            wall_top: WALL_TOP,
            brick_rows: BRICK_ROWS,
            gap_probability: GAP_PROBABILITY,
            palette: DEFAULT_PALETTE.to_vec(),

            bat_step: BAT_STEP,
            clamp_bat: false,

            brick_score: BRICK_SCORE,
            bottom_penalty: BOTTOM_PENALTY,
            start_lives: START_LIVES,

            tick_ms: TICK_MS,
            fast_tick_ms: FAST_TICK_MS,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every constant the simulation divides by or steps with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("ball_size", self.ball_size as i64),
            ("ball_step", self.ball_step as i64),
            ("brick_width", self.brick_width as i64),
            ("brick_height", self.brick_height as i64),
            ("bat_step", self.bat_step as i64),
            ("brick_rows", self.brick_rows as i64),
            ("tick_ms", self.tick_ms as i64),
            ("fast_tick_ms", self.fast_tick_ms as i64),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if self.brick_rows as u64 > MAX_BRICKS {
            return Err(ConfigError::TooLarge {
                field: "brick_rows",
                value: self.brick_rows as u64,
            });
        }
        // 1.0 would leave nothing to clear and level up every frame
        if !(0.0..1.0).contains(&self.gap_probability) {
            return Err(ConfigError::GapProbability(self.gap_probability));
        }
        Ok(())
    }

    /// Bricks that fit across a playfield of the given width
    pub fn bricks_per_row(&self, width: i32) -> i32 {
        width / self.brick_width
    }

    /// Total bricks in a wall for the given width, gaps included
    pub fn wall_size(&self, width: i32) -> u64 {
        self.bricks_per_row(width).max(0) as u64 * self.brick_rows as u64
    }

    /// Bat size derived from brick size
    pub fn bat_size(&self) -> (i32, i32) {
        (self.brick_width * 3, self.brick_height / 4)
    }

    /// Sleep between driver iterations
    pub fn tick_interval(&self, fast: bool) -> Duration {
        Duration::from_millis(if fast { self.fast_tick_ms } else { self.tick_ms })
    }
}

/// Validated playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlayfield")]
pub struct Playfield {
    width: i32,
    height: i32,
}

/// Unchecked form used while deserializing
#[derive(Deserialize)]
struct RawPlayfield {
    width: i32,
    height: i32,
}

impl TryFrom<RawPlayfield> for Playfield {
    type Error = ConfigError;

    fn try_from(raw: RawPlayfield) -> Result<Self, Self::Error> {
        Playfield::new(raw.width, raw.height)
    }
}

impl Playfield {
    pub fn new(width: i32, height: i32) -> Result<Self, ConfigError> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::InvalidPlayfield { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.palette.len(), 5);
        assert_eq!(settings.bat_size(), (105, 5));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json(r#"{ "ball_step": 5, "seed": 7 }"#).unwrap();
        assert_eq!(settings.ball_step, 5);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.brick_width, BRICK_WIDTH);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Settings::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_palette() {
        let settings = Settings {
            palette: Vec::new(),
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn test_validate_rejects_bad_gap_probability() {
        let settings = Settings {
            gap_probability: 1.5,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::GapProbability(1.5)));
    }

    #[test]
    fn test_validate_rejects_full_gap_probability() {
        let settings = Settings {
            gap_probability: 1.0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::GapProbability(1.0)));
        let settings = Settings {
            gap_probability: 0.0,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_json_rejects_huge_row_count() {
        assert_eq!(
            Settings::from_json(r#"{ "brick_rows": 3000000000, "seed": 1 }"#),
            Err(ConfigError::TooLarge {
                field: "brick_rows",
                value: 3_000_000_000
            })
        );
    }

    #[test]
    fn test_wall_size() {
        let settings = Settings::default();
        assert_eq!(settings.wall_size(600), 170);
        assert_eq!(settings.wall_size(20), 0);
        assert_eq!(settings.wall_size(-50), 0);
    }

    #[test]
    fn test_validate_rejects_zero_brick_width() {
        let settings = Settings {
            brick_width: 0,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::NonPositive {
                field: "brick_width",
                value: 0
            })
        );
    }

    #[test]
    fn test_playfield_rejects_non_positive() {
        assert!(Playfield::new(0, 600).is_err());
        assert!(Playfield::new(600, -1).is_err());
        let field = Playfield::new(600, 800).unwrap();
        assert_eq!((field.width(), field.height()), (600, 800));
    }

    #[test]
    fn test_playfield_deserialize_is_checked() {
        let field: Playfield = serde_json::from_str(r#"{ "width": 600, "height": 800 }"#).unwrap();
        assert_eq!(field, Playfield::new(600, 800).unwrap());
        assert!(serde_json::from_str::<Playfield>(r#"{ "width": 0, "height": 800 }"#).is_err());
        assert!(serde_json::from_str::<Playfield>(r#"{ "width": 600, "height": -3 }"#).is_err());
    }

    #[test]
    fn test_tick_interval() {
        let settings = Settings::default();
        assert_eq!(settings.tick_interval(false), Duration::from_millis(20));
        assert_eq!(settings.tick_interval(true), Duration::from_millis(10));
    }
}
