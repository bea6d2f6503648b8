//! Brick Breaker headless demo
//!
//! Runs the simulation on the driver thread with the autopilot at the bat and
//! logs progress instead of drawing.
//!
//! Usage: `brick-breaker [settings.json] [max-frames] [width] [height]`
//!
//! Pass `-` for the settings file to keep the defaults.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result};

use brick_breaker::driver;
use brick_breaker::sim::{RunState, autopilot};
use brick_breaker::{ChannelCue, Command, Frame, GameSimulation, Settings};

const DEFAULT_WIDTH: i32 = 600;
const DEFAULT_HEIGHT: i32 = 800;
const DEFAULT_MAX_FRAMES: u64 = 3000;

/// Command line, positional only
#[derive(Debug, PartialEq)]
struct DemoArgs {
    settings_path: Option<String>,
    max_frames: u64,
    width: i32,
    height: i32,
}

impl DemoArgs {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let settings_path = args.next().filter(|path| path != "-");
        let max_frames = match args.next() {
            Some(n) => n.parse::<u64>().context("max-frames must be a number")?,
            None => DEFAULT_MAX_FRAMES,
        };
        let width = match args.next() {
            Some(n) => n.parse::<i32>().context("width must be a number")?,
            None => DEFAULT_WIDTH,
        };
        let height = match args.next() {
            Some(n) => n.parse::<i32>().context("height must be a number")?,
            None => DEFAULT_HEIGHT,
        };
        if let Some(extra) = args.next() {
            anyhow::bail!("unexpected argument `{extra}`");
        }
        Ok(Self {
            settings_path,
            max_frames,
            width,
            height,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = DemoArgs::parse(std::env::args().skip(1))?;
    let settings = match &args.settings_path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading settings from {path}"))?;
            Settings::from_json(&json)?
        }
        None => Settings::default(),
    };
    let max_frames = args.max_frames;

    let (cue, cues) = ChannelCue::channel();
    let sim = Arc::new(
        GameSimulation::with_cue(args.width, args.height, settings, cue)
            .with_context(|| format!("starting on a {}x{} playfield", args.width, args.height))?,
    );
    sim.apply(Command::SetFast(true));
    log::info!(
        "Brick Breaker starting on {}x{} ({max_frames} frames max)",
        args.width,
        args.height
    );

    // Stand-in for the audio device: just log the cues
    let audio = thread::Builder::new()
        .name("audio".into())
        .spawn(move || {
            let mut played = 0u64;
            for effect in cues {
                log::debug!("cue: {effect:?}");
                played += 1;
            }
            played
        })?;

    // Stand-in for the keyboard: the autopilot steers once per tick
    let done = Arc::new(AtomicBool::new(false));
    let input = {
        let sim = Arc::clone(&sim);
        let done = Arc::clone(&done);
        thread::Builder::new().name("input".into()).spawn(move || {
            while !done.load(Ordering::Relaxed) {
                let snapshot = sim.snapshot();
                if snapshot.run_state == RunState::Running {
                    if let Some(direction) = autopilot::steer(&snapshot, sim.settings()) {
                        sim.apply(Command::MoveBat(direction));
                    }
                }
                thread::sleep(sim.tick_interval());
            }
        })?
    };

    let renderer = move |frame: &Frame| {
        let snap = &frame.snapshot;
        if frame.level_advanced {
            log::info!("Level {} with {} balls", snap.level, snap.num_balls);
        }
        if frame.number % 500 == 0 {
            log::info!(
                "frame {}: score {}, lives {}, bricks {}/{}",
                frame.number,
                snap.score,
                snap.lives,
                snap.hit_bricks,
                snap.target_bricks
            );
        }
        if frame.number >= max_frames {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    };

    let handle = driver::spawn(Arc::clone(&sim), renderer)?;
    if handle.join().is_err() {
        anyhow::bail!("driver thread panicked");
    }
    done.store(true, Ordering::Relaxed);
    if input.join().is_err() {
        anyhow::bail!("input thread panicked");
    }

    let snapshot = sim.snapshot();
    // Closing the cue channel lets the audio thread finish
    drop(sim);
    let played = audio.join().unwrap_or(0);

    println!(
        "{} at level {}: score {}, lives {}, {} sound cues",
        match snapshot.run_state {
            RunState::Running => "Stopped",
            RunState::Finished => "Game over",
        },
        snapshot.level,
        snapshot.score,
        snapshot.lives,
        played
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<DemoArgs> {
        DemoArgs::parse(args.iter().map(|a| a.to_string()))
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(
            parse(&[]).unwrap(),
            DemoArgs {
                settings_path: None,
                max_frames: DEFAULT_MAX_FRAMES,
                width: DEFAULT_WIDTH,
                height: DEFAULT_HEIGHT,
            }
        );
    }

    #[test]
    fn test_parse_playfield_size() {
        let args = parse(&["-", "100", "700", "900"]).unwrap();
        assert_eq!(args.settings_path, None);
        assert_eq!(args.max_frames, 100);
        assert_eq!((args.width, args.height), (700, 900));

        let args = parse(&["game.json", "50", "350"]).unwrap();
        assert_eq!(args.settings_path.as_deref(), Some("game.json"));
        assert_eq!((args.width, args.height), (350, DEFAULT_HEIGHT));
    }

    #[test]
    fn test_parse_rejects_bad_numbers() {
        assert!(parse(&["-", "many"]).is_err());
        assert!(parse(&["-", "10", "wide"]).is_err());
        assert!(parse(&["-", "10", "600", "800", "extra"]).is_err());
    }
}
