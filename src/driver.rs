//! Fixed-rate driver
//!
//! One background thread runs the frame loop: tick, game-over check, level
//! check, publish a frame, sleep. The simulation lock is only held inside
//! those calls, never across the sleep.

use std::ops::ControlFlow;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::sim::{RunState, Snapshot};
use crate::simulation::GameSimulation;

/// What the driver publishes after every tick
#[derive(Debug, Clone)]
pub struct Frame {
    /// Frames since the driver started (first frame is 1)
    pub number: u64,
    pub snapshot: Snapshot,
    /// A new level started this frame
    pub level_advanced: bool,
}

/// Consumer of published frames
///
/// Returning `ControlFlow::Break` stops the driver (window closed and so on).
pub trait Renderer {
    fn present(&mut self, frame: &Frame) -> ControlFlow<()>;
}

impl<F> Renderer for F
where
    F: FnMut(&Frame) -> ControlFlow<()>,
{
    fn present(&mut self, frame: &Frame) -> ControlFlow<()> {
        self(frame)
    }
}

/// Start the frame loop on its own thread
///
/// The thread ends once the game is finished or the renderer breaks, and
/// hands the renderer back through the join handle.
pub fn spawn<R>(sim: Arc<GameSimulation>, renderer: R) -> std::io::Result<JoinHandle<R>>
where
    R: Renderer + Send + 'static,
{
    thread::Builder::new()
        .name("game-driver".into())
        .spawn(move || run(&sim, renderer))
}

/// Run the frame loop on the current thread
pub fn run<R: Renderer>(sim: &GameSimulation, mut renderer: R) -> R {
    log::info!("Driver starting at level {}", sim.level());
    let mut number = 0u64;
    loop {
        sim.tick();
        let run_state = sim.check_game_over();
        let level_advanced = run_state == RunState::Running && sim.check_level_advance();

        number += 1;
        let frame = Frame {
            number,
            snapshot: sim.snapshot(),
            level_advanced,
        };
        if renderer.present(&frame).is_break() {
            log::info!("Driver stopped by renderer after {number} frames");
            break;
        }
        if run_state == RunState::Finished {
            log::info!("Driver finished after {number} frames");
            break;
        }
        thread::sleep(sim.tick_interval());
    }
    renderer
}
