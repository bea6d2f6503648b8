//! Fixed timestep simulation tick
//!
//! `tick` only moves balls and resolves collisions. Level progression and the
//! game-over transition are separate checks the caller runs after each tick.

use super::collision::wall_contact;
use super::state::{GameEvent, GameState, RunState};
use crate::settings::Settings;

/// Advance every ball one step and resolve its collisions
///
/// Does nothing once the game is finished.
pub fn tick(state: &mut GameState, settings: &Settings, events: &mut Vec<GameEvent>) {
    if state.run_state == RunState::Finished {
        return;
    }

    for idx in 0..state.balls.len() {
        let ball = &mut state.balls[idx];
        ball.advance(settings.ball_step);

        // --- WALLS ---
        let contact = wall_contact(&ball.rect, state.playfield, settings);
        if contact.right {
            ball.bounce_x();
        }
        if contact.left {
            ball.bounce_x();
        }
        if contact.bottom {
            ball.bounce_y();
            state.score += settings.bottom_penalty;
            state.lives -= 1;
            log::trace!("Ball {idx} hit bottom, lives left {}", state.lives);
            events.push(GameEvent::BottomHit { ball: idx });
        }
        if contact.top {
            ball.bounce_y();
        }

        // --- BRICKS ---
        // Every overlapping brick breaks, but the ball only turns once.
        let mut hit = false;
        for (brick_idx, brick) in state.bricks.iter_mut().enumerate() {
            if brick.visible && brick.rect.hit_by(&ball.rect) {
                hit = true;
                brick.visible = false;
                state.score += settings.brick_score;
                state.hit_bricks += 1;
                log::trace!("Ball {idx} broke brick {brick_idx}");
                events.push(GameEvent::BrickHit {
                    ball: idx,
                    brick: brick_idx,
                });
            }
        }
        if hit {
            ball.bounce_y();
        }

        // --- BAT ---
        if ball.rect.hit_by(&state.bat.rect) {
            ball.bounce_y();
            events.push(GameEvent::BatHit { ball: idx });
        }
    }
}

/// Move to the next level once every initially visible brick is broken
///
/// Returns true if the level changed. All balls respawn at the spawn point.
pub fn check_level_advance(state: &mut GameState, settings: &Settings) -> bool {
    if state.hit_bricks < state.target_bricks {
        return false;
    }
    state.hit_bricks = 0;
    state.level += 1;
    state.num_balls += 1;
    state.rebuild_wall(settings);
    state.spawn_balls(settings);
    log::info!(
        "Level {} reached: {} balls, {} bricks to clear",
        state.level,
        state.num_balls,
        state.target_bricks
    );
    true
}

/// Finish the game once lives drop below zero
pub fn check_game_over(state: &mut GameState) -> RunState {
    if state.lives < 0 && state.run_state == RunState::Running {
        state.run_state = RunState::Finished;
        log::info!("Game over: score {}, level {}", state.score, state.level);
    }
    state.run_state
}

/// Shift the bat by `sign * bat_step`, clamping only when configured to
pub fn move_bat(state: &mut GameState, settings: &Settings, sign: i32) {
    let dx = sign * settings.bat_step;
    state.bat.shift(dx);
    if settings.clamp_bat {
        let min = settings.border;
        let max = state.playfield.width() - settings.border - state.bat.rect.size.x;
        state.bat.rect.pos.x = state.bat.rect.pos.x.min(max).max(min);
    }
    log::debug!("Move bat by {dx} to x={}", state.bat.rect.pos.x);
}

/// Count the whole wall as broken so the next level check advances
pub fn clear_level(state: &mut GameState) {
    state.hit_bricks = state.bricks.len() as u32;
}
