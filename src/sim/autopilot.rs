//! Demo-mode bat steering
//!
//! Tracks the most dangerous ball: the lowest one still heading down. Used by
//! the headless binary in place of a keyboard.

use super::state::Snapshot;
use crate::settings::Settings;
use crate::simulation::BatDirection;

/// Pick a bat move for this frame, or `None` to hold still
pub fn steer(snapshot: &Snapshot, settings: &Settings) -> Option<BatDirection> {
    let ball = snapshot
        .balls
        .iter()
        .filter(|b| b.dir.y > 0)
        .max_by_key(|b| b.rect.pos.y)
        .or_else(|| snapshot.balls.iter().max_by_key(|b| b.rect.pos.y))?;

    let target = ball.rect.pos.x + ball.rect.size.x / 2;
    let offset = target - snapshot.bat.center_x();
    if offset.abs() <= settings.bat_step {
        None
    } else if offset < 0 {
        Some(BatDirection::Left)
    } else {
        Some(BatDirection::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Playfield;
    use crate::sim::GameState;
    use glam::IVec2;

    fn snapshot() -> Snapshot {
        let settings = Settings::default().with_seed(1);
        GameState::new(Playfield::new(600, 800).unwrap(), &settings).snapshot()
    }

    #[test]
    fn test_steers_toward_ball() {
        let settings = Settings::default();
        let mut snap = snapshot();
        snap.balls[0].rect.pos = IVec2::new(50, 600);
        assert_eq!(steer(&snap, &settings), Some(BatDirection::Left));

        snap.balls[0].rect.pos = IVec2::new(550, 600);
        assert_eq!(steer(&snap, &settings), Some(BatDirection::Right));
    }

    #[test]
    fn test_holds_when_lined_up() {
        let settings = Settings::default();
        let mut snap = snapshot();
        let center = snap.bat.center_x();
        snap.balls[0].rect.pos = IVec2::new(center - 7, 600);
        assert_eq!(steer(&snap, &settings), None);
    }

    #[test]
    fn test_prefers_descending_ball() {
        let settings = Settings::default();
        let mut snap = snapshot();
        let mut rising = snap.balls[0];
        rising.rect.pos = IVec2::new(550, 700);
        rising.dir = IVec2::new(1, -1);
        snap.balls[0].rect.pos = IVec2::new(20, 300);
        snap.balls.push(rising);
        assert_eq!(steer(&snap, &settings), Some(BatDirection::Left));
    }
}
