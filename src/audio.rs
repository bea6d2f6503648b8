//! Sound cue notifications
//!
//! The simulation never plays audio itself. It reports cues to an `AudioCue`
//! sink after each tick; the sink must return immediately and keep its own
//! failures to itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::CueError;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball breaks a brick
    BrickHit,
    /// Ball hits the bottom wall and costs a life
    BottomHit,
    /// Ball bounces off the bat
    BatHit,
    /// A game started; begin the background music
    MusicStart,
    /// The game finished; stop the background music
    MusicStop,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::BrickHit { .. } => SoundEffect::BrickHit,
            GameEvent::BottomHit { .. } => SoundEffect::BottomHit,
            GameEvent::BatHit { .. } => SoundEffect::BatHit,
        }
    }
}

/// Receiver of fire-and-forget sound cues
pub trait AudioCue: Send + Sync {
    /// Must not block
    fn play(&self, effect: SoundEffect);

    fn on_brick_hit(&self) {
        self.play(SoundEffect::BrickHit);
    }

    fn on_bottom_hit(&self) {
        self.play(SoundEffect::BottomHit);
    }

    fn on_bat_hit(&self) {
        self.play(SoundEffect::BatHit);
    }

    fn on_game_start(&self) {
        self.play(SoundEffect::MusicStart);
    }

    fn on_game_over(&self) {
        self.play(SoundEffect::MusicStop);
    }
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&self, _effect: SoundEffect) {}
}

/// Forwards cues over a channel to whatever thread owns the audio device
#[derive(Debug)]
pub struct ChannelCue {
    tx: Sender<SoundEffect>,
    muted: AtomicBool,
    /// Set after the first failed send so the warning is logged once
    disconnected: AtomicBool,
}

impl ChannelCue {
    /// Create a cue sink and the receiving end for the audio thread
    pub fn channel() -> (Self, Receiver<SoundEffect>) {
        let (tx, rx) = mpsc::channel();
        let cue = Self {
            tx,
            muted: AtomicBool::new(false),
            disconnected: AtomicBool::new(false),
        };
        (cue, rx)
    }

    /// Mute/unmute all cues
    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Send a cue, reporting a dead receiver
    pub fn try_play(&self, effect: SoundEffect) -> Result<(), CueError> {
        if self.is_muted() {
            return Ok(());
        }
        self.tx.send(effect).map_err(|_| CueError::Disconnected)
    }
}

impl AudioCue for ChannelCue {
    fn play(&self, effect: SoundEffect) {
        if let Err(err) = self.try_play(effect) {
            if !self.disconnected.swap(true, Ordering::Relaxed) {
                log::warn!("Dropping sound cue {effect:?}: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_delivers_in_order() {
        let (cue, rx) = ChannelCue::channel();
        cue.on_bat_hit();
        cue.on_brick_hit();
        cue.on_bottom_hit();
        let got: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            got,
            vec![
                SoundEffect::BatHit,
                SoundEffect::BrickHit,
                SoundEffect::BottomHit
            ]
        );
    }

    #[test]
    fn test_music_cues() {
        let (cue, rx) = ChannelCue::channel();
        cue.on_game_start();
        cue.on_game_over();
        let got: Vec<_> = rx.try_iter().collect();
        assert_eq!(got, vec![SoundEffect::MusicStart, SoundEffect::MusicStop]);
    }

    #[test]
    fn test_muted_channel_sends_nothing() {
        let (cue, rx) = ChannelCue::channel();
        cue.set_muted(true);
        cue.on_bat_hit();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_disconnected_channel_is_swallowed() {
        let (cue, rx) = ChannelCue::channel();
        drop(rx);
        assert_eq!(cue.try_play(SoundEffect::BatHit), Err(CueError::Disconnected));
        // Must not panic
        cue.play(SoundEffect::BatHit);
        cue.play(SoundEffect::BrickHit);
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::from(GameEvent::BrickHit { ball: 0, brick: 3 }),
            SoundEffect::BrickHit
        );
        assert_eq!(
            SoundEffect::from(GameEvent::BottomHit { ball: 1 }),
            SoundEffect::BottomHit
        );
    }
}
