//! Presentation collaborator
//!
//! Everything the host shows or plays (score label, game-over card,
//! expanded layout, sounds) is driven through this trait. The core never
//! caches what the host displays; it hands over the current session.

use crate::audio::SoundEffect;
use crate::sim::GameSession;

/// Receives notifications from the game core
///
/// Every method defaults to a no-op so hosts implement only what they show.
pub trait Presentation {
    /// Score label should refresh
    fn on_score_changed(&mut self, _session: &GameSession) {}
    /// Run ended on a miss
    fn on_game_over(&mut self, _session: &GameSession) {}
    /// Wait-for-tap variant: host should switch to its expanded layout
    fn on_request_expand(&mut self) {}
    /// A fresh session replaced the finished one
    fn on_scene_reset(&mut self, _session: &GameSession) {}
    /// Play a sound cue
    fn play(&mut self, _effect: SoundEffect) {}
}

/// One recorded presentation call
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationEvent {
    ScoreChanged(u32),
    GameOver(u32),
    RequestExpand,
    SceneReset(u32),
    Sound(SoundEffect),
}

/// Presentation that records (and logs) every notification
///
/// Used by the headless binary and tests.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    pub events: Vec<PresentationEvent>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, event: &PresentationEvent) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }

    pub fn game_over_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PresentationEvent::GameOver(_)))
            .count()
    }

    pub fn last_score(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|e| match e {
            PresentationEvent::ScoreChanged(s) => Some(*s),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Presentation for RecordingPresentation {
    fn on_score_changed(&mut self, session: &GameSession) {
        log::info!("Score: {}", session.score);
        self.events.push(PresentationEvent::ScoreChanged(session.score));
    }

    fn on_game_over(&mut self, session: &GameSession) {
        log::info!("Game over - final score {}", session.score);
        self.events.push(PresentationEvent::GameOver(session.score));
    }

    fn on_request_expand(&mut self) {
        log::info!("Expand requested");
        self.events.push(PresentationEvent::RequestExpand);
    }

    fn on_scene_reset(&mut self, session: &GameSession) {
        log::info!("Scene reset");
        self.events.push(PresentationEvent::SceneReset(session.score));
    }

    fn play(&mut self, effect: SoundEffect) {
        log::debug!("Sound: {}", effect.asset_name());
        self.events.push(PresentationEvent::Sound(effect));
    }
}
