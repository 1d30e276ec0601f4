//! Sound cues
//!
//! Playback belongs to the host; the core only names which cue to play.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Round starts
    Whistle,
    /// Ball dropped through the net
    Swish,
    /// Missed shot ended the run
    GameOver,
}

impl SoundEffect {
    /// Asset name the host resolves to a sound file
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Whistle => "whistle",
            SoundEffect::Swish => "swish",
            SoundEffect::GameOver => "game-over",
        }
    }
}
