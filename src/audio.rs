//! Audio boundary
//!
//! The core only says which effect to play; playback belongs to whatever
//! implements [`AudioSink`] on the host platform.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Main button tapped
    Tap,
    /// Goal reached, next level
    LevelUp,
    /// Run ended without a win
    GameOver,
    /// Race mode overall goal reached
    Win,
    /// Multiplier power-up collected
    Multiplier,
    /// Freeze power-up collected
    FreezeTime,
    /// Bomb countdown ran out
    BombExplode,
    /// Bomb tapped before it went off
    BombDisposed,
    /// Challenge beaten
    ChallengeComplete,
}

/// Fire-and-forget sound playback
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Headless sink: logs each effect and keeps simple counters
#[derive(Debug, Default, Clone)]
pub struct LogAudio {
    muted: bool,
    played: usize,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Effects played while unmuted
    pub fn played(&self) -> usize {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::trace!("sfx: {:?}", effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_sink_counts_nothing() {
        let mut audio = LogAudio::new();
        audio.play(SoundEffect::Tap);
        audio.set_muted(true);
        audio.play(SoundEffect::Win);
        assert_eq!(audio.played(), 1);
    }
}
