//! Audio cues
//!
//! Playback itself belongs to the host engine; this manager applies the
//! volume settings and keeps a short log of the cues it was asked to play.

use crate::services::SoundSink;
use crate::settings::Settings;

/// Most recent cues kept by [`AudioManager::played`]
pub const MAX_PLAYED_HISTORY: usize = 32;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Level win condition reached
    Win,
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: Vec<SoundEffect>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Recently played cues, oldest first, at most [`MAX_PLAYED_HISTORY`]
    pub fn played(&self) -> &[SoundEffect] {
        &self.played
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            log::debug!("Skipping {effect:?}, audio silent");
            return;
        }
        log::info!("Playing {effect:?} at volume {vol:.2}");
        if self.played.len() == MAX_PLAYED_HISTORY {
            self.played.remove(0);
        }
        self.played.push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_records_cue() {
        let mut audio = AudioManager::new();
        audio.play(SoundEffect::Win);
        assert_eq!(audio.played(), [SoundEffect::Win]);
    }

    #[test]
    fn test_played_history_is_capped() {
        let mut audio = AudioManager::new();
        for _ in 0..MAX_PLAYED_HISTORY + 5 {
            audio.play(SoundEffect::Win);
        }
        assert_eq!(audio.played().len(), MAX_PLAYED_HISTORY);
    }

    #[test]
    fn test_muted_skips_cue() {
        let mut audio = AudioManager::new();
        audio.set_muted(true);
        audio.play(SoundEffect::Win);
        assert!(audio.played().is_empty());
    }

    #[test]
    fn test_volume_clamped() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(2.0);
        audio.set_sfx_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);

        audio.set_sfx_volume(0.5);
        assert!((audio.effective_volume() - 0.5).abs() < f32::EPSILON);
    }
}
