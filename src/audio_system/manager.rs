/// Sound manager
///
/// One looping BGM line and two one-shot lines (SE, voice), each playing
/// clips picked by index from its own bank.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use super::channel::{Channel, ChannelBackend};
use super::clip::{AudioClip, ClipBank};
use super::loop_line::LoopLine;
use super::one_shot_line::OneShotLine;
use super::outcome::PlayOutcome;
use super::source::SoundCategory;
use crate::config::Config;
use crate::error::AudioError;

/// Manager shared between the game loop and the fade driver thread
pub type SharedSoundManager = Arc<Mutex<SoundManager>>;

/// Clip banks for the three categories
#[derive(Debug, Clone, Default)]
pub struct ClipBanks {
    pub bgm: ClipBank,
    pub se: ClipBank,
    pub voice: ClipBank,
}

impl ClipBanks {
    pub fn get(&self, category: SoundCategory) -> &ClipBank {
        match category {
            SoundCategory::Bgm => &self.bgm,
            SoundCategory::Se => &self.se,
            SoundCategory::Voice => &self.voice,
        }
    }
}

pub struct SoundManager {
    bgm: LoopLine,
    se: OneShotLine,
    voice: OneShotLine,
    banks: ClipBanks,
}

impl SoundManager {
    /// Create every line's channels from `backend`
    pub fn new(
        config: &Config,
        backend: &dyn ChannelBackend,
        banks: ClipBanks,
    ) -> Result<Self, AudioError> {
        let channels = |category: SoundCategory| -> Result<Vec<Box<dyn Channel>>, AudioError> {
            (0..config.line(category).channels)
                .map(|index| backend.create_channel(category, index))
                .collect()
        };

        let manager = Self {
            bgm: LoopLine::new(
                SoundCategory::Bgm,
                channels(SoundCategory::Bgm)?,
                config.bgm.volume,
            ),
            se: OneShotLine::new(SoundCategory::Se, channels(SoundCategory::Se)?, config.se.volume),
            voice: OneShotLine::new(
                SoundCategory::Voice,
                channels(SoundCategory::Voice)?,
                config.voice.volume,
            ),
            banks,
        };

        tracing::info!(
            "Sound manager ready on {} backend: BGM {}x{} clips, SE {}x{} clips, Voice {}x{} clips",
            backend.name(),
            manager.bgm.len(),
            manager.banks.bgm.len(),
            manager.se.len(),
            manager.banks.se.len(),
            manager.voice.len(),
            manager.banks.voice.len()
        );
        Ok(manager)
    }

    /// Wrap in the shared handle used by [`FadeDriver`](super::FadeDriver)
    pub fn into_shared(self) -> SharedSoundManager {
        Arc::new(Mutex::new(self))
    }

    fn clip(&self, category: SoundCategory, index: usize) -> Option<AudioClip> {
        let clip = self.banks.get(category).get(index).cloned();
        if clip.is_none() {
            tracing::debug!(
                "{} clip {} out of range ({} clips)",
                category,
                index,
                self.banks.get(category).len()
            );
        }
        clip
    }

    // BGM

    /// Play BGM clip `index` looping, fading in over `fade`
    pub fn play_bgm(&mut self, index: usize, fade: Duration) -> PlayOutcome {
        match self.clip(SoundCategory::Bgm, index) {
            Some(clip) => self.bgm.play(&clip, fade),
            None => PlayOutcome::UnknownClip,
        }
    }

    pub fn stop_bgm(&mut self, fade: Duration) {
        self.bgm.stop(fade);
    }

    pub fn volume_bgm(&mut self, volume: f32) {
        self.bgm.set_volume(volume);
    }

    /// Clip currently looping on the BGM line
    pub fn current_bgm(&self) -> Option<&AudioClip> {
        self.bgm.current_clip()
    }

    pub fn is_bgm_playing(&self) -> bool {
        self.bgm.is_playing()
    }

    // SE

    pub fn play_se(&mut self, index: usize) -> PlayOutcome {
        match self.clip(SoundCategory::Se, index) {
            Some(clip) => self.se.play(&clip),
            None => PlayOutcome::UnknownClip,
        }
    }

    pub fn stop_se(&mut self) {
        self.se.stop();
    }

    pub fn volume_se(&mut self, volume: f32) {
        self.se.set_volume(volume);
    }

    // Voice

    pub fn play_voice(&mut self, index: usize) -> PlayOutcome {
        match self.clip(SoundCategory::Voice, index) {
            Some(clip) => self.voice.play(&clip),
            None => PlayOutcome::UnknownClip,
        }
    }

    pub fn stop_voice(&mut self) {
        self.voice.stop();
    }

    pub fn volume_voice(&mut self, volume: f32) {
        self.voice.set_volume(volume);
    }

    // Whole manager

    /// Advance BGM fades; call once per frame with the frame time
    pub fn update(&mut self, dt: Duration) {
        self.bgm.update(dt);
    }

    /// Silence every line immediately
    pub fn stop_all(&mut self) {
        self.bgm.stop_immediately();
        self.se.stop();
        self.voice.stop();
        tracing::debug!("Stopped all lines");
    }

    pub fn volume(&self, category: SoundCategory) -> f32 {
        match category {
            SoundCategory::Bgm => self.bgm.volume(),
            SoundCategory::Se => self.se.volume(),
            SoundCategory::Voice => self.voice.volume(),
        }
    }

    /// Number of channels of `category` currently producing sound
    pub fn active_count(&self, category: SoundCategory) -> usize {
        match category {
            SoundCategory::Bgm => self.bgm.active_count(),
            SoundCategory::Se => self.se.active_count(),
            SoundCategory::Voice => self.voice.active_count(),
        }
    }

    pub fn clip_count(&self, category: SoundCategory) -> usize {
        self.banks.get(category).len()
    }

    pub fn is_fading(&self) -> bool {
        self.bgm.is_fading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_system::channel::NullBackend;

    fn banks() -> ClipBanks {
        ClipBanks {
            bgm: ClipBank::new(vec![
                AudioClip::from_bytes("title", vec![0u8; 8]),
                AudioClip::from_bytes("field", vec![0u8; 8]),
            ]),
            se: ClipBank::new(vec![AudioClip::from_bytes("jump", vec![0u8; 8])]),
            voice: ClipBank::new(vec![AudioClip::from_bytes("hello", vec![0u8; 8])]),
        }
    }

    #[test]
    fn test_manager_creates_lines_from_config() {
        let backend = NullBackend::new();
        let mut config = Config::default();
        config.se.channels = 4;
        let manager = SoundManager::new(&config, &backend, banks()).unwrap();

        assert_eq!(backend.handles(SoundCategory::Bgm).len(), 2);
        assert_eq!(backend.handles(SoundCategory::Se).len(), 4);
        assert_eq!(backend.handles(SoundCategory::Voice).len(), 8);
        assert_eq!(manager.clip_count(SoundCategory::Bgm), 2);
        assert_eq!(manager.volume(SoundCategory::Se), 1.0);
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let backend = NullBackend::new();
        let mut manager = SoundManager::new(&Config::default(), &backend, banks()).unwrap();

        assert_eq!(manager.play_bgm(2, Duration::ZERO), PlayOutcome::UnknownClip);
        assert_eq!(manager.play_se(1), PlayOutcome::UnknownClip);
        assert_eq!(manager.play_voice(usize::MAX), PlayOutcome::UnknownClip);
        assert!(!manager.is_bgm_playing());
        assert_eq!(manager.active_count(SoundCategory::Se), 0);
    }

    #[test]
    fn test_stop_all() {
        let backend = NullBackend::new();
        let mut manager = SoundManager::new(&Config::default(), &backend, banks()).unwrap();

        manager.play_bgm(0, Duration::from_secs(1));
        manager.play_se(0);
        manager.play_voice(0);
        manager.stop_all();

        for category in SoundCategory::ALL {
            assert_eq!(manager.active_count(category), 0);
        }
        assert!(!manager.is_fading());
    }
}
