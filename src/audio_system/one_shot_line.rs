/// One-shot line
///
/// Fire-and-forget playback on the first idle channel. A busy line drops the
/// request rather than cutting off a sound already playing.

use super::channel::{Channel, PlayMode};
use super::clip::AudioClip;
use super::effects::Volume;
use super::outcome::PlayOutcome;
use super::source::SoundCategory;

/// Channel pool for sound effects and voice
pub struct OneShotLine {
    category: SoundCategory,
    channels: Vec<Box<dyn Channel>>,
    volume: Volume,
}

impl OneShotLine {
    pub fn new(category: SoundCategory, channels: Vec<Box<dyn Channel>>, volume: f32) -> Self {
        let volume = Volume::new(volume);
        let mut channels = channels;
        for channel in &mut channels {
            channel.set_volume(volume.level());
        }
        Self {
            category,
            channels,
            volume,
        }
    }

    /// Play `clip` once on the first idle channel
    pub fn play(&mut self, clip: &AudioClip) -> PlayOutcome {
        let Some(index) = self.channels.iter().position(|c| !c.is_playing()) else {
            tracing::warn!(
                "sound not play: all {} {} channels busy, dropped {}",
                self.channels.len(),
                self.category,
                clip.name()
            );
            return PlayOutcome::NoFreeChannel;
        };

        let channel = &mut self.channels[index];
        channel.stop();
        channel.set_volume(self.volume.level());
        if let Err(e) = channel.play(clip, PlayMode::Once) {
            tracing::warn!("{} failed to play {}: {}", self.category, clip.name(), e);
            return PlayOutcome::Failed;
        }

        tracing::debug!("{} line {} playing {}", self.category, index, clip.name());
        PlayOutcome::Started { line: index }
    }

    /// Stop every channel and release its clip
    pub fn stop(&mut self) {
        for channel in &mut self.channels {
            channel.stop();
            channel.clear_clip();
        }
        tracing::debug!("Stopped all {} channels", self.category);
    }

    /// Set the line volume, applied to every channel including playing ones
    pub fn set_volume(&mut self, volume: f32) {
        self.volume.set_level(volume);
        for channel in &mut self.channels {
            channel.set_volume(self.volume.level());
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn active_count(&self) -> usize {
        self.channels.iter().filter(|c| c.is_playing()).count()
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
