/// Looping line
///
/// A small pool of channels of which at most one is "current". Starting a
/// new track fades the current one out and the new one in on a different
/// channel, so two channels are enough for a crossfade.

use std::time::Duration;

use super::channel::{Channel, PlayMode};
use super::clip::AudioClip;
use super::effects::{Fade, FadeEnd, Volume};
use super::outcome::PlayOutcome;
use super::source::SoundCategory;

struct Slot {
    channel: Box<dyn Channel>,
    fade: Option<Fade>,
}

/// Channel pool for looping background music
pub struct LoopLine {
    category: SoundCategory,
    slots: Vec<Slot>,
    volume: Volume,
    current: Option<usize>,
    stopping: bool,
}

impl LoopLine {
    pub fn new(category: SoundCategory, channels: Vec<Box<dyn Channel>>, volume: f32) -> Self {
        if channels.len() < 2 {
            tracing::warn!(
                "{} line has {} channel(s); consecutive tracks cannot crossfade",
                category,
                channels.len()
            );
        }
        Self {
            category,
            slots: channels
                .into_iter()
                .map(|channel| Slot { channel, fade: None })
                .collect(),
            volume: Volume::new(volume),
            current: None,
            stopping: false,
        }
    }

    /// Start `clip` looping, fading it in over `fade`
    pub fn play(&mut self, clip: &AudioClip, fade: Duration) -> PlayOutcome {
        if let Some(current) = self.current {
            let channel = &self.slots[current].channel;
            if channel.is_playing() && !self.stopping {
                if channel.clip() == Some(clip) {
                    tracing::debug!("{} already playing {}", self.category, clip.name());
                    return PlayOutcome::AlreadyPlaying;
                }
                self.stop(fade);
            }
        }

        let Some(index) = (0..self.slots.len()).find(|i| Some(*i) != self.current) else {
            tracing::warn!("sound not play: no free {} channel for {}", self.category, clip.name());
            return PlayOutcome::NoFreeChannel;
        };

        let target = self.volume.level();
        let slot = &mut self.slots[index];
        // A fade-out still running here would stop the new track on completion
        slot.fade = None;
        slot.channel.stop();
        slot.channel.set_volume(0.0);
        if let Err(e) = slot.channel.play(clip, PlayMode::Loop) {
            tracing::warn!("{} failed to play {}: {}", self.category, clip.name(), e);
            return PlayOutcome::Failed;
        }

        let mut fade_in = Fade::fade_in(target, fade);
        if fade_in.is_finished() {
            slot.channel.set_volume(fade_in.advance(Duration::ZERO).volume);
        } else {
            slot.fade = Some(fade_in);
        }

        tracing::info!(
            "{} line {} playing {} (fade {}ms)",
            self.category,
            index,
            clip.name(),
            fade.as_millis()
        );
        self.current = Some(index);
        self.stopping = false;
        PlayOutcome::Started { line: index }
    }

    /// Fade the current track out over `fade`, then stop it
    pub fn stop(&mut self, fade: Duration) {
        let Some(current) = self.current else {
            return;
        };

        // A later stop replaces a fade-out already running
        let slot = &mut self.slots[current];
        let fade_out = Fade::fade_out(slot.channel.volume(), fade);
        self.stopping = true;

        if fade_out.is_finished() {
            slot.fade = None;
            slot.channel.set_volume(0.0);
            slot.channel.stop();
        } else {
            slot.fade = Some(fade_out);
        }
        tracing::debug!("{} line {} stopping (fade {}ms)", self.category, current, fade.as_millis());
    }

    /// Set the line volume; applied to the current track at once
    pub fn set_volume(&mut self, volume: f32) {
        self.volume.set_level(volume);
        let Some(current) = self.current else {
            return;
        };
        if self.stopping {
            return;
        }
        let slot = &mut self.slots[current];
        slot.fade = None;
        slot.channel.set_volume(self.volume.level());
    }

    /// Advance every running fade by `dt`
    pub fn update(&mut self, dt: Duration) {
        for slot in &mut self.slots {
            let Some(fade) = slot.fade.as_mut() else {
                continue;
            };
            let step = fade.advance(dt);
            slot.channel.set_volume(step.volume);
            if step.finished {
                if fade.on_complete() == FadeEnd::Stop {
                    slot.channel.stop();
                }
                slot.fade = None;
            }
        }
    }

    /// Stop every channel at once, dropping running fades
    pub fn stop_immediately(&mut self) {
        for slot in &mut self.slots {
            slot.fade = None;
            slot.channel.stop();
        }
        if self.current.is_some() {
            self.stopping = true;
        }
    }

    /// Clip of the current track, if it is playing and not fading out
    pub fn current_clip(&self) -> Option<&AudioClip> {
        let current = self.current?;
        let channel = &self.slots[current].channel;
        if self.stopping || !channel.is_playing() {
            return None;
        }
        channel.clip()
    }

    pub fn current_line(&self) -> Option<usize> {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.current_clip().is_some()
    }

    pub fn is_fading(&self) -> bool {
        self.slots.iter().any(|s| s.fade.is_some())
    }

    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.channel.is_playing()).count()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
