/// Playback channels
///
/// A channel is one reusable playback slot. Lines drive channels only through
/// the [`Channel`] trait, so the same line logic runs on a real output device
/// or headless.

use std::sync::Arc;

use parking_lot::Mutex;

use super::clip::AudioClip;
use super::source::SoundCategory;
use crate::error::AudioError;

/// How a clip is played on a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Repeat until stopped
    Loop,

    /// Play to the end once
    Once,
}

/// One playback slot bound to at most one clip at a time
pub trait Channel: Send {
    /// Start `clip` from the beginning, replacing whatever was queued
    fn play(&mut self, clip: &AudioClip, mode: PlayMode) -> Result<(), AudioError>;

    /// Stop playback; the assigned clip is kept
    fn stop(&mut self);

    /// Whether audio is currently audible or queued on this channel
    fn is_playing(&self) -> bool;

    /// Clip most recently assigned to this channel
    fn clip(&self) -> Option<&AudioClip>;

    /// Forget the assigned clip
    fn clear_clip(&mut self);

    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);
}

/// Factory for the channels of every line
pub trait ChannelBackend {
    fn create_channel(
        &self,
        category: SoundCategory,
        index: usize,
    ) -> Result<Box<dyn Channel>, AudioError>;

    /// Human-readable backend name for logs
    fn name(&self) -> &'static str;
}

/// Observable state of a headless channel
#[derive(Debug, Clone, Default)]
pub struct NullState {
    pub clip: Option<AudioClip>,
    pub playing: bool,
    pub looping: bool,
    pub volume: f32,
    pub play_count: usize,
}

/// Shared view of a [`NullChannel`], kept by the host after the channel is
/// handed to a line
#[derive(Debug, Clone, Default)]
pub struct NullHandle(Arc<Mutex<NullState>>);

impl NullHandle {
    pub fn snapshot(&self) -> NullState {
        self.0.lock().clone()
    }

    pub fn is_playing(&self) -> bool {
        self.0.lock().playing
    }

    pub fn volume(&self) -> f32 {
        self.0.lock().volume
    }

    pub fn clip_name(&self) -> Option<String> {
        self.0.lock().clip.as_ref().map(|c| c.name().to_string())
    }

    /// Mark a one-shot clip as having reached its end; looping clips never end
    pub fn finish(&self) {
        let mut state = self.0.lock();
        if !state.looping {
            state.playing = false;
        }
    }
}

/// Channel that tracks playback state without producing sound
#[derive(Debug, Default)]
pub struct NullChannel {
    state: Arc<Mutex<NullState>>,
    // Mirror of state.clip so `clip()` can hand out a reference
    clip: Option<AudioClip>,
}

impl NullChannel {
    pub fn new() -> (Self, NullHandle) {
        let channel = Self::default();
        let handle = NullHandle(Arc::clone(&channel.state));
        (channel, handle)
    }
}

impl Channel for NullChannel {
    fn play(&mut self, clip: &AudioClip, mode: PlayMode) -> Result<(), AudioError> {
        let mut state = self.state.lock();
        state.clip = Some(clip.clone());
        state.playing = true;
        state.looping = mode == PlayMode::Loop;
        state.play_count += 1;
        self.clip = Some(clip.clone());
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = self.state.lock();
        state.playing = false;
        state.looping = false;
    }

    fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    fn clear_clip(&mut self) {
        self.state.lock().clip = None;
        self.clip = None;
    }

    fn volume(&self) -> f32 {
        self.state.lock().volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.lock().volume = volume;
    }
}

/// Backend producing [`NullChannel`]s, recording a handle for each
#[derive(Debug, Default)]
pub struct NullBackend {
    handles: Mutex<Vec<(SoundCategory, usize, NullHandle)>>,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles for the channels of `category`, in line order
    pub fn handles(&self, category: SoundCategory) -> Vec<NullHandle> {
        let mut found: Vec<_> = self
            .handles
            .lock()
            .iter()
            .filter(|(c, _, _)| *c == category)
            .map(|(_, index, handle)| (*index, handle.clone()))
            .collect();
        found.sort_by_key(|(index, _)| *index);
        found.into_iter().map(|(_, handle)| handle).collect()
    }
}

impl ChannelBackend for NullBackend {
    fn create_channel(
        &self,
        category: SoundCategory,
        index: usize,
    ) -> Result<Box<dyn Channel>, AudioError> {
        let (channel, handle) = NullChannel::new();
        self.handles.lock().push((category, index, handle));
        Ok(Box::new(channel))
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
