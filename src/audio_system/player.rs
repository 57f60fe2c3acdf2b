/// Rodio output backend
///
/// One output stream per process, one sink per channel.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use super::channel::{Channel, ChannelBackend, PlayMode};
use super::clip::AudioClip;
use super::source::SoundCategory;
use crate::error::AudioError;

/// Owns the output device. Must outlive every channel it created, and stays
/// on the thread that opened it.
pub struct RodioBackend {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioBackend {
    /// Open the default output device
    pub fn new() -> Result<Self, AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;
        tracing::debug!("Opened default audio output stream");
        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl ChannelBackend for RodioBackend {
    fn create_channel(
        &self,
        category: SoundCategory,
        index: usize,
    ) -> Result<Box<dyn Channel>, AudioError> {
        let sink = Sink::try_new(&self.stream_handle).map_err(|e| AudioError::ChannelInitFailed {
            category: category.to_string(),
            index,
            source: Box::new(e),
        })?;

        Ok(Box::new(RodioChannel {
            label: format!("{}#{}", category, index),
            stream_handle: self.stream_handle.clone(),
            sink,
            clip: None,
            volume: 1.0,
        }))
    }

    fn name(&self) -> &'static str {
        "rodio"
    }
}

/// Channel backed by a rodio sink
pub struct RodioChannel {
    label: String,
    stream_handle: OutputStreamHandle,
    sink: Sink,
    clip: Option<AudioClip>,
    volume: f32,
}

impl RodioChannel {
    /// Drop anything queued and start from a fresh sink
    fn reset_sink(&mut self) {
        self.sink.stop();
        match Sink::try_new(&self.stream_handle) {
            Ok(sink) => {
                sink.set_volume(self.volume);
                self.sink = sink;
            }
            Err(e) => tracing::warn!("Failed to recreate sink for {}: {}", self.label, e),
        }
    }
}

impl Channel for RodioChannel {
    fn play(&mut self, clip: &AudioClip, mode: PlayMode) -> Result<(), AudioError> {
        let decoder = Decoder::new(Cursor::new(clip.data())).map_err(|e| AudioError::DecodeFailed {
            clip: clip.name().to_string(),
            source: Box::new(e),
        })?;

        if !self.sink.empty() {
            self.reset_sink();
        }
        self.clip = Some(clip.clone());

        match mode {
            PlayMode::Loop => self.sink.append(decoder.repeat_infinite()),
            PlayMode::Once => self.sink.append(decoder),
        }
        self.sink.set_volume(self.volume);
        self.sink.play();

        tracing::debug!("{} playing {} ({:?})", self.label, clip.name(), mode);
        Ok(())
    }

    fn stop(&mut self) {
        if !self.sink.empty() {
            tracing::debug!("Stopping {}", self.label);
        }
        self.reset_sink();
    }

    fn is_playing(&self) -> bool {
        !self.sink.empty() && !self.sink.is_paused()
    }

    fn clip(&self) -> Option<&AudioClip> {
        self.clip.as_ref()
    }

    fn clear_clip(&mut self) {
        self.clip = None;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.sink.set_volume(volume);
    }
}
