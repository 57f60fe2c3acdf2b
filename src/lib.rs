//! Pooled game-audio playback.
//!
//! Three fixed lines of playback channels (background music, sound effects,
//! voice) with play / stop / volume per category and linear BGM fades.

pub mod audio_system;
pub mod config;
pub mod error;

pub use audio_system::{PlayOutcome, SharedSoundManager, SoundCategory, SoundManager};
pub use config::Config;
pub use error::{AppResult, AudioError, ConfigError};
