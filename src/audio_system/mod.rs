/// Audio system module
///
/// Pooled playback lines for a game:
/// - BGM: looping, crossfading between two channels
/// - SE and Voice: one-shot, first idle channel wins
///
/// ## Architecture
///
/// ```text
/// SoundManager
///   ├── LoopLine (BGM)        2 channels, linear fades
///   ├── OneShotLine (SE)      8 channels
///   └── OneShotLine (Voice)   8 channels
///
/// Each channel is a Box<dyn Channel> created by a ChannelBackend:
///   ├── RodioBackend  (sink per channel)
///   └── NullBackend   (headless)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use sound_lines::audio_system::{ClipBank, ClipBanks, FadeDriver, RodioBackend, SoundManager};
///
/// let backend = RodioBackend::new()?;
/// let banks = ClipBanks { bgm: ClipBank::load(&["title.ogg"])?, ..Default::default() };
/// let manager = SoundManager::new(&config, &backend, banks)?.into_shared();
/// let _driver = FadeDriver::spawn(manager.clone(), Duration::from_millis(16))?;
///
/// manager.lock().play_bgm(0, Duration::from_secs(2));
/// ```
pub mod channel;
pub mod clip;
pub mod driver;
pub mod effects;
pub mod loop_line;
pub mod manager;
pub mod one_shot_line;
pub mod outcome;
pub mod player;
pub mod source;

// Re-export commonly used types
pub use channel::{Channel, ChannelBackend, NullBackend, NullChannel, NullHandle, PlayMode};
pub use clip::{AudioClip, ClipBank};
pub use driver::FadeDriver;
pub use effects::{Fade, FadeEnd, Volume};
pub use loop_line::LoopLine;
pub use manager::{ClipBanks, SharedSoundManager, SoundManager};
pub use one_shot_line::OneShotLine;
pub use outcome::PlayOutcome;
pub use player::{RodioBackend, RodioChannel};
pub use source::SoundCategory;
