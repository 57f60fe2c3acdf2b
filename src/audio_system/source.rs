/// Sound categories
///
/// Each category owns one fixed-size line of playback channels.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Sound categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCategory {
    /// Background music (looping, one current track)
    Bgm,

    /// Sound effects (one-shot)
    Se,

    /// Character voice (one-shot)
    Voice,
}

impl fmt::Display for SoundCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoundCategory::Bgm => write!(f, "BGM"),
            SoundCategory::Se => write!(f, "SE"),
            SoundCategory::Voice => write!(f, "Voice"),
        }
    }
}

impl SoundCategory {
    pub const ALL: [SoundCategory; 3] = [SoundCategory::Bgm, SoundCategory::Se, SoundCategory::Voice];

    /// Number of channels a line of this category gets by default
    pub fn default_line_count(&self) -> usize {
        match self {
            SoundCategory::Bgm => 2,
            SoundCategory::Se => 8,
            SoundCategory::Voice => 8,
        }
    }

    /// Whether clips of this category loop until stopped
    pub fn is_looping(&self) -> bool {
        matches!(self, SoundCategory::Bgm)
    }

    /// Whether play/stop of this category can fade
    pub fn supports_fade(&self) -> bool {
        matches!(self, SoundCategory::Bgm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_display() {
        assert_eq!(SoundCategory::Bgm.to_string(), "BGM");
        assert_eq!(SoundCategory::Se.to_string(), "SE");
        assert_eq!(SoundCategory::Voice.to_string(), "Voice");
    }

    #[test]
    fn test_default_line_counts() {
        assert_eq!(SoundCategory::Bgm.default_line_count(), 2);
        assert_eq!(SoundCategory::Se.default_line_count(), 8);
        assert_eq!(SoundCategory::Voice.default_line_count(), 8);
    }

    #[test]
    fn test_only_bgm_loops_and_fades() {
        assert!(SoundCategory::Bgm.is_looping());
        assert!(SoundCategory::Bgm.supports_fade());
        assert!(!SoundCategory::Se.is_looping());
        assert!(!SoundCategory::Voice.supports_fade());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&SoundCategory::Voice).unwrap();
        assert_eq!(json, "\"voice\"");
    }
}
