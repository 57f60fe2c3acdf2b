/// Result of a play request
///
/// None of these are errors: a game asks for a sound every frame it wants one,
/// and a dropped request is logged and otherwise ignored.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback started on channel `line`
    Started { line: usize },

    /// The requested looping clip is already the current track
    AlreadyPlaying,

    /// Every channel of the line is busy
    NoFreeChannel,

    /// Clip index out of range for the category's bank
    UnknownClip,

    /// The channel refused the clip (decode failure)
    Failed,
}

impl PlayOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, PlayOutcome::Started { .. })
    }
}

impl fmt::Display for PlayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayOutcome::Started { line } => write!(f, "started on line {}", line),
            PlayOutcome::AlreadyPlaying => write!(f, "already playing"),
            PlayOutcome::NoFreeChannel => write!(f, "no free channel"),
            PlayOutcome::UnknownClip => write!(f, "unknown clip"),
            PlayOutcome::Failed => write!(f, "failed"),
        }
    }
}
