use thiserror::Error;

/// Library errors using thiserror for structured error handling.
///
/// Playback-path failures never abort the caller's frame: the lines log them
/// and report a [`PlayOutcome`](crate::audio_system::PlayOutcome) instead.
/// These errors surface from construction, clip loading and configuration.

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio file: {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode audio clip: {clip}")]
    DecodeFailed {
        clip: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to initialize audio output stream")]
    StreamInitFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to create playback channel {index} for {category}")]
    ChannelInitFailed {
        category: String,
        index: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to start fade driver thread")]
    DriverSpawnFailed(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}")]
    LoadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to save configuration to {path}")]
    SaveFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine executable directory")]
    NoExecutableDir,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = ConfigError::Invalid("bgm line count must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: bgm line count must be at least 1"
        );

        let err = AudioError::ChannelInitFailed {
            category: "SE".to_string(),
            index: 3,
            source: "no device".into(),
        };
        assert_eq!(err.to_string(), "Failed to create playback channel 3 for SE");
    }

    #[test]
    fn test_error_source_chain() {
        use std::io;

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let audio_err = AudioError::LoadFailed {
            path: "/test/bgm/title.ogg".to_string(),
            source: io_err,
        };

        assert!(audio_err.source().is_some());
        assert_eq!(
            audio_err.to_string(),
            "Failed to load audio file: /test/bgm/title.ogg"
        );
    }
}
