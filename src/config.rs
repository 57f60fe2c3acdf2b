use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::audio_system::SoundCategory;
use crate::error::ConfigError;

/// Settings for one category's line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineConfig {
    /// Number of channels in the line
    pub channels: usize,

    /// Initial line volume (0.0-1.0)
    pub volume: f32,

    /// Clip files, addressed by index in play calls
    #[serde(default)]
    pub clips: Vec<String>,
}

impl LineConfig {
    fn for_category(category: SoundCategory) -> Self {
        Self {
            channels: category.default_line_count(),
            volume: 1.0,
            clips: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Background music line
    pub bgm: LineConfig,

    /// Sound effect line
    pub se: LineConfig,

    /// Voice line
    pub voice: LineConfig,

    /// Default BGM fade-in when none is given, in milliseconds
    #[serde(default)]
    pub bgm_fade_in_ms: u64,

    /// Default BGM fade-out when none is given, in milliseconds
    #[serde(default)]
    pub bgm_fade_out_ms: u64,

    /// Interval of the background fade tick, in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_tick_ms() -> u64 {
    16
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bgm: LineConfig::for_category(SoundCategory::Bgm),
            se: LineConfig::for_category(SoundCategory::Se),
            voice: LineConfig::for_category(SoundCategory::Voice),
            bgm_fade_in_ms: 0,
            bgm_fade_out_ms: 0,
            tick_ms: default_tick_ms(),
        }
    }
}

impl Config {
    /// Load configuration from `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source,
        };

        let content = fs::read_to_string(path).map_err(|e| load_failed(e.into()))?;
        let config: Config = serde_json::from_str(&content).map_err(|e| load_failed(e.into()))?;
        config.validate()?;

        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Load configuration from `path`, creating a default file if missing
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Config::default();
            config.save(path)?;
            tracing::info!("Created default config at: {}", path.display());
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |source: Box<dyn std::error::Error + Send + Sync>| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source,
        };

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| save_failed(e.into()))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| save_failed(e.into()))?;
        fs::write(path, json).map_err(|e| save_failed(e.into()))?;

        Ok(())
    }

    /// Reject settings the lines cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in SoundCategory::ALL {
            let line = self.line(category);
            if line.channels == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{} line needs at least one channel",
                    category
                )));
            }
            if !(0.0..=1.0).contains(&line.volume) {
                return Err(ConfigError::Invalid(format!(
                    "{} volume {} is outside 0.0-1.0",
                    category, line.volume
                )));
            }
        }
        if self.bgm.channels == 1 {
            tracing::warn!("BGM line has a single channel; a new track cannot start while one is current");
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn line(&self, category: SoundCategory) -> &LineConfig {
        match category {
            SoundCategory::Bgm => &self.bgm,
            SoundCategory::Se => &self.se,
            SoundCategory::Voice => &self.voice,
        }
    }

    pub fn bgm_fade_in(&self) -> Duration {
        Duration::from_millis(self.bgm_fade_in_ms)
    }

    pub fn bgm_fade_out(&self) -> Duration {
        Duration::from_millis(self.bgm_fade_out_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Clip paths of `category`, resolved against `base` when relative
    pub fn clip_paths(&self, category: SoundCategory, base: &Path) -> Vec<PathBuf> {
        self.line(category)
            .clips
            .iter()
            .map(|clip| base.join(clip))
            .collect()
    }

    /// Default config file path (in app's base directory)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let exe_path = env::current_exe().map_err(|_| ConfigError::NoExecutableDir)?;
        let exe_dir = exe_path.parent().ok_or(ConfigError::NoExecutableDir)?;

        Ok(exe_dir.join("config").join("sound-lines.json"))
    }
}
