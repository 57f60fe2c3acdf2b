/// Audio clips and clip banks
///
/// Clips are preloaded into memory once and shared by every channel that
/// plays them.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::AudioError;

/// A fixed, preloaded audio asset
#[derive(Clone)]
pub struct AudioClip {
    name: Arc<str>,
    data: Arc<[u8]>,
}

impl AudioClip {
    /// Wrap already-loaded encoded audio bytes
    pub fn from_bytes(name: impl Into<Arc<str>>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Read an encoded audio file into memory
    pub fn load(path: &Path) -> Result<Self, AudioError> {
        let data = std::fs::read(path).map_err(|source| AudioError::LoadFailed {
            path: path.display().to_string(),
            source,
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!("Preloaded clip {} ({} bytes)", name, data.len());
        Ok(Self::from_bytes(name, data))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Encoded bytes, shared without copying
    pub fn data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Two clips are the same clip when they share one preloaded buffer.
impl PartialEq for AudioClip {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data) && self.name == other.name
    }
}

impl Eq for AudioClip {}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioClip")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Ordered clip array for one category, addressed by index
#[derive(Debug, Clone, Default)]
pub struct ClipBank {
    clips: Vec<AudioClip>,
}

impl ClipBank {
    pub fn new(clips: Vec<AudioClip>) -> Self {
        Self { clips }
    }

    /// Load every path in order; the first unreadable file aborts the load
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self, AudioError> {
        let clips = paths
            .iter()
            .map(|p| AudioClip::load(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { clips })
    }

    /// Clip at `index`, or `None` when out of range
    pub fn get(&self, index: usize) -> Option<&AudioClip> {
        self.clips.get(index)
    }

    pub fn push(&mut self, clip: AudioClip) {
        self.clips.push(clip);
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    #[test]
    fn test_clip_identity() {
        let a = AudioClip::from_bytes("title", vec![1u8, 2, 3]);
        let same = a.clone();
        let lookalike = AudioClip::from_bytes("title", vec![1u8, 2, 3]);

        assert_eq!(a, same);
        assert_ne!(a, lookalike);
    }

    #[test]
    fn test_bank_range_check() {
        let bank = ClipBank::new(vec![
            AudioClip::from_bytes("jump", vec![0u8; 4]),
            AudioClip::from_bytes("coin", vec![0u8; 8]),
        ]);

        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(1).map(|c| c.name()), Some("coin"));
        assert!(bank.get(2).is_none());
        assert!(ClipBank::default().get(0).is_none());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = AudioClip::load(Path::new("nonexistent_clip.ogg"));
        assert!(matches!(result, Err(AudioError::LoadFailed { .. })));
    }

    #[test]
    fn test_load_uses_file_stem_as_name() {
        let path = std::env::temp_dir().join("sound_lines_clip_name_test.wav");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"RIFF").unwrap();
        drop(file);

        let clip = AudioClip::load(&path);
        let _ = std::fs::remove_file(&path);

        let clip = clip.unwrap();
        assert_eq!(clip.name(), "sound_lines_clip_name_test");
        assert_eq!(clip.len(), 4);
    }
}
