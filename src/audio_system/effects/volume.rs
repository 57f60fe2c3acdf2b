/// Volume level
///
/// Line volume as a value always kept within 0.0-1.0.

/// Clamped volume level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Volume multiplier (0.0-1.0)
    level: f32,
}

impl Volume {
    /// Create a new volume level
    pub fn new(level: f32) -> Self {
        Self {
            level: clamp_level(level),
        }
    }

    /// Get the volume level
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Set the volume level
    pub fn set_level(&mut self, level: f32) {
        self.level = clamp_level(level);
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.level == 0.0
    }

    /// Mute
    pub fn mute(&mut self) {
        self.level = 0.0;
    }

    /// Unmute to a specific level
    pub fn unmute(&mut self, level: f32) {
        self.level = clamp_level(level);
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self { level: 1.0 }
    }
}

/// NaN maps to silence
fn clamp_level(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}
