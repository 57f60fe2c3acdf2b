/// Fade in/out effect
///
/// Linear volume interpolation over a fixed duration, advanced by frame time.

use std::time::Duration;

/// What happens to the channel once the fade reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeEnd {
    /// Keep playing at the target volume
    Hold,

    /// Stop the channel
    Stop,
}

/// Result of advancing a fade by one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeStep {
    pub volume: f32,
    pub finished: bool,
}

/// An in-flight volume fade
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    on_complete: FadeEnd,
}

impl Fade {
    /// Create a new fade
    pub fn new(from: f32, to: f32, duration: Duration, on_complete: FadeEnd) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            on_complete,
        }
    }

    /// Fade up from silence, keep playing afterwards
    pub fn fade_in(to: f32, duration: Duration) -> Self {
        Self::new(0.0, to, duration, FadeEnd::Hold)
    }

    /// Fade down to silence, then stop
    pub fn fade_out(from: f32, duration: Duration) -> Self {
        Self::new(from, 0.0, duration, FadeEnd::Stop)
    }

    /// Move the fade forward by `dt` and return the volume to apply
    pub fn advance(&mut self, dt: Duration) -> FadeStep {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        FadeStep {
            volume: self.volume(),
            finished: self.is_finished(),
        }
    }

    /// Volume at the current position
    pub fn volume(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn on_complete(&self) -> FadeEnd {
        self.on_complete
    }
}
