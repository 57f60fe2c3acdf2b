/// Fade driver
///
/// Background thread that advances BGM fades for hosts without a frame loop
/// of their own.

use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, select, tick, Sender};

use super::manager::SharedSoundManager;
use crate::error::AudioError;

/// Ticks a shared [`SoundManager`](super::SoundManager) until dropped
pub struct FadeDriver {
    shutdown_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl FadeDriver {
    /// Start ticking `manager` every `interval`
    pub fn spawn(manager: SharedSoundManager, interval: Duration) -> Result<Self, AudioError> {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(1);
        let ticker = tick(interval);

        let handle = thread::Builder::new()
            .name("sound-fade".to_string())
            .spawn(move || {
                let mut last = Instant::now();
                loop {
                    select! {
                        recv(ticker) -> now => {
                            let Ok(now) = now else { break };
                            let dt = now.saturating_duration_since(last);
                            last = now;
                            manager.lock().update(dt);
                        }
                        recv(shutdown_rx) -> _ => break,
                    }
                }
                tracing::debug!("Fade driver stopped");
            })
            .map_err(AudioError::DriverSpawnFailed)?;

        tracing::debug!("Fade driver started ({}ms tick)", interval.as_millis());
        Ok(Self {
            shutdown_tx,
            handle: Some(handle),
        })
    }

    /// Stop the thread and wait for it to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.shutdown_tx.try_send(());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Fade driver thread panicked");
            }
        }
    }
}

impl Drop for FadeDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_system::{AudioClip, ClipBank, ClipBanks, NullBackend, SoundCategory, SoundManager};
    use crate::config::Config;

    #[test]
    fn test_driver_completes_fade_in() {
        let backend = NullBackend::new();
        let banks = ClipBanks {
            bgm: ClipBank::new(vec![AudioClip::from_bytes("title", vec![0u8; 8])]),
            ..Default::default()
        };
        let shared = SoundManager::new(&Config::default(), &backend, banks)
            .unwrap()
            .into_shared();

        shared.lock().play_bgm(0, Duration::from_millis(50));
        let driver = FadeDriver::spawn(shared.clone(), Duration::from_millis(5)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while shared.lock().is_fading() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        driver.shutdown();

        assert!(!shared.lock().is_fading());
        let handles = backend.handles(SoundCategory::Bgm);
        assert_eq!(handles[0].volume(), 1.0);
    }
}
