// Integration tests for sound-lines
// These drive the public API end to end on the headless backend

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use sound_lines::audio_system::{
    AudioClip, ClipBank, ClipBanks, NullBackend, SoundCategory, SoundManager,
};
use sound_lines::{Config, PlayOutcome};

fn clip(name: &str) -> AudioClip {
    AudioClip::from_bytes(name, vec![0u8; 64])
}

fn banks() -> ClipBanks {
    ClipBanks {
        bgm: ClipBank::new(vec![clip("title"), clip("field"), clip("battle")]),
        se: ClipBank::new(vec![clip("jump"), clip("coin")]),
        voice: ClipBank::new(vec![clip("greeting")]),
    }
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn test_bgm_switch_crossfades_and_keeps_one_track() {
    let backend = NullBackend::new();
    let mut manager = SoundManager::new(&Config::default(), &backend, banks()).unwrap();
    let bgm = backend.handles(SoundCategory::Bgm);

    assert_eq!(manager.play_bgm(0, ms(200)), PlayOutcome::Started { line: 0 });
    assert_eq!(bgm[0].volume(), 0.0);
    manager.update(ms(200));
    assert_eq!(bgm[0].volume(), 1.0);

    // Same track again: nothing restarts
    assert_eq!(manager.play_bgm(0, ms(200)), PlayOutcome::AlreadyPlaying);
    assert_eq!(bgm[0].snapshot().play_count, 1);

    assert_eq!(manager.play_bgm(1, ms(200)), PlayOutcome::Started { line: 1 });
    assert_eq!(manager.current_bgm().map(|c| c.name()), Some("field"));
    manager.update(ms(100));
    assert_eq!(manager.active_count(SoundCategory::Bgm), 2);
    manager.update(ms(100));
    assert_eq!(manager.active_count(SoundCategory::Bgm), 1);
    assert!(bgm[1].is_playing());
}

#[test]
fn test_bgm_volume_and_stop() {
    let backend = NullBackend::new();
    let mut manager = SoundManager::new(&Config::default(), &backend, banks()).unwrap();
    let bgm = backend.handles(SoundCategory::Bgm);

    manager.volume_bgm(0.5);
    manager.play_bgm(2, Duration::ZERO);
    assert_eq!(bgm[0].volume(), 0.5);

    manager.volume_bgm(0.2);
    assert_eq!(bgm[0].volume(), 0.2);

    manager.stop_bgm(ms(100));
    assert!(!manager.is_bgm_playing());
    manager.update(ms(100));
    assert_eq!(manager.active_count(SoundCategory::Bgm), 0);

    // Stopping again with nothing current is harmless
    manager.stop_bgm(ms(100));
    manager.update(ms(100));
}

#[test]
fn test_se_pool_exhaustion() {
    let backend = NullBackend::new();
    let mut config = Config::default();
    config.se.channels = 3;
    let mut manager = SoundManager::new(&config, &backend, banks()).unwrap();
    let se = backend.handles(SoundCategory::Se);

    for _ in 0..3 {
        assert!(manager.play_se(0).is_started());
    }
    assert_eq!(manager.play_se(1), PlayOutcome::NoFreeChannel);

    se[1].finish();
    assert_eq!(manager.play_se(1), PlayOutcome::Started { line: 1 });
    assert_eq!(se[1].clip_name().as_deref(), Some("coin"));

    manager.stop_se();
    assert_eq!(manager.active_count(SoundCategory::Se), 0);
}

#[test]
fn test_voice_volume_is_independent() {
    let backend = NullBackend::new();
    let mut manager = SoundManager::new(&Config::default(), &backend, banks()).unwrap();

    manager.volume_voice(0.3);
    manager.volume_se(0.9);
    manager.play_voice(0);

    let voice = backend.handles(SoundCategory::Voice);
    assert_eq!(voice[0].volume(), 0.3);
    assert_eq!(manager.volume(SoundCategory::Se), 0.9);
    assert_eq!(manager.volume(SoundCategory::Bgm), 1.0);

    manager.stop_voice();
    assert!(voice[0].clip_name().is_none());
}

#[test]
fn test_config_file_drives_lines_and_clips() {
    let dir = std::env::temp_dir().join("sound_lines_integration");
    let clip_dir = dir.join("se");
    fs::create_dir_all(&clip_dir).unwrap();
    fs::write(clip_dir.join("jump.wav"), b"RIFFdata").unwrap();

    let config_path: PathBuf = dir.join("sound-lines.json");
    fs::write(
        &config_path,
        r#"{
            "bgm": { "channels": 2, "volume": 0.8 },
            "se": { "channels": 2, "volume": 0.5, "clips": ["se/jump.wav"] },
            "voice": { "channels": 1, "volume": 1.0 },
            "bgm_fade_in_ms": 750
        }"#,
    )
    .unwrap();

    let config = Config::load(&config_path).unwrap();
    assert_eq!(config.bgm_fade_in(), ms(750));

    let banks = ClipBanks {
        se: ClipBank::load(&config.clip_paths(SoundCategory::Se, &dir)).unwrap(),
        ..Default::default()
    };
    let backend = NullBackend::new();
    let mut manager = SoundManager::new(&config, &backend, banks).unwrap();

    assert_eq!(manager.clip_count(SoundCategory::Se), 1);
    assert_eq!(manager.play_se(0), PlayOutcome::Started { line: 0 });
    assert_eq!(backend.handles(SoundCategory::Se)[0].volume(), 0.5);
    assert_eq!(backend.handles(SoundCategory::Voice).len(), 1);
    assert_eq!(manager.play_bgm(0, config.bgm_fade_in()), PlayOutcome::UnknownClip);

    let _ = fs::remove_dir_all(&dir);
}
