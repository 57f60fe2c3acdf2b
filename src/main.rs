use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};

use sound_lines::audio_system::{
    ChannelBackend, ClipBank, ClipBanks, FadeDriver, NullBackend, RodioBackend, SoundCategory,
    SoundManager,
};
use sound_lines::{AppResult, Config};

const LOG_TARGET_STARTUP: &str = "sound_lines::startup";

const USAGE: &str = "usage: sound-lines [--config PATH] <command>

commands:
  play-bgm <index> [fade_ms]   loop a BGM clip, fading in
  play-se <index>              play a sound effect once
  play-voice <index>           play a voice clip once
  demo                         walk through every line";

/// Initialize tracing with file rotation
///
/// Logs go to the user config folder (SoundLines/logs), rotated daily.
/// Debug builds also log to the console.
fn initialize_tracing() {
    use tracing_appender::rolling;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let log_dir = dirs::config_dir()
        .map(|dir| dir.join("SoundLines").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
    }

    let file_appender = rolling::daily(&log_dir, "sound-lines.log");

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    #[cfg(debug_assertions)]
    {
        let console_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer)
            .init();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();
    }

    tracing::info!(target: LOG_TARGET_STARTUP, "Log directory: {}", log_dir.display());
}

enum Command {
    PlayBgm { index: usize, fade: Option<Duration> },
    PlaySe(usize),
    PlayVoice(usize),
    Demo,
}

fn parse_index(arg: Option<&String>, what: &str) -> AppResult<usize> {
    let arg = arg.with_context(|| format!("missing {}", what))?;
    arg.parse()
        .with_context(|| format!("invalid {}: {}", what, arg))
}

fn parse_args(args: &[String]) -> AppResult<(Option<PathBuf>, Command)> {
    let mut config_path = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter.next().context("--config needs a path")?;
            config_path = Some(PathBuf::from(path));
        } else {
            rest.push(arg.clone());
        }
    }

    let command = match rest.first().map(String::as_str) {
        Some("play-bgm") => Command::PlayBgm {
            index: parse_index(rest.get(1), "BGM index")?,
            fade: rest
                .get(2)
                .map(|ms| ms.parse::<u64>().map(Duration::from_millis))
                .transpose()
                .context("invalid fade_ms")?,
        },
        Some("play-se") => Command::PlaySe(parse_index(rest.get(1), "SE index")?),
        Some("play-voice") => Command::PlayVoice(parse_index(rest.get(1), "voice index")?),
        Some("demo") => Command::Demo,
        Some(other) => bail!("unknown command: {}\n\n{}", other, USAGE),
        None => bail!("{}", USAGE),
    };
    Ok((config_path, command))
}

fn load_banks(config: &Config, base: &Path) -> AppResult<ClipBanks> {
    let load = |category: SoundCategory| -> AppResult<ClipBank> {
        ClipBank::load(&config.clip_paths(category, base))
            .with_context(|| format!("loading {} clips", category))
    };
    Ok(ClipBanks {
        bgm: load(SoundCategory::Bgm)?,
        se: load(SoundCategory::Se)?,
        voice: load(SoundCategory::Voice)?,
    })
}

/// Block until nothing is playing or fading, or `limit` passes
fn wait_idle(manager: &sound_lines::SharedSoundManager, limit: Duration) {
    let step = Duration::from_millis(100);
    let mut waited = Duration::ZERO;
    while waited < limit {
        {
            let manager = manager.lock();
            let busy = manager.is_fading()
                || SoundCategory::ALL
                    .iter()
                    .any(|c| manager.active_count(*c) > 0);
            if !busy {
                return;
            }
        }
        thread::sleep(step);
        waited += step;
    }
}

fn run(config: &Config, base: &Path, command: Command) -> AppResult<()> {
    let banks = load_banks(config, base)?;

    // The rodio stream must stay alive (and on this thread) while anything plays
    let rodio = match RodioBackend::new() {
        Ok(backend) => Some(backend),
        Err(e) => {
            tracing::warn!("Failed to initialize audio: {}. Using null backend.", e);
            None
        }
    };
    let null = NullBackend::new();
    let backend: &dyn ChannelBackend = match &rodio {
        Some(backend) => backend,
        None => &null,
    };

    let manager = SoundManager::new(config, backend, banks)
        .context("creating sound manager")?
        .into_shared();
    let driver = FadeDriver::spawn(manager.clone(), config.tick_interval())?;

    match command {
        Command::PlayBgm { index, fade } => {
            let fade = fade.unwrap_or_else(|| config.bgm_fade_in());
            let outcome = manager.lock().play_bgm(index, fade);
            println!("BGM {}: {}", index, outcome);
            if outcome.is_started() {
                // Loops never finish on their own
                thread::sleep(fade + Duration::from_secs(10));
                manager.lock().stop_bgm(config.bgm_fade_out());
                wait_idle(&manager, config.bgm_fade_out() + Duration::from_secs(1));
            }
        }
        Command::PlaySe(index) => {
            println!("SE {}: {}", index, manager.lock().play_se(index));
            wait_idle(&manager, Duration::from_secs(30));
        }
        Command::PlayVoice(index) => {
            println!("Voice {}: {}", index, manager.lock().play_voice(index));
            wait_idle(&manager, Duration::from_secs(60));
        }
        Command::Demo => run_demo(config, &manager),
    }

    driver.shutdown();
    Ok(())
}

fn run_demo(config: &Config, manager: &sound_lines::SharedSoundManager) {
    let fade = config.bgm_fade_in().max(Duration::from_secs(1));
    let bgm_count = manager.lock().clip_count(SoundCategory::Bgm);

    for index in 0..bgm_count {
        println!("BGM {}: {}", index, manager.lock().play_bgm(index, fade));
        thread::sleep(Duration::from_secs(4));
    }

    let se_count = manager.lock().clip_count(SoundCategory::Se);
    for index in 0..se_count {
        println!("SE {}: {}", index, manager.lock().play_se(index));
        thread::sleep(Duration::from_millis(300));
    }

    let voice_count = manager.lock().clip_count(SoundCategory::Voice);
    if voice_count > 0 {
        manager.lock().volume_bgm(0.4);
        for index in 0..voice_count {
            println!("Voice {}: {}", index, manager.lock().play_voice(index));
            thread::sleep(Duration::from_secs(2));
        }
        manager.lock().volume_bgm(config.bgm.volume);
    }

    manager.lock().stop_bgm(fade);
    wait_idle(manager, fade + Duration::from_secs(5));
}

fn main() {
    initialize_tracing();
    tracing::info!(target: LOG_TARGET_STARTUP, "Starting sound-lines v{}", env!("CARGO_PKG_VERSION"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, command) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let result = config_path
        .map(Ok)
        .unwrap_or_else(Config::default_path)
        .map_err(anyhow::Error::from)
        .and_then(|path| {
            let config = Config::load_or_default(&path)?;
            let base = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((config, base))
        })
        .and_then(|(config, base)| run(&config, &base, command));

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}
