mod console_log;
mod host;
mod input;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use common::config::{ArenaConfig, ConfigManager, get_config_path};
use common::high_scores::{FileHighScoreStore, ScoreKeeper};
use common::log;
use common::logger::{self, LoggerSettings};
use common::sim::{DifficultyPreset, MatchController, MatchMode, MatchSettings, SessionRng};
use host::{Host, HostOptions};

#[derive(Parser)]
#[command(name = "snake_arena_headless")]
struct Args {
    /// Config file; defaults to one next to the executable.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    multiplayer: bool,

    /// Overrides the configured difficulty.
    #[arg(long)]
    difficulty: Option<DifficultyPreset>,

    #[arg(long)]
    seed: Option<u64>,

    /// Host frame period in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Stop after this many seconds of play.
    #[arg(long)]
    max_seconds: Option<f64>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(get_config_path);
    let manager: ConfigManager<_, ArenaConfig> = ConfigManager::from_yaml_file(&config_path);
    let mut config = manager.get_config()?;

    let prefix = if args.use_log_prefix {
        Some("Headless".to_string())
    } else {
        config.logging.prefix.clone()
    };
    logger::init_logger(LoggerSettings {
        prefix,
        enabled: config.logging.enabled,
    });
    log!("Loaded config from {}", config_path.display());

    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let rng = match config.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let controller = MatchController::new(MatchSettings::from(&config), rng);
    let store = FileHighScoreStore::new(&config.high_scores.location, config.high_scores.retain);

    let options = HostOptions {
        frame: Duration::from_millis(args.tick_ms.max(1)),
        mode: MatchMode::from_multiplayer(args.multiplayer),
        max_seconds: args.max_seconds,
    };
    Host::new(controller, ScoreKeeper::new(store), options).run().await?;

    log!("Headless host shut down");
    Ok(())
}
