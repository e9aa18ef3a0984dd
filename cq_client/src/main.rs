//! A terminal world-countries quiz.
//!
//! Name as many countries as you can before the clock runs out; each one
//! lights up on the map and in its continent's list.

use anyhow::{Context, Result, bail};
use country_quiz::{
    Catalog, ConfigOverrides, QuizConfig, QuizController,
    scores::{FileStore, KeyValueStore, MemoryStore},
};
use cq_client::{
    countdown::{TICK_PERIOD, TokioCountdown},
    logging,
    tui_app::TuiApp,
};
use pico_args::Arguments;
use std::{path::PathBuf, sync::Arc};

const HELP: &str = "\
Play the country quiz in the terminal

USAGE:
  cq_client [OPTIONS]

OPTIONS:
  --total-secs N         Session length in seconds  [default: env CQ_TOTAL_SECS or 900]
  --data-dir   PATH      Score history directory    [default: env CQ_DATA_DIR or .country_quiz]
  --catalog    PATH      Country catalog JSON       [default: env CQ_CATALOG or built-in]
  --max-scores N         Leaderboard size           [default: env CQ_MAX_SCORES or 10]
  --log-file   PATH      Log file                   [default: country_quiz.log]

FLAGS:
  --no-save              Keep scores in memory only
  -h, --help             Print help information

ENVIRONMENT:
  RUST_LOG               Log filter (e.g., debug)
  (A .env file in the working directory is read if present)
";

const DEFAULT_LOG_FILE: &str = "country_quiz.log";

struct Args {
    overrides: ConfigOverrides,
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        overrides: ConfigOverrides {
            total_secs: pargs.opt_value_from_str("--total-secs")?,
            data_dir: pargs.opt_value_from_str("--data-dir")?,
            catalog_path: pargs.opt_value_from_str("--catalog")?,
            max_scores: pargs.opt_value_from_str("--max-scores")?,
            no_save: pargs.contains("--no-save"),
        },
        log_file: pargs
            .opt_value_from_str("--log-file")?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {remaining:?}");
    }

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    logging::init(&args.log_file)?;

    let config = QuizConfig::from_env(args.overrides)?;
    config.validate()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::builtin().context("Failed to load built-in catalog")?,
    };
    tracing::info!(
        countries = catalog.len(),
        total_secs = config.total_secs,
        persist_scores = config.persist_scores,
        "Starting quiz"
    );

    let store: Box<dyn KeyValueStore> = if config.persist_scores {
        Box::new(FileStore::new(&config.data_dir))
    } else {
        Box::new(MemoryStore::new())
    };

    let (countdown, ticks) = TokioCountdown::new(TICK_PERIOD);
    let quiz = QuizController::new(Arc::new(catalog), &config, countdown, store);

    let terminal = ratatui::init();
    let result = TuiApp::new(quiz, ticks).run(terminal).await;
    ratatui::restore();

    tracing::info!("Quiz closed");
    result
}
