//! Replay binary for the arena decision core.
//!
//! Drives the decision core over a recorded match, one JSON frame per line,
//! and prints a JSON report with the final combat totals to stdout. Logs go
//! to stderr.
//!
//! ```text
//! arena-replay <frames.jsonl> [config.yaml]
//! ```
//!
//! # Startup Sequence
//!
//! 1. Load configuration (defaults when the file is missing)
//! 2. Initialize structured logging (tracing)
//! 3. Read the recording
//! 4. Run every frame through `run_tick`
//! 5. Print the report

mod error;
mod replay;

use std::path::{Path, PathBuf};

use arena_core::{BotConfig, LoggingConfig, MatchContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ReplayError;

const DEFAULT_CONFIG_PATH: &str = "arena-config.yaml";

/// Application entry point for the replay binary.
///
/// # Errors
///
/// Returns an error if the configuration or the recording cannot be loaded.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let frames_path = args.next().map(PathBuf::from).ok_or_else(|| ReplayError::Usage {
        message: "missing frames file".to_owned(),
    })?;
    let config_path = args
        .next()
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    // 1. Load configuration.
    let (config, from_file) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        config = %config_path.display(),
        from_file,
        gatherer_quota = config.roles.quotas.gatherer,
        combat_min_resource = config.production.combat_min_resource,
        "arena-replay starting"
    );

    // 3. Read the recording.
    let frames = replay::read_frames(&frames_path)?;
    info!(path = %frames_path.display(), frames = frames.len(), "recording loaded");

    // 4. Run the match.
    let mut ctx = MatchContext::new(config);
    let report = replay::run_replay(&mut ctx, frames);
    info!(
        frames = report.frames,
        produced = report.produced.len(),
        refused = report.refused,
        damage_to_self = report.totals.damage_to_self,
        damage_to_opponent = report.totals.damage_to_opponent,
        self_deaths = report.totals.self_deaths,
        opponent_deaths = report.totals.opponent_deaths,
        "replay complete"
    );

    // 5. Print the report.
    let json =
        serde_json::to_string_pretty(&report).map_err(|source| ReplayError::Report { source })?;
    println!("{json}");

    Ok(())
}

/// Load configuration from `path`, or defaults if it does not exist.
///
/// Returns the config and whether it came from the file.
fn load_config(path: &Path) -> Result<(BotConfig, bool), ReplayError> {
    if path.exists() {
        Ok((BotConfig::from_file(path)?, true))
    } else {
        let mut config = BotConfig::default();
        config.logging.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
