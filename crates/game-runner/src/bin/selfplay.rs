use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use game_runner::config::{Config, StrategyKind};
use game_runner::selfplay;
use log::info;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Play seeded 2405 games in parallel and summarize the results"
)]
struct Cli {
    /// Path to TOML config ([rules], [selfplay], [report])
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of games (overrides selfplay.num_games)
    #[arg(long, value_name = "N")]
    games: Option<u32>,

    /// First seed; game i uses seed + i (overrides selfplay.base_seed)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Move-selection strategy (overrides selfplay.strategy)
    #[arg(long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Number of worker threads (defaults to Rayon default)
    #[arg(long, value_name = "N")]
    workers: Option<usize>,

    /// JSON-lines output for per-game results (overrides report.results_file)
    #[arg(long, value_name = "FILE")]
    results: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut cfg = match &cli.config {
        Some(path) => Config::from_toml(path)?,
        None => Config::default(),
    };
    if let Some(n) = cli.games {
        cfg.selfplay.num_games = n;
    }
    if let Some(seed) = cli.seed {
        cfg.selfplay.base_seed = seed;
    }
    if let Some(strategy) = cli.strategy {
        cfg.selfplay.strategy = strategy;
    }
    if cli.workers.is_some() {
        cfg.selfplay.workers = cli.workers;
    }
    if cli.results.is_some() {
        cfg.report.results_file = cli.results;
    }
    if cli.quiet {
        cfg.selfplay.progress = false;
    }
    cfg.validate()?;

    let summary = selfplay::run_selfplay(
        &cfg.selfplay,
        &cfg.rules,
        cfg.report.results_file.as_deref(),
    )?;
    info!(
        "Completed self-play: {} games, {} won, {} moves, mean score {:.1}, best score {}, best tile {}",
        summary.games,
        summary.wins,
        summary.total_steps,
        summary.mean_score,
        summary.best_score,
        summary.best_tile
    );
    Ok(())
}
