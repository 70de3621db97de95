use std::path::Path;

use anyhow::{Context, Result};
use board_engine::engine::{Rules, Score, Tile};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::actor::{GameActor, GameResult};
use crate::config;
use crate::report::JsonLines;

/// Aggregate numbers over one self-play batch.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelfPlaySummary {
    pub games: usize,
    pub wins: usize,
    pub total_steps: u64,
    pub mean_score: f64,
    pub best_score: Score,
    pub best_tile: Tile,
}

impl SelfPlaySummary {
    pub fn from_results(results: &[GameResult]) -> Self {
        let games = results.len();
        let total_score: Score = results.iter().map(|r| r.score).sum();
        Self {
            games,
            wins: results.iter().filter(|r| r.won).count(),
            total_steps: results.iter().map(|r| r.steps).sum(),
            mean_score: if games == 0 { 0.0 } else { total_score as f64 / games as f64 },
            best_score: results.iter().map(|r| r.score).max().unwrap_or(0),
            best_tile: results.iter().map(|r| r.highest_tile).max().unwrap_or(0),
        }
    }
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} ({eta})",
    ) {
        pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
    }
    pb
}

/// Play every configured game, in parallel, and return results ordered by game id.
pub fn play_games(cfg: &config::SelfPlay, rules: &Rules) -> Result<Vec<GameResult>> {
    let pb = progress_bar(cfg.num_games as u64, cfg.progress);

    let process = || -> Vec<GameResult> {
        (0..cfg.num_games)
            .into_par_iter()
            .map(|game_id| {
                let seed = cfg.base_seed.wrapping_add(game_id as u64);
                let actor = GameActor::new(game_id, seed, cfg.strategy, *rules, cfg.max_steps);
                let result = actor.run();
                pb.inc(1);
                result
            })
            .collect()
    };

    let mut results = if let Some(n) = cfg.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .context("failed to build rayon thread pool")?
            .install(process)
    } else {
        process()
    };

    pb.finish_with_message("games played");
    results.sort_by_key(|r| r.game_id);
    Ok(results)
}

/// Run a full self-play batch: play, optionally write per-game rows, summarize.
pub fn run_selfplay(
    cfg: &config::SelfPlay,
    rules: &Rules,
    results_file: Option<&Path>,
) -> Result<SelfPlaySummary> {
    info!(
        "Playing {} games ({:?}, seeds {}..) to {}",
        cfg.num_games, cfg.strategy, cfg.base_seed, rules.winning_tile
    );
    let results = play_games(cfg, rules)?;

    if let Some(path) = results_file {
        let mut out = JsonLines::append_to(path)?;
        for row in &results {
            out.write_row(row)?;
        }
        info!("Wrote {} results to {}", results.len(), path.display());
    }

    Ok(SelfPlaySummary::from_results(&results))
}
