use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use board_engine::engine::Rules;

/// How a self-play actor picks its next move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum)]
pub enum StrategyKind {
    /// Uniform over the legal moves.
    Random,
    /// Legal move that leaves the most empty cells.
    #[default]
    Greedy,
    /// Fixed priority Left, Down, Right, Up; first legal wins.
    Corner,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub rules: Rules,

    #[serde(default)]
    pub selfplay: SelfPlay,

    #[serde(default)]
    pub report: Report,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct SelfPlay {
    #[serde(default = "defaults::num_games")]
    pub num_games: u32,
    /// Game `i` is seeded with `base_seed + i`.
    #[serde(default)]
    pub base_seed: u64,
    /// Safety cap on moves per game.
    #[serde(default = "defaults::max_steps")]
    pub max_steps: u64,
    /// Worker threads; `None` uses the Rayon default.
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default = "defaults::progress")]
    pub progress: bool,
}

impl Default for SelfPlay {
    fn default() -> Self {
        Self {
            num_games: defaults::num_games(),
            base_seed: 0,
            max_steps: defaults::max_steps(),
            workers: None,
            strategy: StrategyKind::default(),
            progress: defaults::progress(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, Default)]
pub struct Report {
    /// JSON-lines file receiving one row per finished game.
    #[serde(default)]
    pub results_file: Option<PathBuf>,
}

impl Config {
    /// Parse a config file. Values are checked by [`Config::validate`], which
    /// callers run once any command-line overrides are applied.
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("failed to open config {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg = Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rules.winning_tile < 2 {
            bail!(
                "rules.winning_tile must be at least 2 (got {})",
                self.rules.winning_tile
            );
        }
        if self.selfplay.num_games == 0 {
            bail!("selfplay.num_games must be > 0");
        }
        if self.selfplay.max_steps == 0 {
            bail!("selfplay.max_steps must be > 0");
        }
        if self.selfplay.workers == Some(0) {
            bail!("selfplay.workers must be > 0 when specified");
        }
        Ok(())
    }
}

mod defaults {
    pub fn num_games() -> u32 { 256 }
    pub fn max_steps() -> u64 { 100_000 }
    pub fn progress() -> bool { true }
}
