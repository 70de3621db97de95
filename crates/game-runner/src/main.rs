use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use game_runner::input::{self, Command};
use game_runner::report::{JsonLines, LogSink};
use game_runner::{Config, ScoreSink, Session};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play 2405 in the terminal")]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,
    /// Seed for a reproducible game (random when omitted)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Override the winning tile from the config
    #[arg(long, value_name = "TILE")]
    winning_tile: Option<u64>,
    /// Append final scores as JSON lines to this file instead of only logging them
    #[arg(long, value_name = "FILE")]
    scores: Option<PathBuf>,
}

fn render<R: Rng, S: ScoreSink>(session: &Session<R, S>, out: &mut impl Write) -> io::Result<()> {
    let state = session.state();
    writeln!(out)?;
    writeln!(
        out,
        "Score: {}   Moves: {}   Goal: {}   Points: {}   High score: {}",
        state.score,
        session.moves(),
        session.rules().winning_tile,
        session.points().total,
        session.high_score()
    )?;
    write!(out, "{}", state.grid)?;
    if state.won {
        writeln!(out, "You reached {}!", session.rules().winning_tile)?;
    }
    if state.game_over {
        writeln!(out, "Game over! Final score: {}  (n: new game, q: quit)", state.score)?;
    }
    write!(out, "> ")?;
    out.flush()
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path)?
        }
        None => Config::default(),
    };
    if let Some(tile) = args.winning_tile {
        config.rules.winning_tile = tile;
    }
    config.validate()?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sink: Box<dyn ScoreSink> = match &args.scores {
        Some(path) => Box::new(JsonLines::append_to(path)?),
        None => Box::new(LogSink),
    };

    let mut session = Session::new(config.rules, rng, sink);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", input::HELP)?;
    render(&session, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        match input::parse_command(&line) {
            Some(Command::Move(dir)) => {
                let outcome = session.play(dir);
                if !outcome.changed && !outcome.game_over {
                    writeln!(stdout, "Nothing moves {dir}.")?;
                }
            }
            Some(Command::NewGame) => session.new_game()?,
            Some(Command::Quit) => break,
            Some(Command::Help) => writeln!(stdout, "{}", input::HELP)?,
            None => writeln!(stdout, "Unknown input {line:?}; ? for help")?,
        }
        render(&session, &mut stdout)?;
    }

    session.finish()?;
    writeln!(stdout)?;
    Ok(())
}
