use anyhow::Result;
use board_engine::engine::{Direction, GameState, MoveOutcome, Rules, Score};
use log::{debug, info};
use rand::Rng;

use crate::report::{points_for, Points, ScoreReport, ScoreSink};

/// One player's game: owns the state, the RNG and where final scores go.
///
/// Moves take `&mut self`, so a session can only ever process one move at a
/// time. Independent sessions share nothing and may run on separate threads.
pub struct Session<R: Rng, S: ScoreSink> {
    rules: Rules,
    rng: R,
    sink: S,
    state: GameState,
    moves: u64,
    games: u64,
    points: Points,
}

impl<R: Rng, S: ScoreSink> Session<R, S> {
    /// Start a session with a freshly initialized game.
    pub fn new(rules: Rules, mut rng: R, sink: S) -> Self {
        let state = GameState::new(&mut rng);
        Self {
            rules,
            rng,
            sink,
            state,
            moves: 0,
            games: 1,
            points: Points::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Accepted (board-changing) moves in the current game.
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Games started in this session, including the current one.
    pub fn games(&self) -> u64 {
        self.games
    }

    /// Points credited so far and the best score among credited games.
    pub fn points(&self) -> Points {
        self.points
    }

    pub fn high_score(&self) -> Score {
        self.points.high_score
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply one move. Ignored once the game is over.
    pub fn play(&mut self, direction: Direction) -> MoveOutcome {
        let was_won = self.state.won;
        let (next, outcome) = self.state.step(direction, &self.rules, &mut self.rng);
        self.state = next;
        if !outcome.changed {
            debug!("move {direction} changed nothing");
            return outcome;
        }
        self.moves += 1;
        debug!(
            "move {} -> score {} (+{})",
            direction, self.state.score, outcome.score_delta
        );
        if outcome.won && !was_won {
            info!(
                "Reached {} after {} moves",
                self.rules.winning_tile, self.moves
            );
        }
        if outcome.game_over {
            info!("No moves left; final score {}", self.state.score);
        }
        outcome
    }

    /// Report the current game (if any move was made) and start a new one.
    pub fn new_game(&mut self) -> Result<()> {
        self.report_current()?;
        self.state = GameState::new(&mut self.rng);
        self.moves = 0;
        self.games += 1;
        debug!("started game {}", self.games);
        Ok(())
    }

    /// Report the current game (if any move was made) and hand back the sink.
    pub fn finish(mut self) -> Result<S> {
        self.report_current()?;
        Ok(self.sink)
    }

    fn report_current(&mut self) -> Result<()> {
        if self.moves == 0 {
            return Ok(());
        }
        let report = ScoreReport {
            final_score: self.state.score,
            points_earned: points_for(self.state.score),
            highest_tile: self.state.grid.highest_tile(),
            moves: self.moves,
            won: self.state.won,
        };
        self.sink.report_score(&report)?;
        if self.points.credit(&report) > 0 {
            info!(
                "Credited {} points ({} total, high score {})",
                report.points_earned, self.points.total, self.points.high_score
            );
        }
        Ok(())
    }
}
