use board_engine::engine::{GameState, Rules, Score, Tile};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::StrategyKind;

pub mod strategies;

/// Per-game actor that drives a single board to completion with a
/// fixed move-selection strategy. Fully determined by its seed.
pub struct GameActor {
    pub game_id: u32,
    pub seed: u64,
    pub strategy: StrategyKind,
    pub rules: Rules,
    pub max_steps: u64,
    state: GameState,
    rng: StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: u32,
    pub seed: u64,
    pub steps: u64,
    pub score: Score,
    pub highest_tile: Tile,
    pub won: bool,
}

impl GameActor {
    pub fn new(
        game_id: u32,
        seed: u64,
        strategy: StrategyKind,
        rules: Rules,
        max_steps: u64,
    ) -> Self {
        // Initialize a fresh board with two random tiles
        let mut rng = StdRng::seed_from_u64(seed);
        let state = GameState::new(&mut rng);
        Self {
            game_id,
            seed,
            strategy,
            rules,
            max_steps,
            state,
            rng,
        }
    }

    /// Run the actor loop to completion and return the result.
    pub fn run(mut self) -> GameResult {
        let mut steps: u64 = 0;

        while !self.state.game_over && steps < self.max_steps {
            let legal = self.state.grid.legal_moves();
            let grid = self.state.grid;
            let Some(dir) = strategies::select_move(self.strategy, grid, &legal, &mut self.rng) else {
                break;
            };
            let (next, outcome) = self.state.step(dir, &self.rules, &mut self.rng);
            self.state = next;
            if outcome.changed {
                steps += 1;
            } else {
                // Strategies only pick legal moves; a no-op means nothing is left.
                break;
            }
        }

        debug!(
            "game {} (seed {}) ended after {} steps with score {}",
            self.game_id, self.seed, steps, self.state.score
        );
        GameResult {
            game_id: self.game_id,
            seed: self.seed,
            steps,
            score: self.state.score,
            highest_tile: self.state.grid.highest_tile(),
            won: self.state.won,
        }
    }
}
