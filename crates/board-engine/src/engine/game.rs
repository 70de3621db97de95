use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ops;
use super::state::{Direction, Grid, Score, Tile};

/// Tile value that wins the 2405 variant.
pub const DEFAULT_WINNING_TILE: Tile = 2405;

/// Game rules supplied by the caller rather than baked into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// A move wins once any tile reaches or exceeds this value.
    #[serde(default = "default_winning_tile")]
    pub winning_tile: Tile,
}

fn default_winning_tile() -> Tile {
    DEFAULT_WINNING_TILE
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            winning_tile: DEFAULT_WINNING_TILE,
        }
    }
}

/// Result of applying one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub grid: Grid,
    /// Growth of the running score. The first accepted move of a fresh game
    /// counts the whole board; later ones add the spawned tile.
    pub score_delta: Score,
    pub changed: bool,
    pub won: bool,
    pub game_over: bool,
}

/// Everything a caller needs to thread between moves of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub grid: Grid,
    pub score: Score,
    pub won: bool,
    pub game_over: bool,
}

impl GameState {
    /// A fresh game with two spawned tiles. The score stays 0 until the
    /// first accepted move.
    ///
    /// ```
    /// use board_engine::engine::GameState;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let s = GameState::new(&mut rng);
    /// assert_eq!(s.score, 0);
    /// assert_eq!(s.grid.count_empty(), 14);
    /// assert!(!s.won && !s.game_over);
    /// ```
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let grid = ops::initialize(rng);
        Self {
            grid,
            score: 0,
            won: false,
            game_over: false,
        }
    }

    /// Adopt an existing grid, deriving score and flags from it.
    pub fn from_grid(grid: Grid, rules: &Rules) -> Self {
        Self {
            grid,
            score: grid.score(),
            won: grid.highest_tile() >= rules.winning_tile,
            game_over: grid.is_terminal(),
        }
    }

    /// Compute the outcome of `direction` without consuming the state.
    #[inline]
    pub fn apply_move<R: Rng + ?Sized>(
        &self,
        direction: Direction,
        rules: &Rules,
        rng: &mut R,
    ) -> MoveOutcome {
        ops::apply_move(self, direction, rules, rng)
    }

    /// Fold an outcome into the state. `won` stays set once reached.
    pub fn advance(self, outcome: &MoveOutcome) -> Self {
        Self {
            grid: outcome.grid,
            score: self.score + outcome.score_delta,
            won: self.won || outcome.won,
            game_over: outcome.game_over,
        }
    }

    /// Apply a move and fold it in, returning both the new state and the outcome.
    ///
    /// ```
    /// use board_engine::engine::{Direction, GameState, Rules};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let s0 = GameState::new(&mut rng);
    /// let (s1, out) = s0.step(Direction::Up, &Rules::default(), &mut rng);
    /// assert_eq!(s1.grid, out.grid);
    /// ```
    pub fn step<R: Rng + ?Sized>(
        self,
        direction: Direction,
        rules: &Rules,
        rng: &mut R,
    ) -> (Self, MoveOutcome) {
        let outcome = self.apply_move(direction, rules, rng);
        (self.advance(&outcome), outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn score_tracks_board_sum() {
        let rules = Rules::default();
        let mut rng = StepRng::new(0, 0);
        let mut state = GameState::from_grid(
            Grid::from_rows([[2, 2, 4, 0], [0, 0, 0, 4], [0; 4], [0; 4]]),
            &rules,
        );
        for dir in [Direction::Left, Direction::Up, Direction::Right, Direction::Down] {
            let (next, _) = state.step(dir, &rules, &mut rng);
            state = next;
            assert_eq!(state.score, state.grid.score());
        }
    }

    #[test]
    fn first_move_counts_whole_board() {
        let rules = Rules::default();
        let mut rng = StepRng::new(0, 0);
        let fresh = GameState::new(&mut rng);
        assert_eq!(fresh.grid.rows()[0], [2, 2, 0, 0]);
        assert_eq!(fresh.score, 0);

        let (state, out) = fresh.step(Direction::Left, &rules, &mut rng);
        assert!(out.changed);
        assert_eq!(state.grid.rows()[0], [4, 2, 0, 0]);
        assert_eq!(out.score_delta, 6);
        assert_eq!(state.score, 6);

        let (state, out) = state.step(Direction::Right, &rules, &mut rng);
        assert!(out.changed);
        assert_eq!(out.score_delta, 2);
        assert_eq!(state.score, state.grid.score());
    }

    #[test]
    fn won_is_sticky_on_state() {
        let rules = Rules { winning_tile: 8 };
        let mut rng = StepRng::new(0, 0);
        let state = GameState::from_grid(Grid::from_rows([[4, 4, 0, 0], [0; 4], [0; 4], [0; 4]]), &rules);
        let (state, out) = state.step(Direction::Left, &rules, &mut rng);
        assert!(out.won);
        assert!(state.won);
        let (state, out) = state.step(Direction::Down, &rules, &mut rng);
        assert!(out.changed);
        assert!(state.won);
    }

    #[test]
    fn finished_game_ignores_moves() {
        let grid = Grid::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        let state = GameState::from_grid(grid, &Rules::default());
        assert!(state.game_over);
        let out = state.apply_move(Direction::Up, &Rules::default(), &mut StepRng::new(0, 0));
        assert!(!out.changed);
        assert!(out.game_over);
        assert_eq!(state.advance(&out), state);
    }

    #[test]
    fn rules_default_when_field_missing() {
        let rules: Rules = serde_json::from_str("{}").unwrap();
        assert_eq!(rules.winning_tile, 2405);
    }

    #[test]
    fn outcome_serializes_grid_as_nested_rows() {
        let out = MoveOutcome {
            grid: Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]),
            score_delta: 2,
            changed: true,
            won: false,
            game_over: false,
        };
        let json = serde_json::to_value(out).unwrap();
        assert_eq!(json["grid"][0][0], 2);
        assert_eq!(json["grid"].as_array().unwrap().len(), 4);
    }
}
