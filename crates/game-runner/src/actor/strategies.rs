use crate::config::StrategyKind;
use board_engine::engine::{Direction, Grid};
use rand::seq::SliceRandom;
use rand::Rng;

const CORNER_PRIORITY: [Direction; 4] = [
    Direction::Left,
    Direction::Down,
    Direction::Right,
    Direction::Up,
];

fn select_move_random<R: Rng + ?Sized>(legal: &[bool; 4], rng: &mut R) -> Option<Direction> {
    let candidates: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| legal[d.index()])
        .collect();
    candidates.choose(rng).copied()
}

fn select_move_greedy(grid: Grid, legal: &[bool; 4]) -> Option<Direction> {
    let mut best: Option<(Direction, usize)> = None;
    for dir in Direction::ALL {
        if !legal[dir.index()] { continue; }
        let empty = grid.shift(dir).count_empty();
        // strict > keeps the earliest direction on ties
        if best.map_or(true, |(_, b)| empty > b) { best = Some((dir, empty)); }
    }
    best.map(|(d, _)| d)
}

fn select_move_corner(legal: &[bool; 4]) -> Option<Direction> {
    CORNER_PRIORITY.into_iter().find(|d| legal[d.index()])
}

/// Pick a move among `legal` (indexed like `Direction::ALL`). `None` when no move is legal.
pub(crate) fn select_move<R: Rng + ?Sized>(
    strategy: StrategyKind,
    grid: Grid,
    legal: &[bool; 4],
    rng: &mut R,
) -> Option<Direction> {
    match strategy {
        StrategyKind::Random => select_move_random(legal, rng),
        StrategyKind::Greedy => select_move_greedy(grid, legal),
        StrategyKind::Corner => select_move_corner(legal),
    }
}
