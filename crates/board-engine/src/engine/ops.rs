use rand::Rng;

use super::game::{GameState, MoveOutcome, Rules};
use super::state::{Direction, Grid, Line, Score, Tile, GRID_SIZE};

/// Empty grid plus two random tiles.
pub fn initialize<R: Rng + ?Sized>(rng: &mut R) -> Grid {
    spawn_tile(spawn_tile(Grid::EMPTY, rng), rng)
}

/// Slide/merge tiles in the given direction. No randomness.
///
/// Each direction rotates the grid, merges every row leftward and rotates
/// back, so merge tie-breaking is identical in all four directions.
pub fn shift(grid: Grid, direction: Direction) -> Grid {
    let (before, after) = direction.quarter_turns();
    let turned = rotate_times(grid, before);
    rotate_times(merge_rows_left(turned), after)
}

/// Quarter turn clockwise: `rotated[j][N-1-i] = original[i][j]`.
pub fn rotate_clockwise(grid: Grid) -> Grid {
    let mut rotated = [[0; GRID_SIZE]; GRID_SIZE];
    for (i, row) in grid.0.iter().enumerate() {
        for (j, &val) in row.iter().enumerate() {
            rotated[j][GRID_SIZE - 1 - i] = val;
        }
    }
    Grid(rotated)
}

fn rotate_times(grid: Grid, turns: u8) -> Grid {
    (0..turns).fold(grid, |g, _| rotate_clockwise(g))
}

fn merge_rows_left(grid: Grid) -> Grid {
    Grid(grid.0.map(compact_and_merge_line))
}

/// Compact one line towards index 0, merging each equal adjacent pair once.
///
/// The leftmost pair wins: `[2, 2, 2, 0]` becomes `[4, 2, 0, 0]`.
///
/// Panics if a merge would exceed the `Tile` range.
pub fn compact_and_merge_line(line: Line) -> Line {
    let mut out = [0; GRID_SIZE];
    let mut pending: Option<Tile> = None;
    let mut write = 0;
    for val in line.into_iter().filter(|&v| v != 0) {
        match pending {
            Some(prev) if prev == val => {
                out[write] = prev.checked_mul(2).expect("tile value overflow");
                write += 1;
                pending = None;
            }
            Some(prev) => {
                out[write] = prev;
                write += 1;
                pending = Some(val);
            }
            None => pending = Some(val),
        }
    }
    if let Some(last) = pending {
        out[write] = last;
    }
    out
}

/// Place a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
///
/// Empty cells are enumerated row-major. A full grid is returned unchanged.
pub fn spawn_tile<R: Rng + ?Sized>(grid: Grid, rng: &mut R) -> Grid {
    let empty = count_empty(grid);
    if empty == 0 {
        return grid;
    }
    let index = rng.gen_range(0..empty);
    let tile = generate_random_tile(rng);
    let mut cells = grid.0;
    let slot = cells
        .iter_mut()
        .flatten()
        .filter(|v| **v == 0)
        .nth(index);
    if let Some(slot) = slot {
        *slot = tile;
    }
    Grid(cells)
}

pub(crate) fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

/// Full and without any equal horizontal or vertical neighbours.
pub fn is_terminal(grid: Grid) -> bool {
    if count_empty(grid) > 0 {
        return false;
    }
    let cells = &grid.0;
    for i in 0..GRID_SIZE {
        for j in 0..GRID_SIZE {
            let current = cells[i][j];
            if (i + 1 < GRID_SIZE && cells[i + 1][j] == current)
                || (j + 1 < GRID_SIZE && cells[i][j + 1] == current)
            {
                return false;
            }
        }
    }
    true
}

/// Which directions change the grid, in [`Direction::ALL`] order.
pub fn legal_moves(grid: Grid) -> [bool; 4] {
    Direction::ALL.map(|dir| shift(grid, dir) != grid)
}

/// Count the number of zero tiles.
pub fn count_empty(grid: Grid) -> usize {
    grid.tiles().filter(|&v| v == 0).count()
}

/// Sum of every cell.
pub fn get_score(grid: Grid) -> Score {
    grid.tiles().sum()
}

pub fn get_highest_tile_val(grid: Grid) -> Tile {
    grid.tiles().max().unwrap_or(0)
}

/// Apply one move to `state`.
///
/// A move that changes nothing (or any move on a finished game) is a no-op:
/// no tile spawns and the score, flags and grid are carried over untouched.
/// Otherwise the running score becomes the board sum.
pub fn apply_move<R: Rng + ?Sized>(
    state: &GameState,
    direction: Direction,
    rules: &Rules,
    rng: &mut R,
) -> MoveOutcome {
    let unchanged = MoveOutcome {
        grid: state.grid,
        score_delta: 0,
        changed: false,
        won: false,
        game_over: state.game_over,
    };
    if state.game_over {
        return unchanged;
    }
    let moved = shift(state.grid, direction);
    if moved == state.grid {
        return unchanged;
    }
    let grid = spawn_tile(moved, rng);
    MoveOutcome {
        grid,
        score_delta: get_score(grid).saturating_sub(state.score),
        changed: true,
        won: get_highest_tile_val(grid) >= rules.winning_tile,
        game_over: is_terminal(grid),
    }
}

pub(crate) fn cell_width(grid: Grid) -> usize {
    let digits = get_highest_tile_val(grid).to_string().len();
    (digits + 2).max(7)
}

pub(crate) fn format_val(val: Tile, width: usize) -> String {
    match val {
        0 => " ".repeat(width),
        x => format!("{x:^width$}"),
    }
}
