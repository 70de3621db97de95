use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::ops;
use serde::{Deserialize, Serialize};

/// A single cell value. 0 is empty; otherwise a power of two >= 2.
pub type Tile = u64;
/// Sum of all tile values on a grid.
pub type Score = u64;

/// Side length of the square grid.
pub const GRID_SIZE: usize = 4;
/// Number of cells on the grid.
pub const NUM_CELLS: usize = GRID_SIZE * GRID_SIZE;

pub(crate) type Line = [Tile; GRID_SIZE];
pub(crate) type Cells = [Line; GRID_SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order used by [`Grid::legal_moves`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Clockwise quarter turns applied before and after the leftward merge.
    ///
    /// Every direction reduces to "merge left" on a rotated grid; the two
    /// counts always sum to a full turn so orientation is restored.
    #[inline]
    pub(crate) fn quarter_turns(self) -> (u8, u8) {
        match self {
            Direction::Left => (0, 0),
            Direction::Right => (2, 2),
            Direction::Up => (3, 1),
            Direction::Down => (1, 3),
        }
    }

    /// Position of this direction within [`Direction::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Returned when text does not name one of the four directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError(String);

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction '{}'", self.0)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Accepts the direction names in any case, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// A 4x4 board of tile values, row-major, `0` meaning empty.
///
/// `Grid` is a plain `Copy` value: every operation returns a new grid and
/// never mutates shared state.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid(pub(crate) Cells);

impl Grid {
    /// A constant empty grid (all zeros).
    pub const EMPTY: Grid = Grid([[0; GRID_SIZE]; GRID_SIZE]);

    /// Construct a grid from its rows.
    #[inline]
    pub fn from_rows(rows: [[Tile; GRID_SIZE]; GRID_SIZE]) -> Self {
        Grid(rows)
    }

    /// Construct a grid from 16 row-major cell values.
    ///
    /// Panics if `cells` does not hold exactly 16 values.
    ///
    /// ```
    /// use board_engine::engine::Grid;
    /// let g = Grid::from_cells(&[2, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// assert_eq!(g.tile(1, 1), 4);
    /// ```
    pub fn from_cells(cells: &[Tile]) -> Self {
        assert_eq!(
            cells.len(),
            NUM_CELLS,
            "a grid needs exactly {NUM_CELLS} cells"
        );
        let mut rows = [[0; GRID_SIZE]; GRID_SIZE];
        for (dst, src) in rows.iter_mut().zip(cells.chunks_exact(GRID_SIZE)) {
            dst.copy_from_slice(src);
        }
        Grid(rows)
    }

    /// Borrow the rows of this grid.
    #[inline]
    pub fn rows(&self) -> &[[Tile; GRID_SIZE]; GRID_SIZE] {
        &self.0
    }

    /// Consume this grid, returning its rows.
    #[inline]
    pub fn into_rows(self) -> [[Tile; GRID_SIZE]; GRID_SIZE] {
        self.0
    }

    /// Value at `(row, col)`; panics when out of range.
    #[inline]
    pub fn tile(self, row: usize, col: usize) -> Tile {
        self.0[row][col]
    }

    /// A fresh game grid: empty, then two random tiles.
    ///
    /// ```
    /// use board_engine::engine::Grid;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let g = Grid::new_game(&mut rng);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    #[inline]
    pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Self {
        ops::initialize(rng)
    }

    /// Return the grid resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use board_engine::engine::{Direction, Grid};
    /// let g = Grid::from_rows([[2, 0, 2, 0], [0; 4], [0; 4], [0; 4]]);
    /// assert_eq!(g.shift(Direction::Left).rows()[0], [4, 0, 0, 0]);
    /// ```
    #[inline]
    pub fn shift(self, dir: Direction) -> Self {
        ops::shift(self, dir)
    }

    /// Rotate the grid a quarter turn clockwise.
    #[inline]
    pub fn rotate_clockwise(self) -> Self {
        ops::rotate_clockwise(self)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty cell, using the provided RNG.
    /// A full grid is returned unchanged.
    ///
    /// ```
    /// use board_engine::engine::Grid;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let g = Grid::EMPTY.with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        ops::spawn_tile(self, rng)
    }

    /// Total score: the sum of every tile on the grid.
    #[inline]
    pub fn score(self) -> Score {
        ops::get_score(self)
    }

    /// True when the grid is full and no two neighbours are equal.
    ///
    /// ```
    /// use board_engine::engine::Grid;
    /// // An empty grid always has room for a tile.
    /// assert!(!Grid::EMPTY.is_terminal());
    /// ```
    #[inline]
    pub fn is_terminal(self) -> bool {
        ops::is_terminal(self)
    }

    /// Return the highest tile value present (0 for an empty grid).
    #[inline]
    pub fn highest_tile(self) -> Tile {
        ops::get_highest_tile_val(self)
    }

    /// Count the number of empty cells.
    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Which directions would change the grid, indexed like [`Direction::ALL`].
    #[inline]
    pub fn legal_moves(self) -> [bool; 4] {
        ops::legal_moves(self)
    }

    /// Iterate over tile values in row-major order.
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter {
            cells: self.0,
            idx: 0,
        }
    }

    /// Convenience: collect tile values into a `Vec<Tile>`.
    #[inline]
    pub fn to_vec(self) -> Vec<Tile> {
        self.tiles().collect()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({:?})", self.0)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = ops::cell_width(*self);
        let rule = "-".repeat((width + 1) * GRID_SIZE - 1);
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f, "{rule}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| ops::format_val(v, width)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl From<[[Tile; GRID_SIZE]; GRID_SIZE]> for Grid {
    fn from(rows: [[Tile; GRID_SIZE]; GRID_SIZE]) -> Self {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for [[Tile; GRID_SIZE]; GRID_SIZE] {
    fn from(g: Grid) -> Self {
        g.into_rows()
    }
}

/// Iterator over grid tiles in row-major order.
pub struct TilesIter {
    cells: Cells,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = Tile;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= NUM_CELLS {
            return None;
        }
        let v = self.cells[self.idx / GRID_SIZE][self.idx % GRID_SIZE];
        self.idx += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = NUM_CELLS - self.idx;
        (left, Some(left))
    }
}

impl ExactSizeIterator for TilesIter {}

impl IntoIterator for Grid {
    type Item = Tile;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

impl IntoIterator for &Grid {
    type Item = Tile;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}
