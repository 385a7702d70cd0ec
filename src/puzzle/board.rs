#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use itertools::Itertools;
use smallvec::SmallVec;
use std::fmt::{self, Display};
use std::str::FromStr;
use thiserror::Error;

/// Width and height of the board.
pub const SIDE: usize = 3;

/// Number of squares, blank included.
pub const CELLS: usize = SIDE * SIDE;

/// Errors produced while reading a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The input did not hold exactly nine tiles.
    #[error("expected {} tiles, found {0}", CELLS)]
    WrongTileCount(usize),
    /// A token was not a tile number between 0 and 8.
    #[error("invalid tile '{0}' (tiles are 0-8, 0 is the blank)")]
    InvalidTile(String),
    /// The same tile was given twice.
    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),
}

/// A direction the blank slides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// The blank swaps with the tile above it.
    Up,
    /// The blank swaps with the tile below it.
    Down,
    /// The blank swaps with the tile to its left.
    Left,
    /// The blank swaps with the tile to its right.
    Right,
}

impl Move {
    /// All moves in the order successors are generated.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

/// An 8-puzzle configuration, stored row-major with `0` as the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Puzzle {
    tiles: [u8; CELLS],
    blank: usize,
}

/// The conventional goal: tiles in order with the blank bottom-right.
pub const GOAL: Puzzle = Puzzle {
    tiles: [1, 2, 3, 4, 5, 6, 7, 8, 0],
    blank: 8,
};

impl Puzzle {
    /// Tiles in row-major order.
    #[must_use]
    pub const fn tiles(&self) -> &[u8; CELLS] {
        &self.tiles
    }

    /// `(row, col)` of the blank.
    #[must_use]
    pub const fn blank(&self) -> (usize, usize) {
        (self.blank / SIDE, self.blank % SIDE)
    }

    /// The tile at `row`, `col`; 0 is the blank.
    #[must_use]
    pub fn tile_at(&self, row: usize, col: usize) -> u8 {
        self.tiles[row * SIDE + col]
    }

    /// Slides the blank in `direction`, or `None` if it would leave the board.
    #[must_use]
    pub fn apply(&self, direction: Move) -> Option<Self> {
        let (row, col) = self.blank();
        let (dr, dc) = direction.delta();
        let row = row.checked_add_signed(dr).filter(|&r| r < SIDE)?;
        let col = col.checked_add_signed(dc).filter(|&c| c < SIDE)?;
        let target = row * SIDE + col;

        let mut tiles = self.tiles;
        tiles.swap(self.blank, target);
        Some(Self {
            tiles,
            blank: target,
        })
    }

    /// Every legal move and the configuration it leads to, in [`Move::ALL`] order.
    #[must_use]
    pub fn neighbors(&self) -> SmallVec<[(Move, Self); 4]> {
        Move::ALL
            .iter()
            .filter_map(|&mv| self.apply(mv).map(|next| (mv, next)))
            .collect()
    }

    /// Sum over all tiles (blank excluded) of their grid distance to their
    /// place in `goal`.
    #[must_use]
    pub fn manhattan_distance(&self, goal: &Self) -> u32 {
        let targets = goal.positions();
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &tile)| tile != 0)
            .map(|(idx, &tile)| {
                let target = targets[tile as usize];
                let dr = (idx / SIDE).abs_diff(target / SIDE);
                let dc = (idx % SIDE).abs_diff(target % SIDE);
                u32::try_from(dr + dc).unwrap_or(u32::MAX)
            })
            .sum()
    }

    /// Number of tiles (blank excluded) not on their square in `goal`.
    #[must_use]
    pub fn misplaced_tiles(&self, goal: &Self) -> u32 {
        let count = self
            .tiles
            .iter()
            .zip(goal.tiles.iter())
            .filter(|&(&a, &b)| a != 0 && a != b)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Pairs of tiles (blank excluded) that appear in the wrong relative order.
    #[must_use]
    pub fn inversions(&self) -> usize {
        let tiles: SmallVec<[u8; CELLS]> = self.tiles.iter().copied().filter(|&t| t != 0).collect();
        tiles
            .iter()
            .tuple_combinations()
            .filter(|&(a, b)| a > b)
            .count()
    }

    /// Whether `goal` can be reached at all.
    ///
    /// On an odd-width board every move preserves the parity of the inversion
    /// count, and configurations with equal parity are mutually reachable.
    #[must_use]
    pub fn is_solvable_towards(&self, goal: &Self) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }

    /// Index of every tile value.
    fn positions(&self) -> [usize; CELLS] {
        let mut positions = [0; CELLS];
        for (idx, &tile) in self.tiles.iter().enumerate() {
            positions[tile as usize] = idx;
        }
        positions
    }
}

impl TryFrom<[u8; CELLS]> for Puzzle {
    type Error = PuzzleError;

    fn try_from(tiles: [u8; CELLS]) -> Result<Self, Self::Error> {
        let mut seen = [false; CELLS];
        for &tile in &tiles {
            let slot = seen
                .get_mut(tile as usize)
                .ok_or_else(|| PuzzleError::InvalidTile(tile.to_string()))?;
            if *slot {
                return Err(PuzzleError::DuplicateTile(tile));
            }
            *slot = true;
        }
        // Nine distinct values below nine: the blank is present.
        let blank = tiles.iter().position(|&t| t == 0).unwrap_or_default();
        Ok(Self { tiles, blank })
    }
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    /// Reads nine tiles separated by whitespace and/or commas. Rows may be on
    /// separate lines; brackets are ignored so `[1, 2, 3]` rows also parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']'))
            .filter(|token| !token.is_empty())
            .collect_vec();

        if tokens.len() != CELLS {
            return Err(PuzzleError::WrongTileCount(tokens.len()));
        }

        let mut tiles = [0_u8; CELLS];
        for (slot, token) in tiles.iter_mut().zip(&tokens) {
            *slot = token
                .parse::<u8>()
                .map_err(|_| PuzzleError::InvalidTile((*token).to_string()))?;
        }
        Self::try_from(tiles)
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.tiles.chunks(SIDE).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{}]", row.iter().join(", "))?;
        }
        Ok(())
    }
}
