//! The 15x15 board and its premium squares.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Placement, Position, Tile, BOARD_SIZE, CENTER};

/// Score multiplier printed on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Premium {
    None,
    DoubleLetter,
    TripleLetter,
    DoubleWord,
    TripleWord,
}

impl Premium {
    pub fn letter_multiplier(&self) -> u32 {
        match self {
            Premium::DoubleLetter => 2,
            Premium::TripleLetter => 3,
            _ => 1,
        }
    }

    pub fn word_multiplier(&self) -> u32 {
        match self {
            Premium::DoubleWord => 2,
            Premium::TripleWord => 3,
            _ => 1,
        }
    }

    /// Short label used by board renderings.
    pub fn label(&self) -> &'static str {
        match self {
            Premium::None => ".",
            Premium::DoubleLetter => "2l",
            Premium::TripleLetter => "3l",
            Premium::DoubleWord => "2w",
            Premium::TripleWord => "3w",
        }
    }
}

/// Premium squares for every board position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremiumLayout {
    squares: [[Premium; BOARD_SIZE]; BOARD_SIZE],
}

/// The standard layout, shared by every game.
pub static STANDARD_LAYOUT: Lazy<PremiumLayout> =
    Lazy::new(|| PremiumLayout::from_fn(standard_premium));

impl PremiumLayout {
    pub fn standard() -> &'static PremiumLayout {
        &STANDARD_LAYOUT
    }

    /// A layout without any premium squares.
    pub fn plain() -> Self {
        Self::from_fn(|_| Premium::None)
    }

    pub fn from_fn(f: impl Fn(Position) -> Premium) -> Self {
        let mut squares = [[Premium::None; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in squares.iter_mut().enumerate() {
            for (col, square) in line.iter_mut().enumerate() {
                *square = f(Position::new(row, col));
            }
        }
        Self { squares }
    }

    /// Premium at `pos`; off-board positions have none.
    pub fn at(&self, pos: Position) -> Premium {
        if pos.in_bounds() {
            self.squares[pos.row][pos.col]
        } else {
            Premium::None
        }
    }
}

/// Standard premium layout. The board is symmetric in both axes and the
/// diagonal, so each square is folded into one corner octant first.
/// The center star is the first-move anchor and carries no multiplier.
fn standard_premium(pos: Position) -> Premium {
    if pos == CENTER {
        return Premium::None;
    }
    let last = BOARD_SIZE - 1;
    let mut r = pos.row.min(last - pos.row);
    let mut c = pos.col.min(last - pos.col);
    if c > r {
        std::mem::swap(&mut r, &mut c);
    }

    match (r, c) {
        (0, 0) | (7, 0) => Premium::TripleWord,
        (5, 1) | (5, 5) => Premium::TripleLetter,
        (3, 0) | (6, 2) | (7, 3) | (6, 6) => Premium::DoubleLetter,
        (r, c) if r == c && r <= 4 => Premium::DoubleWord,
        _ => Premium::None,
    }
}

/// Tiles on the board. Occupied cells are never cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Tile>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board.
    pub fn new() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Tile at `pos`; `None` when empty or off the board.
    pub fn get(&self, pos: Position) -> Option<Tile> {
        if pos.in_bounds() {
            self.cells[pos.row][pos.col]
        } else {
            None
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Whether any orthogonal neighbour of `pos` holds a tile.
    pub fn has_neighbor(&self, pos: Position) -> bool {
        pos.neighbors().any(|n| self.is_occupied(n))
    }

    /// Number of occupied orthogonal neighbours.
    pub fn neighbor_count(&self, pos: Position) -> usize {
        pos.neighbors().filter(|n| self.is_occupied(*n)).count()
    }

    /// Write a validated placement onto the board. Occupied or off-board
    /// cells are left untouched.
    pub fn apply(&mut self, placement: &Placement) {
        for placed in placement.tiles() {
            let pos = placed.position;
            if pos.in_bounds() && self.cells[pos.row][pos.col].is_none() {
                self.cells[pos.row][pos.col] = Some(placed.tile);
            }
        }
    }

    /// Put a single tile down (test and setup helper).
    pub fn set(&mut self, pos: Position, tile: Tile) {
        if pos.in_bounds() && self.cells[pos.row][pos.col].is_none() {
            self.cells[pos.row][pos.col] = Some(tile);
        }
    }

    /// Write `word` starting at `start` along `dir` (setup helper).
    pub fn write_word(&mut self, start: Position, dir: super::Direction, word: &str) {
        let mut pos = Some(start);
        for c in word.chars() {
            let Some(p) = pos else { break };
            self.set(p, Tile::letter(c));
            pos = p.next(dir);
        }
    }

    /// Number of tiles on the board.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.tile_count() == 0
    }

    /// All occupied positions, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|t| (Position::new(row, col), t)))
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.cells {
            for cell in line {
                match cell {
                    Some(tile) => write!(f, "{}", tile)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    #[test]
    fn test_standard_layout_counts() {
        let layout = PremiumLayout::standard();
        let mut counts = std::collections::HashMap::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                *counts.entry(layout.at(Position::new(row, col))).or_insert(0) += 1;
            }
        }
        assert_eq!(counts[&Premium::TripleWord], 8);
        assert_eq!(counts[&Premium::DoubleWord], 16);
        assert_eq!(counts[&Premium::TripleLetter], 12);
        assert_eq!(counts[&Premium::DoubleLetter], 24);
    }

    #[test]
    fn test_known_squares() {
        let layout = PremiumLayout::standard();
        assert_eq!(layout.at(Position::new(0, 0)), Premium::TripleWord);
        assert_eq!(layout.at(Position::new(0, 7)), Premium::TripleWord);
        assert_eq!(layout.at(Position::new(0, 3)), Premium::DoubleLetter);
        assert_eq!(layout.at(Position::new(1, 1)), Premium::DoubleWord);
        assert_eq!(layout.at(Position::new(1, 5)), Premium::TripleLetter);
        assert_eq!(layout.at(Position::new(13, 9)), Premium::TripleLetter);
        assert_eq!(layout.at(Position::new(6, 8)), Premium::DoubleLetter);
        assert_eq!(layout.at(Position::new(14, 11)), Premium::DoubleLetter);
        assert_eq!(layout.at(CENTER), Premium::None);
        assert_eq!(layout.at(Position::new(7, 8)), Premium::None);
        assert_eq!(layout.at(Position::new(20, 20)), Premium::None);
    }

    #[test]
    fn test_layout_is_symmetric() {
        let layout = PremiumLayout::standard();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let p = layout.at(Position::new(row, col));
                assert_eq!(p, layout.at(Position::new(col, row)));
                assert_eq!(p, layout.at(Position::new(14 - row, col)));
            }
        }
    }

    #[test]
    fn test_cells_are_never_overwritten() {
        let mut board = Board::new();
        board.set(CENTER, Tile::letter('A'));
        board.set(CENTER, Tile::letter('B'));
        assert_eq!(board.get(CENTER), Some(Tile::letter('A')));
        assert_eq!(board.tile_count(), 1);
    }

    #[test]
    fn test_write_word_and_neighbors() {
        let mut board = Board::new();
        board.write_word(Position::new(7, 6), Direction::Horizontal, "RAD");
        assert_eq!(board.tile_count(), 3);
        assert!(board.has_neighbor(Position::new(6, 7)));
        assert!(!board.has_neighbor(Position::new(5, 7)));
        assert_eq!(board.neighbor_count(Position::new(7, 9)), 1);
        assert_eq!(board.to_string().lines().nth(7), Some("......RAD......"));
    }
}
