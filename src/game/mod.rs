//! Game rules: board, tiles, racks, word formation, scoring, turn flow

pub mod bag;
pub mod board;
pub mod dictionary;
pub mod letters;
pub mod moves;
pub mod rack;
pub mod scoring;
pub mod state;
pub mod validation;
pub mod words;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Width and height of the board.
pub const BOARD_SIZE: usize = 15;

/// The mandatory first-move square.
pub const CENTER: Position = Position { row: 7, col: 7 };

/// Maximum number of tiles a rack holds.
pub const RACK_SIZE: usize = 7;

/// Flat bonus for playing a full rack in one move.
pub const BINGO_BONUS: u32 = 50;

/// Marker letter for a blank tile that has not been assigned a letter yet.
pub const BLANK: char = '?';

/// A cell coordinate on the board, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on the board.
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// The coordinate that changes when moving along `dir`.
    pub fn along(&self, dir: Direction) -> usize {
        match dir {
            Direction::Horizontal => self.col,
            Direction::Vertical => self.row,
        }
    }

    /// The coordinate that stays fixed when moving along `dir`.
    pub fn across(&self, dir: Direction) -> usize {
        match dir {
            Direction::Horizontal => self.row,
            Direction::Vertical => self.col,
        }
    }

    /// Position at `index` on the line of `self` in direction `dir`.
    pub fn with_along(&self, dir: Direction, index: usize) -> Self {
        match dir {
            Direction::Horizontal => Self::new(self.row, index),
            Direction::Vertical => Self::new(index, self.col),
        }
    }

    /// Next cell along `dir`, if still on the board.
    pub fn next(&self, dir: Direction) -> Option<Self> {
        let idx = self.along(dir) + 1;
        (idx < BOARD_SIZE).then(|| self.with_along(dir, idx))
    }

    /// Previous cell along `dir`, if still on the board.
    pub fn prev(&self, dir: Direction) -> Option<Self> {
        let idx = self.along(dir).checked_sub(1)?;
        Some(self.with_along(dir, idx))
    }

    /// Orthogonal neighbours that are on the board.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> {
        [
            self.prev(Direction::Vertical),
            self.next(Direction::Vertical),
            self.prev(Direction::Horizontal),
            self.next(Direction::Horizontal),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Axis of a word or placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn perpendicular(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    pub fn all() -> [Direction; 2] {
        [Direction::Horizontal, Direction::Vertical]
    }
}

/// A letter tile.
///
/// Blanks still in a rack or the bag carry [`BLANK`] as their letter; once
/// placed they carry the letter the player chose, and still score zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    pub letter: char,
    pub is_blank: bool,
}

impl Tile {
    /// A regular letter tile. The letter is uppercased.
    pub fn letter(letter: char) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            is_blank: false,
        }
    }

    /// An unassigned blank, as held in a rack or the bag.
    pub fn blank() -> Self {
        Self {
            letter: BLANK,
            is_blank: true,
        }
    }

    /// A blank placed on the board showing `letter`.
    pub fn blank_as(letter: char) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            is_blank: true,
        }
    }

    /// Parse the rack notation: `?` is a blank, anything else a letter.
    pub fn from_rack_char(c: char) -> Self {
        if c == BLANK {
            Self::blank()
        } else {
            Self::letter(c)
        }
    }

    /// The character this tile occupies in a rack (`?` for any blank).
    pub fn rack_char(&self) -> char {
        if self.is_blank {
            BLANK
        } else {
            self.letter
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank {
            write!(f, "{}", self.letter.to_ascii_lowercase())
        } else {
            write!(f, "{}", self.letter)
        }
    }
}

/// A tile placed at a position as part of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedTile {
    pub position: Position,
    pub tile: Tile,
}

/// The set of tiles a player puts down in one move.
///
/// Construction only checks the tiles themselves (letters, count); board
/// legality is the job of [`validation::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    tiles: Vec<PlacedTile>,
}

impl Placement {
    /// Build a placement, checking every tile carries a playable letter.
    pub fn new(tiles: Vec<(Position, Tile)>) -> Result<Self, ValidationError> {
        if tiles.is_empty() {
            return Err(ValidationError::Empty);
        }
        if tiles.len() > RACK_SIZE {
            return Err(ValidationError::TooManyTiles(tiles.len()));
        }
        let mut placed = Vec::with_capacity(tiles.len());
        for (position, tile) in tiles {
            let tile = if tile.is_blank {
                Tile::blank_as(tile.letter)
            } else {
                Tile::letter(tile.letter)
            };
            if !tile.letter.is_ascii_uppercase() {
                return Err(ValidationError::InvalidLetter(tile.letter));
            }
            placed.push(PlacedTile { position, tile });
        }
        Ok(Self { tiles: placed })
    }

    pub fn tiles(&self) -> &[PlacedTile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The tile this placement puts at `pos`, if any.
    pub fn tile_at(&self, pos: Position) -> Option<Tile> {
        self.tiles
            .iter()
            .find(|placed| placed.position == pos)
            .map(|placed| placed.tile)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles.iter().map(|placed| placed.position)
    }

    /// The plain tiles, as they are consumed from a rack.
    pub fn rack_tiles(&self) -> Vec<Tile> {
        self.tiles.iter().map(|placed| placed.tile).collect()
    }
}
