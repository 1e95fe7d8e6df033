//! Word formation: which words a placement creates, and whether they exist.

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::dictionary::Dictionary;
use super::validation::placement_axis;
use super::{Direction, Placement, Position, Tile, BLANK};
use crate::error::ValidationError;

/// One square of a formed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCell {
    pub position: Position,
    pub tile: Tile,
    /// Placed in the current move (only these trigger premiums).
    pub is_new: bool,
}

/// A word created or extended by a placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormedWord {
    pub direction: Direction,
    pub cells: Vec<WordCell>,
}

impl FormedWord {
    /// Letters as displayed, blanks showing their chosen letter.
    pub fn text(&self) -> String {
        self.cells.iter().map(|c| c.tile.letter).collect()
    }

    /// Dictionary pattern: blanks become `?` wildcards.
    pub fn pattern(&self) -> String {
        self.cells
            .iter()
            .map(|c| if c.tile.is_blank { BLANK } else { c.tile.letter })
            .collect()
    }

    pub fn start(&self) -> Position {
        self.cells[0].position
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Every word of two or more letters that `placement` forms on `board`:
/// the word along the placement's axis, then one cross-word per new tile
/// that has neighbours on the perpendicular axis.
///
/// Assumes the placement already passed [`super::validation::validate`].
pub fn formed_words(board: &Board, placement: &Placement) -> Vec<FormedWord> {
    let Some(first) = placement.tiles().first() else {
        return Vec::new();
    };
    let dir = placement_axis(board, placement).unwrap_or(Direction::Horizontal);

    let mut words: Vec<FormedWord> = Vec::new();
    let mut push = |word: FormedWord| {
        let duplicate = words
            .iter()
            .any(|w| w.direction == word.direction && w.start() == word.start() && w.len() == word.len());
        if word.len() >= 2 && !duplicate {
            words.push(word);
        }
    };

    push(run_through(board, placement, first.position, dir));
    for placed in placement.tiles() {
        push(run_through(board, placement, placed.position, dir.perpendicular()));
    }
    words
}

/// The maximal run of tiles (board or new) through `pos` along `dir`.
fn run_through(board: &Board, placement: &Placement, pos: Position, dir: Direction) -> FormedWord {
    let cell_at = |p: Position| -> Option<WordCell> {
        if let Some(tile) = placement.tile_at(p) {
            return Some(WordCell { position: p, tile, is_new: true });
        }
        board.get(p).map(|tile| WordCell { position: p, tile, is_new: false })
    };

    let mut start = pos;
    while let Some(prev) = start.prev(dir) {
        if cell_at(prev).is_none() {
            break;
        }
        start = prev;
    }

    let mut cells = Vec::new();
    let mut cursor = Some(start);
    while let Some(p) = cursor {
        match cell_at(p) {
            Some(cell) => cells.push(cell),
            None => break,
        }
        cursor = p.next(dir);
    }

    FormedWord { direction: dir, cells }
}

/// Check every formed word against the dictionary.
///
/// Blanks are wildcards: a word passes if any dictionary entry fits its
/// pattern, whatever letter the blank shows. Fails with every word that
/// does not resolve.
pub fn resolve(dictionary: &Dictionary, words: &[FormedWord]) -> Result<(), ValidationError> {
    if words.is_empty() {
        return Err(ValidationError::TooShort);
    }
    let invalid = dictionary.invalid_words(words);
    if invalid.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::InvalidWord(invalid))
    }
}
