//! Player moves and the result reported back for each one.

use serde::{Deserialize, Serialize};

use super::state::Completion;
use super::{Placement, Position, Tile, BLANK, RACK_SIZE};
use crate::error::{MoveError, ValidationError};

/// One player action.
///
/// Built through [`Move::place`] and [`Move::exchange`], which reject
/// malformed input before it ever reaches a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    /// Put tiles on the board.
    Place { tiles: Vec<(Position, Tile)> },
    /// Swap rack tiles (`?` for a blank) for fresh ones from the bag.
    Exchange { letters: Vec<char> },
    Pass,
}

impl Move {
    /// A placement move: 1 to 7 tiles, each with a letter A-Z.
    pub fn place(tiles: Vec<(Position, Tile)>) -> Result<Self, ValidationError> {
        let placement = Placement::new(tiles)?;
        Ok(Move::Place {
            tiles: placement
                .tiles()
                .iter()
                .map(|placed| (placed.position, placed.tile))
                .collect(),
        })
    }

    /// An exchange of 1 to 7 rack tiles, named by letter or `?`.
    pub fn exchange(letters: &[char]) -> Result<Self, ValidationError> {
        Ok(Move::Exchange {
            letters: exchange_letters(letters)?,
        })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Move::Place { .. } => "place",
            Move::Exchange { .. } => "exchange",
            Move::Pass => "pass",
        }
    }
}

/// Check and normalize the letters named for an exchange.
pub(crate) fn exchange_letters(letters: &[char]) -> Result<Vec<char>, ValidationError> {
    if letters.is_empty() {
        return Err(ValidationError::EmptyExchange);
    }
    if letters.len() > RACK_SIZE {
        return Err(ValidationError::TooManyTiles(letters.len()));
    }
    let letters: Vec<char> = letters.iter().map(|c| c.to_ascii_uppercase()).collect();
    if let Some(&bad) = letters.iter().find(|&&c| c != BLANK && !c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidLetter(bad));
    }
    Ok(letters)
}

/// What the player gets told about a submitted move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub accepted: bool,
    pub message: String,
    pub points: u32,
    /// Words formed by an accepted placement.
    pub words: Vec<String>,
    pub game_ended: bool,
    pub completion: Option<Completion>,
}

impl MoveOutcome {
    /// A rejected move, carrying the reason as its message.
    pub fn rejected(err: &MoveError) -> Self {
        Self {
            accepted: false,
            message: err.to_string(),
            points: 0,
            words: Vec::new(),
            game_ended: false,
            completion: None,
        }
    }
}
