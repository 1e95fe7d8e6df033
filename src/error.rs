//! Error types for move validation and turn handling.
//!
//! Every error here is recoverable: a rejected move leaves the game exactly
//! as it was, and the error's `Display` text is what gets relayed to the
//! player.

use derive_more::{Display, From};

use crate::game::Position;

/// Why a proposed move is illegal.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ValidationError {
    /// No tiles were placed.
    #[display("No tiles placed")]
    Empty,

    /// More tiles than a rack can hold.
    #[display("Too many tiles ({} placed, at most 7)", _0)]
    TooManyTiles(usize),

    /// A tile does not carry a playable letter.
    #[display("Invalid letter {:?}", _0)]
    InvalidLetter(char),

    /// A tile lies outside the board.
    #[display("Tile at {} is off the board", _0)]
    OutOfBounds(Position),

    /// Tiles are not on a single row or column.
    #[display("Tiles must be in a single row or column")]
    MultiLine,

    /// A tile lands on an occupied square, or two tiles share a square.
    #[display("Square {} is already taken", _0)]
    Overlap(Position),

    /// The placed tiles leave an empty square inside the word.
    #[display("Gap at {}", _0)]
    Gap(Position),

    /// The first word must cover the center square.
    #[display("First word must cover the center square")]
    MissingCenter,

    /// The tiles do not touch anything already on the board.
    #[display("Word must connect to tiles on the board")]
    NotConnected,

    /// No word of two or more letters was formed.
    #[display("Too short (need a word of 2+ letters)")]
    TooShort,

    /// One or more formed words are not in the dictionary.
    #[display("Not in dictionary: {}", _0.join(", "))]
    InvalidWord(Vec<String>),

    /// The rack does not hold the tiles the move needs.
    #[display("Missing letters: {}", _0.iter().collect::<String>())]
    InsufficientRackLetters(Vec<char>),

    /// Exchanges need a reasonably full bag.
    #[display("Cannot exchange: only {} tiles left in the bag", remaining)]
    InsufficientBagForExchange { remaining: usize },

    /// An exchange must name at least one tile.
    #[display("No tiles named for exchange")]
    EmptyExchange,
}

impl std::error::Error for ValidationError {}

/// Why a move cannot be taken right now, regardless of its content.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TurnError {
    /// Someone else is to move.
    #[display("It's {}'s turn", expected)]
    NotYourTurn { expected: String },

    /// The game has not started or is already over.
    #[display("Game is not in progress")]
    GameNotInProgress,

    /// Players can only join before the game starts.
    #[display("Game has already started")]
    AlreadyStarted,

    /// The player id is already registered.
    #[display("Player {} already joined", _0)]
    DuplicatePlayer(String),

    /// The player id is not part of this game.
    #[display("Unknown player {}", _0)]
    UnknownPlayer(String),

    /// Starting needs at least two players.
    #[display("Need at least 2 players to start")]
    NotEnoughPlayers,

    /// The table is full.
    #[display("Game is full")]
    GameFull,
}

impl std::error::Error for TurnError {}

/// Any reason a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum MoveError {
    #[display("{}", _0)]
    Validation(ValidationError),
    #[display("{}", _0)]
    Turn(TurnError),
}

impl std::error::Error for MoveError {}

/// Failure to save or restore a game.
#[derive(Debug, Display, From)]
pub enum StateError {
    #[display("game state encoding failed: {}", _0)]
    Encoding(serde_json::Error),
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StateError::Encoding(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        assert_eq!(
            ValidationError::OutOfBounds(Position::new(15, 3)).to_string(),
            "Tile at (15, 3) is off the board"
        );
        assert_eq!(
            ValidationError::InvalidWord(vec!["QZX".to_string(), "AA".to_string()]).to_string(),
            "Not in dictionary: QZX, AA"
        );
        assert_eq!(
            ValidationError::InsufficientRackLetters(vec!['X', 'Y']).to_string(),
            "Missing letters: XY"
        );
        assert_eq!(
            TurnError::NotYourTurn { expected: "bob".to_string() }.to_string(),
            "It's bob's turn"
        );
    }

    #[test]
    fn test_move_error_wraps_both_kinds() {
        let err: MoveError = ValidationError::MultiLine.into();
        assert_eq!(err.to_string(), "Tiles must be in a single row or column");
        let err: MoveError = TurnError::GameNotInProgress.into();
        assert!(matches!(err, MoveError::Turn(TurnError::GameNotInProgress)));
    }
}
