//! Lexigrid - rules engine and computer opponent for a Scrabble-like word
//! game on a 15x15 board.
//!
//! [`game`] owns the rules: tiles, racks, the bag, move validation, word
//! formation, scoring and the turn state machine. [`search`] builds moves
//! for computer players on top of it.

pub mod error;
pub mod game;
pub mod search;
