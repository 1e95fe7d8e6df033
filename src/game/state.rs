//! Per-game state machine
//!
//! Owns the board, racks, scores and the bag for one game and is the only
//! place moves get applied. Every move is fully checked before anything is
//! touched, so a rejected move leaves the game exactly as it was.
//!
//! Turn order is fixed: players move in ascending id order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::bag::LetterSupply;
use super::board::{Board, PremiumLayout};
use super::dictionary::Dictionary;
use super::letters::Language;
use super::moves::{exchange_letters, Move, MoveOutcome};
use super::rack::Rack;
use super::scoring::{score, ScoreBreakdown};
use super::validation::validate;
use super::words::{formed_words, resolve};
use super::{Placement, Position, Tile};
use crate::error::{MoveError, StateError, TurnError, ValidationError};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Consecutive passes per player that end the game.
pub const PASS_ROUNDS_TO_END: usize = 3;

/// Exchanges are refused once the bag holds fewer tiles than this.
pub const MIN_BAG_FOR_EXCHANGE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    InProgress,
    Completed,
}

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// A player used their last tile.
    EmptyRack,
    /// Every player passed three times in a row.
    AllPassed,
}

/// Final result of a completed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub reason: EndReason,
    /// Scores after unplayed tiles are settled.
    pub final_scores: BTreeMap<String, i32>,
    /// Point value left on each rack.
    pub penalties: BTreeMap<String, u32>,
    /// The player who emptied their rack, if that ended the game.
    pub went_out: Option<String>,
    /// Highest final score; the lowest id among `tied` on a tie.
    pub winner: String,
    /// Every player sharing the top score, in id order.
    pub tied: Vec<String>,
}

impl Completion {
    pub fn is_tie(&self) -> bool {
        self.tied.len() > 1
    }
}

/// What happened on one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    Placed { words: Vec<String>, points: u32 },
    Exchanged { count: usize },
    Passed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub player: String,
    pub action: TurnAction,
}

/// Result of an accepted placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceResult {
    pub score: ScoreBreakdown,
    /// Tiles drawn to refill the rack.
    pub drawn: usize,
    pub game_ended: bool,
}

impl PlaceResult {
    pub fn points(&self) -> u32 {
        self.score.total
    }

    pub fn words(&self) -> Vec<String> {
        self.score.words.iter().map(|(w, _)| w.clone()).collect()
    }
}

/// Everything about one game in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    phase: Phase,
    racks: BTreeMap<String, Rack>,
    scores: BTreeMap<String, i32>,
    current_player: Option<String>,
    turn_number: u32,
    consecutive_passes: usize,
    center_used: bool,
    supply: LetterSupply,
    history: Vec<TurnRecord>,
    completion: Option<Completion>,
}

impl GameState {
    /// A new game with a full, randomly shuffled bag.
    pub fn new(language: Language) -> Self {
        Self::with_supply(LetterSupply::new(language))
    }

    /// A new game whose bag is shuffled from `seed`.
    pub fn with_seed(language: Language, seed: u64) -> Self {
        Self::with_supply(LetterSupply::with_seed(language, seed))
    }

    /// A new game drawing from a prepared bag.
    pub fn with_supply(supply: LetterSupply) -> Self {
        Self {
            board: Board::new(),
            phase: Phase::NotStarted,
            racks: BTreeMap::new(),
            scores: BTreeMap::new(),
            current_player: None,
            turn_number: 0,
            consecutive_passes: 0,
            center_used: false,
            supply,
            history: Vec::new(),
            completion: None,
        }
    }

    /// Register a player and deal them a rack.
    #[instrument(skip(self))]
    pub fn add_player(&mut self, player: &str) -> Result<(), TurnError> {
        if self.phase != Phase::NotStarted {
            return Err(TurnError::AlreadyStarted);
        }
        if self.racks.contains_key(player) {
            return Err(TurnError::DuplicatePlayer(player.to_string()));
        }
        if self.racks.len() >= MAX_PLAYERS {
            return Err(TurnError::GameFull);
        }

        let mut rack = Rack::new();
        let dealt = rack.refill(&mut self.supply);
        debug!(dealt, rack = %rack.as_string(), "player joined");
        self.racks.insert(player.to_string(), rack);
        self.scores.insert(player.to_string(), 0);
        Ok(())
    }

    /// Start the game. `first` picks the opening player; by default the
    /// lowest id goes first.
    #[instrument(skip(self))]
    pub fn start(&mut self, first: Option<&str>) -> Result<(), TurnError> {
        if self.phase != Phase::NotStarted {
            return Err(TurnError::AlreadyStarted);
        }
        if self.racks.len() < MIN_PLAYERS {
            return Err(TurnError::NotEnoughPlayers);
        }
        let first = match first {
            Some(id) if self.racks.contains_key(id) => id.to_string(),
            Some(id) => return Err(TurnError::UnknownPlayer(id.to_string())),
            None => match self.racks.keys().next() {
                Some(id) => id.clone(),
                None => return Err(TurnError::NotEnoughPlayers),
            },
        };

        info!(players = self.racks.len(), first = %first, "game started");
        self.phase = Phase::InProgress;
        self.current_player = Some(first);
        self.turn_number = 1;
        Ok(())
    }

    /// Play tiles from `player`'s rack onto the board.
    #[instrument(skip(self, tiles, dictionary), fields(count = tiles.len()))]
    pub fn place(
        &mut self,
        player: &str,
        tiles: Vec<(Position, Tile)>,
        dictionary: &Dictionary,
    ) -> Result<PlaceResult, MoveError> {
        self.ensure_turn(player)?;

        let placement = Placement::new(tiles)?;
        let rack = self.rack_of(player)?;
        if let Some(missing) = rack.missing_for(&placement.rack_tiles()) {
            return Err(ValidationError::InsufficientRackLetters(missing).into());
        }

        validate(&self.board, &placement, !self.center_used)?;
        let words = formed_words(&self.board, &placement);
        resolve(dictionary, &words)?;
        let breakdown = score(&placement, &words, self.language(), PremiumLayout::standard());

        // Checks passed: apply
        self.board.apply(&placement);
        let rack = self
            .racks
            .get_mut(player)
            .ok_or_else(|| TurnError::UnknownPlayer(player.to_string()))?;
        rack.remove_placed(&placement.rack_tiles());
        let drawn = rack.refill(&mut self.supply);
        *self.scores.entry(player.to_string()).or_insert(0) += breakdown.total as i32;
        self.consecutive_passes = 0;
        self.center_used = true;

        let word_list: Vec<String> = breakdown.words.iter().map(|(w, _)| w.clone()).collect();
        info!(
            player,
            words = ?word_list,
            points = breakdown.total,
            bingo = breakdown.bingo,
            "tiles placed"
        );
        self.record(
            player,
            TurnAction::Placed {
                words: word_list,
                points: breakdown.total,
            },
        );

        let game_ended = self.advance(player);
        Ok(PlaceResult {
            score: breakdown,
            drawn,
            game_ended,
        })
    }

    /// Swap the named rack tiles (`?` for a blank) for new ones from the bag.
    /// Returns how many tiles were exchanged.
    #[instrument(skip(self))]
    pub fn exchange(&mut self, player: &str, letters: &[char]) -> Result<usize, MoveError> {
        self.ensure_turn(player)?;

        let letters = exchange_letters(letters)?;
        let remaining = self.supply.remaining();
        if remaining < MIN_BAG_FOR_EXCHANGE {
            return Err(ValidationError::InsufficientBagForExchange { remaining }.into());
        }
        let rack = self
            .racks
            .get_mut(player)
            .ok_or_else(|| TurnError::UnknownPlayer(player.to_string()))?;
        let returned = rack
            .take_letters(&letters)
            .map_err(ValidationError::InsufficientRackLetters)?;

        // Draw before returning so a player never gets their own tiles back
        let count = returned.len();
        rack.refill(&mut self.supply);
        self.supply.put_back(returned);
        self.consecutive_passes = 0;

        info!(player, count, "tiles exchanged");
        self.record(player, TurnAction::Exchanged { count });
        self.advance(player);
        Ok(count)
    }

    /// Give up the turn.
    #[instrument(skip(self))]
    pub fn pass(&mut self, player: &str) -> Result<(), MoveError> {
        self.ensure_turn(player)?;

        self.consecutive_passes += 1;
        info!(player, passes = self.consecutive_passes, "turn passed");
        self.record(player, TurnAction::Passed);
        self.advance(player);
        Ok(())
    }

    /// Apply any move and report the result in the form relayed to clients.
    /// Errors become a rejected outcome; the state is then untouched.
    pub fn submit(&mut self, player: &str, mv: Move, dictionary: &Dictionary) -> MoveOutcome {
        let kind = mv.kind();
        let result = match mv {
            Move::Place { tiles } => self.place(player, tiles, dictionary).map(|r| {
                let words = r.words();
                let message = format!("Played {} for {} points", words.join(", "), r.points());
                (r.points(), words, message)
            }),
            Move::Exchange { letters } => self
                .exchange(player, &letters)
                .map(|count| (0, Vec::new(), format!("Exchanged {} tiles", count))),
            Move::Pass => self
                .pass(player)
                .map(|()| (0, Vec::new(), "Passed".to_string())),
        };

        match result {
            Ok((points, words, mut message)) => {
                if let Some(completion) = &self.completion {
                    message = format!("{}. Game over, {} wins", message, completion.winner);
                }
                MoveOutcome {
                    accepted: true,
                    message,
                    points,
                    words,
                    game_ended: self.phase == Phase::Completed,
                    completion: self.completion.clone(),
                }
            }
            Err(err) => {
                debug!(player, kind, %err, "move rejected");
                MoveOutcome::rejected(&err)
            }
        }
    }

    /// Encode the full game for storage.
    pub fn to_json(&self) -> Result<String, StateError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore a game saved with [`GameState::to_json`]. The bag gets a fresh
    /// shuffle source.
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(json)?)
    }

    fn ensure_turn(&self, player: &str) -> Result<(), TurnError> {
        if self.phase != Phase::InProgress {
            return Err(TurnError::GameNotInProgress);
        }
        if !self.racks.contains_key(player) {
            return Err(TurnError::UnknownPlayer(player.to_string()));
        }
        match &self.current_player {
            Some(current) if current == player => Ok(()),
            Some(current) => Err(TurnError::NotYourTurn {
                expected: current.clone(),
            }),
            None => Err(TurnError::GameNotInProgress),
        }
    }

    fn rack_of(&self, player: &str) -> Result<&Rack, TurnError> {
        self.racks
            .get(player)
            .ok_or_else(|| TurnError::UnknownPlayer(player.to_string()))
    }

    fn record(&mut self, player: &str, action: TurnAction) {
        self.history.push(TurnRecord {
            turn: self.turn_number,
            player: player.to_string(),
            action,
        });
    }

    /// Check for the end of the game, else hand the turn to the next player.
    /// Returns whether the game ended.
    fn advance(&mut self, player: &str) -> bool {
        if let Some(out) = self.racks.iter().find(|(_, r)| r.is_empty()).map(|(id, _)| id.clone()) {
            self.finish(EndReason::EmptyRack, Some(out));
            return true;
        }
        if self.consecutive_passes >= PASS_ROUNDS_TO_END * self.racks.len() {
            self.finish(EndReason::AllPassed, None);
            return true;
        }

        let players: Vec<&String> = self.racks.keys().collect();
        let next = players
            .iter()
            .position(|id| id.as_str() == player)
            .map(|i| players[(i + 1) % players.len()].clone());
        self.current_player = next;
        self.turn_number += 1;
        false
    }

    fn finish(&mut self, reason: EndReason, went_out: Option<String>) {
        let language = self.language();
        let penalties: BTreeMap<String, u32> = self
            .racks
            .iter()
            .map(|(id, rack)| (id.clone(), rack.penalty(language)))
            .collect();

        let mut final_scores = self.scores.clone();
        for (id, penalty) in &penalties {
            *final_scores.entry(id.clone()).or_insert(0) -= *penalty as i32;
        }
        if let Some(out) = &went_out {
            let bonus: u32 = penalties
                .iter()
                .filter(|(id, _)| *id != out)
                .map(|(_, p)| p)
                .sum();
            *final_scores.entry(out.clone()).or_insert(0) += bonus as i32;
        }

        let best = final_scores.values().copied().max().unwrap_or(0);
        let tied: Vec<String> = final_scores
            .iter()
            .filter(|(_, s)| **s == best)
            .map(|(id, _)| id.clone())
            .collect();
        let winner = tied.first().cloned().unwrap_or_default();

        info!(?reason, winner = %winner, scores = ?final_scores, "game over");
        self.phase = Phase::Completed;
        self.current_player = None;
        self.completion = Some(Completion {
            reason,
            final_scores,
            penalties,
            went_out,
            winner,
            tied,
        });
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn language(&self) -> Language {
        self.supply.language()
    }

    pub fn rack(&self, player: &str) -> Option<&Rack> {
        self.racks.get(player)
    }

    /// Running scores, before end-of-game settlement.
    pub fn scores(&self) -> &BTreeMap<String, i32> {
        &self.scores
    }

    pub fn score(&self, player: &str) -> Option<i32> {
        self.scores.get(player).copied()
    }

    /// Registered players in turn order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.racks.keys().map(String::as_str)
    }

    pub fn player_count(&self) -> usize {
        self.racks.len()
    }

    pub fn current_player(&self) -> Option<&str> {
        self.current_player.as_deref()
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn consecutive_passes(&self) -> usize {
        self.consecutive_passes
    }

    /// Whether a word has been played yet.
    pub fn center_used(&self) -> bool {
        self.center_used
    }

    pub fn is_first_move(&self) -> bool {
        !self.center_used
    }

    pub fn bag_remaining(&self) -> usize {
        self.supply.remaining()
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn completion(&self) -> Option<&Completion> {
        self.completion.as_ref()
    }

    /// Tiles in the bag, on every rack and on the board. Constant for a game.
    pub fn tile_count(&self) -> usize {
        self.supply.remaining()
            + self.racks.values().map(Rack::len).sum::<usize>()
            + self.board.tile_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CENTER;

    fn dict() -> Dictionary {
        Dictionary::from_words(["CAT", "CATS", "AT", "TA", "RAD", "GAR", "DOG"])
    }

    /// A bag that deals `racks` in order, then hands out `rest` from its end.
    fn stacked_bag(racks: &[&str], rest: &str) -> LetterSupply {
        let mut tiles: Vec<Tile> = rest.chars().map(Tile::from_rack_char).collect();
        for rack in racks.iter().rev() {
            tiles.extend(rack.chars().rev().map(Tile::from_rack_char));
        }
        LetterSupply::from_tiles(Language::English, tiles)
    }

    fn two_player_game(alice: &str, bob: &str, rest: &str) -> GameState {
        let mut game = GameState::with_supply(stacked_bag(&[alice, bob], rest));
        game.add_player("alice").unwrap();
        game.add_player("bob").unwrap();
        game.start(None).unwrap();
        game
    }

    fn cat() -> Vec<(Position, Tile)> {
        vec![
            (Position::new(7, 7), Tile::letter('C')),
            (Position::new(7, 8), Tile::letter('A')),
            (Position::new(7, 9), Tile::letter('T')),
        ]
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut game = GameState::with_seed(Language::English, 1);
        assert_eq!(game.start(None), Err(TurnError::NotEnoughPlayers));
        game.add_player("alice").unwrap();
        assert_eq!(
            game.add_player("alice"),
            Err(TurnError::DuplicatePlayer("alice".to_string()))
        );
        game.add_player("bob").unwrap();
        assert_eq!(
            game.start(Some("carol")),
            Err(TurnError::UnknownPlayer("carol".to_string()))
        );
        game.start(Some("bob")).unwrap();
        assert_eq!(game.current_player(), Some("bob"));
        assert_eq!(game.start(None), Err(TurnError::AlreadyStarted));
        assert_eq!(game.add_player("carol"), Err(TurnError::AlreadyStarted));
    }

    #[test]
    fn test_table_limit() {
        let mut game = GameState::with_seed(Language::English, 1);
        for id in ["a", "b", "c", "d"] {
            game.add_player(id).unwrap();
        }
        assert_eq!(game.add_player("e"), Err(TurnError::GameFull));
        assert_eq!(game.bag_remaining(), 100 - 28);
    }

    #[test]
    fn test_moves_before_start_rejected() {
        let mut game = GameState::with_seed(Language::English, 1);
        game.add_player("alice").unwrap();
        assert_eq!(
            game.pass("alice"),
            Err(MoveError::Turn(TurnError::GameNotInProgress))
        );
    }

    #[test]
    fn test_place_scores_and_advances() {
        let mut game = two_player_game("CATXYZQ", "DOGEEEE", "IIIIIII");
        let result = game.place("alice", cat(), &dict()).unwrap();

        assert_eq!(result.points(), 5);
        assert_eq!(result.words(), vec!["CAT"]);
        assert_eq!(result.drawn, 3);
        assert!(!result.game_ended);
        assert_eq!(game.score("alice"), Some(5));
        assert_eq!(game.current_player(), Some("bob"));
        assert_eq!(game.turn_number(), 2);
        assert!(game.center_used());
        assert_eq!(game.rack("alice").unwrap().as_string().len(), 7);
        assert_eq!(game.bag_remaining(), 4);
        assert_eq!(game.board().get(CENTER), Some(Tile::letter('C')));
        assert_eq!(
            game.history(),
            &[TurnRecord {
                turn: 1,
                player: "alice".to_string(),
                action: TurnAction::Placed {
                    words: vec!["CAT".to_string()],
                    points: 5
                },
            }]
        );
    }

    #[test]
    fn test_not_your_turn() {
        let mut game = two_player_game("CATXYZQ", "DOGEEEE", "");
        assert_eq!(
            game.pass("bob"),
            Err(MoveError::Turn(TurnError::NotYourTurn {
                expected: "alice".to_string()
            }))
        );
        assert_eq!(
            game.pass("mallory"),
            Err(MoveError::Turn(TurnError::UnknownPlayer("mallory".to_string())))
        );
    }

    #[test]
    fn test_rack_must_hold_letters() {
        let mut game = two_player_game("CAXXYZQ", "DOGEEEE", "");
        assert_eq!(
            game.place("alice", cat(), &dict()),
            Err(MoveError::Validation(ValidationError::InsufficientRackLetters(vec!['T'])))
        );
    }

    #[test]
    fn test_blank_consumes_rack_blank() {
        let mut game = two_player_game("CA?XYZQ", "DOGEEEE", "IIIIIII");
        let tiles = vec![
            (Position::new(7, 7), Tile::letter('C')),
            (Position::new(7, 8), Tile::letter('A')),
            (Position::new(7, 9), Tile::blank_as('T')),
        ];
        let result = game.place("alice", tiles, &dict()).unwrap();
        // The blank scores nothing
        assert_eq!(result.points(), 4);
        assert!(!game.rack("alice").unwrap().contains_blank());
    }

    #[test]
    fn test_rejected_move_leaves_state_unchanged() {
        let mut game = two_player_game("CATXYZQ", "DOGEEEE", "IIIIIII");
        let before = game.to_json().unwrap();

        // Off center on the first move
        let off_center = vec![
            (Position::new(3, 3), Tile::letter('C')),
            (Position::new(3, 4), Tile::letter('A')),
            (Position::new(3, 5), Tile::letter('T')),
        ];
        assert_eq!(
            game.place("alice", off_center, &dict()),
            Err(MoveError::Validation(ValidationError::MissingCenter))
        );
        // Not a word
        let tac = vec![
            (Position::new(7, 7), Tile::letter('T')),
            (Position::new(7, 8), Tile::letter('A')),
            (Position::new(7, 9), Tile::letter('C')),
        ];
        assert_eq!(
            game.place("alice", tac, &dict()),
            Err(MoveError::Validation(ValidationError::InvalidWord(vec!["TAC".to_string()])))
        );
        assert_eq!(game.to_json().unwrap(), before);
    }

    #[test]
    fn test_exchange_needs_full_bag() {
        let mut game = two_player_game("AEIOU??", "DOGEEEE", "RSTLN");
        let before = game.to_json().unwrap();
        assert_eq!(
            game.exchange("alice", &['A']),
            Err(MoveError::Validation(ValidationError::InsufficientBagForExchange {
                remaining: 5
            }))
        );
        assert_eq!(game.rack("alice").unwrap().as_string(), "AEIOU??");
        assert_eq!(game.to_json().unwrap(), before);
    }

    #[test]
    fn test_exchange_swaps_tiles() {
        let mut game = two_player_game("AEIOU??", "DOGEEEE", "RSTLNRSTLN");
        game.pass("alice").unwrap();
        game.pass("bob").unwrap();
        assert_eq!(game.consecutive_passes(), 2);

        assert_eq!(game.exchange("alice", &['a', 'e', '?']), Ok(3));
        let rack = game.rack("alice").unwrap();
        assert_eq!(rack.len(), 7);
        assert_eq!(rack.blank_count(), 1);
        assert_eq!(game.bag_remaining(), 10);
        assert_eq!(game.consecutive_passes(), 0);
        assert_eq!(game.score("alice"), Some(0));
        assert_eq!(game.current_player(), Some("bob"));
        assert_eq!(game.tile_count(), 24);
    }

    #[test]
    fn test_exchange_needs_named_letters() {
        let mut game = two_player_game("AEIOU??", "DOGEEEE", "RSTLNRSTLN");
        assert_eq!(
            game.exchange("alice", &['Z']),
            Err(MoveError::Validation(ValidationError::InsufficientRackLetters(vec!['Z'])))
        );
        assert_eq!(
            game.exchange("alice", &[]),
            Err(MoveError::Validation(ValidationError::EmptyExchange))
        );
    }

    #[test]
    fn test_all_passed_ends_game() {
        let mut game = two_player_game("AEIOULN", "RSTAEIO", "");
        for _ in 0..2 {
            game.pass("alice").unwrap();
            game.pass("bob").unwrap();
        }
        game.pass("alice").unwrap();
        assert_eq!(game.phase(), Phase::InProgress);
        game.pass("bob").unwrap();

        assert_eq!(game.phase(), Phase::Completed);
        let done = game.completion().unwrap();
        assert_eq!(done.reason, EndReason::AllPassed);
        assert_eq!(done.final_scores["alice"], -7);
        assert_eq!(done.final_scores["bob"], -7);
        // Tie goes to the lowest id
        assert_eq!(done.winner, "alice");
        assert_eq!(done.tied, vec!["alice".to_string(), "bob".to_string()]);
        assert!(done.is_tie());
        assert_eq!(game.pass("alice"), Err(MoveError::Turn(TurnError::GameNotInProgress)));
    }

    #[test]
    fn test_place_resets_passes() {
        let mut game = two_player_game("EEEEEEE", "CATXYZQ", "IIIIIII");
        game.pass("alice").unwrap();
        game.place("bob", cat(), &dict()).unwrap();
        assert_eq!(game.consecutive_passes(), 0);
    }

    #[test]
    fn test_empty_rack_ends_game_with_settlement() {
        // Bob only gets three tiles: the bag runs dry after alice's deal
        let mut game = GameState::with_supply(stacked_bag(&["QZJXKVW", "CAT"], ""));
        game.add_player("alice").unwrap();
        game.add_player("bob").unwrap();
        game.start(None).unwrap();
        assert_eq!(game.rack("bob").unwrap().len(), 3);

        game.pass("alice").unwrap();
        let outcome = game.submit("bob", Move::Place { tiles: cat() }, &dict());
        assert!(outcome.accepted);
        assert!(outcome.game_ended);
        assert_eq!(outcome.points, 5);

        let done = outcome.completion.unwrap();
        assert_eq!(done.reason, EndReason::EmptyRack);
        assert_eq!(done.went_out.as_deref(), Some("bob"));
        assert_eq!(done.penalties["alice"], 49);
        assert_eq!(done.final_scores["alice"], -49);
        assert_eq!(done.final_scores["bob"], 5 + 49);
        assert_eq!(done.winner, "bob");
        assert!(!done.is_tie());
    }

    #[test]
    fn test_submit_reports_rejection() {
        let mut game = two_player_game("CATXYZQ", "DOGEEEE", "");
        let outcome = game.submit("bob", Move::Pass, &dict());
        assert!(!outcome.accepted);
        assert_eq!(outcome.message, "It's alice's turn");
        assert!(!outcome.game_ended);
    }

    #[test]
    fn test_json_round_trip() {
        let mut game = two_player_game("CATXYZQ", "DOGEEEE", "IIIIIII");
        game.place("alice", cat(), &dict()).unwrap();
        let json = game.to_json().unwrap();
        let restored = GameState::from_json(&json).unwrap();
        assert_eq!(restored, game);
        assert_eq!(restored.current_player(), Some("bob"));
        assert!(GameState::from_json("{not json").is_err());
    }

    #[test]
    fn test_tile_count_conserved() {
        let mut game = GameState::with_seed(Language::French, 9);
        game.add_player("a").unwrap();
        game.add_player("b").unwrap();
        game.add_player("c").unwrap();
        game.start(None).unwrap();
        assert_eq!(game.tile_count(), 102);
        let letters = game.rack("a").unwrap().letters();
        game.exchange("a", &letters[..2]).unwrap();
        assert_eq!(game.tile_count(), 102);
    }
}
