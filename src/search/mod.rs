//! Computer opponent
//!
//! Finds legal scoring placements for a rack on a board:
//! 1. Narrow the dictionary to words the rack could spell ([`index`])
//! 2. Try each word across the best anchor squares ([`anchors`])
//! 3. Run every candidate through the same validation, word and scoring
//!    pipeline a human move goes through
//! 4. Let the difficulty level pick among the ranked results
//!
//! The search never fails: a panic, a cancelled search, or an empty result
//! all come back as a pass.

pub mod anchors;
pub mod difficulty;
pub mod index;

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::game::board::{Board, PremiumLayout};
use crate::game::dictionary::Dictionary;
use crate::game::letters::Language;
use crate::game::moves::Move;
use crate::game::rack::Rack;
use crate::game::scoring::score;
use crate::game::validation::validate;
use crate::game::words::{formed_words, resolve};
use crate::game::{Direction, Placement, Position, Tile, BLANK, BOARD_SIZE};

pub use difficulty::Difficulty;
use index::{IndexedWord, RackProfile, WordIndex};

/// Limits on how much work one search may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Dictionary words tried per search, longest first.
    pub max_candidates: usize,
    /// Anchor squares tried per word.
    pub anchors_per_word: usize,
    /// Wall-clock budget; the best moves found so far are kept.
    pub time_budget: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_candidates: 400,
            anchors_per_word: 12,
            time_budget: Duration::from_millis(50),
        }
    }
}

impl SearchConfig {
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn with_anchors_per_word(mut self, anchors_per_word: usize) -> Self {
        self.anchors_per_word = anchors_per_word;
        self
    }

    pub fn with_time_budget(mut self, time_budget: Duration) -> Self {
        self.time_budget = time_budget;
        self
    }
}

/// A legal, scored placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub tiles: Vec<(Position, Tile)>,
    pub words: Vec<String>,
    pub points: u32,
}

impl Candidate {
    pub fn into_move(self) -> Move {
        Move::Place { tiles: self.tiles }
    }
}

/// Move generator for one dictionary and tile set. Cheap to share across
/// threads and games.
#[derive(Debug)]
pub struct ComputerPlayer {
    dictionary: Arc<Dictionary>,
    index: WordIndex,
    language: Language,
    config: SearchConfig,
}

impl ComputerPlayer {
    pub fn new(dictionary: Arc<Dictionary>, language: Language, config: SearchConfig) -> Self {
        let index = WordIndex::build(&dictionary);
        debug!(indexed = index.len(), "word index built");
        Self {
            dictionary,
            index,
            language,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Pick a move for `rack`. Always returns a legal placement or a pass.
    pub fn choose_move(
        &self,
        board: &Board,
        rack: &Rack,
        is_first_move: bool,
        difficulty: Difficulty,
    ) -> Move {
        self.choose_move_with_cancel(board, rack, is_first_move, difficulty, &AtomicBool::new(false))
    }

    /// Like [`ComputerPlayer::choose_move`], stopping early once `cancel`
    /// is set. A cancelled search passes.
    pub fn choose_move_with_cancel(
        &self,
        board: &Board,
        rack: &Rack,
        is_first_move: bool,
        difficulty: Difficulty,
        cancel: &AtomicBool,
    ) -> Move {
        self.choose_move_with_rng(board, rack, is_first_move, difficulty, cancel, &mut rand::rng())
    }

    /// Move choice with an explicit random source.
    #[instrument(skip(self, board, rack, cancel, rng), fields(rack = %rack.as_string()))]
    pub fn choose_move_with_rng<R: Rng + ?Sized>(
        &self,
        board: &Board,
        rack: &Rack,
        is_first_move: bool,
        difficulty: Difficulty,
        cancel: &AtomicBool,
        rng: &mut R,
    ) -> Move {
        let search = panic::catch_unwind(AssertUnwindSafe(|| {
            self.candidates(board, rack, is_first_move, Some(cancel))
        }));
        let ranked = match search {
            Ok(ranked) => ranked,
            Err(_) => {
                warn!("move search panicked, passing");
                return Move::Pass;
            }
        };
        if cancel.load(Ordering::Relaxed) {
            debug!("search cancelled, passing");
            return Move::Pass;
        }

        match difficulty.select(&ranked, rng) {
            Some(pick) => {
                debug!(
                    found = ranked.len(),
                    words = ?pick.words,
                    points = pick.points,
                    "move chosen"
                );
                pick.clone().into_move()
            }
            None => {
                debug!("no playable word, passing");
                Move::Pass
            }
        }
    }

    /// Every legal placement found within the budget, highest score first.
    pub fn candidates(
        &self,
        board: &Board,
        rack: &Rack,
        is_first_move: bool,
        cancel: Option<&AtomicBool>,
    ) -> Vec<Candidate> {
        let started = Instant::now();
        let layout = PremiumLayout::standard();
        let profile = RackProfile::of(rack);
        let board_mask = if is_first_move { 0 } else { board_letter_mask(board) };

        let mut words = self.index.playable_through(&profile, board_mask);
        words.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| self.face_value(b).cmp(&self.face_value(a)))
        });
        words.truncate(self.config.max_candidates);

        let anchors = if is_first_move {
            vec![crate::game::CENTER]
        } else {
            anchors::anchors(board, layout, self.config.anchors_per_word)
        };

        let mut seen: HashSet<Vec<(Position, Tile)>> = HashSet::new();
        let mut found: Vec<Candidate> = Vec::new();
        let mut tried = 0usize;

        'words: for entry in words {
            if cancel.is_some_and(|c| c.load(Ordering::Relaxed)) || started.elapsed() >= self.config.time_budget {
                break 'words;
            }
            tried += 1;
            for &anchor in &anchors {
                for dir in Direction::all() {
                    for offset in 0..entry.len() {
                        let Some(mut tiles) = lay_word(board, rack, &entry.word, anchor, dir, offset) else {
                            continue;
                        };
                        tiles.sort_by_key(|(pos, _)| *pos);
                        if seen.contains(&tiles) {
                            continue;
                        }
                        if let Some(candidate) = self.evaluate(board, &tiles, is_first_move, layout) {
                            found.push(candidate);
                        }
                        seen.insert(tiles);
                    }
                }
            }
        }

        found.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.tiles.cmp(&b.tiles)));
        debug!(
            tried,
            legal = found.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "search finished"
        );
        found
    }

    /// Full legality, dictionary and scoring check for one placement.
    fn evaluate(
        &self,
        board: &Board,
        tiles: &[(Position, Tile)],
        is_first_move: bool,
        layout: &PremiumLayout,
    ) -> Option<Candidate> {
        let placement = Placement::new(tiles.to_vec()).ok()?;
        validate(board, &placement, is_first_move).ok()?;
        let words = formed_words(board, &placement);
        resolve(&self.dictionary, &words).ok()?;
        let breakdown = score(&placement, &words, self.language, layout);
        Some(Candidate {
            tiles: tiles.to_vec(),
            words: breakdown.words.into_iter().map(|(w, _)| w).collect(),
            points: breakdown.total,
        })
    }

    fn face_value(&self, entry: &IndexedWord) -> u32 {
        entry.word.chars().map(|c| self.language.value(c)).sum()
    }
}

/// Letters present anywhere on the board, as a 26-bit mask.
fn board_letter_mask(board: &Board) -> u32 {
    board
        .occupied()
        .filter(|(_, tile)| tile.letter.is_ascii_uppercase())
        .fold(0, |mask, (_, tile)| mask | 1 << (tile.letter as u8 - b'A'))
}

/// Lay `word` along `dir` so its `offset`th letter lands on `anchor`.
///
/// Board letters under the word must match it; the other squares are
/// filled from the rack, real letters before blanks. The squares just
/// before and after the word must be empty. Returns the new tiles, or
/// `None` when the word does not fit.
fn lay_word(
    board: &Board,
    rack: &Rack,
    word: &str,
    anchor: Position,
    dir: Direction,
    offset: usize,
) -> Option<Vec<(Position, Tile)>> {
    let start_idx = anchor.along(dir).checked_sub(offset)?;
    let end_idx = start_idx + word.len() - 1;
    if end_idx >= BOARD_SIZE {
        return None;
    }
    let start = anchor.with_along(dir, start_idx);
    let end = anchor.with_along(dir, end_idx);
    if start.prev(dir).is_some_and(|p| board.is_occupied(p))
        || end.next(dir).is_some_and(|p| board.is_occupied(p))
    {
        return None;
    }

    let mut available = rack.letters();
    let mut tiles = Vec::new();
    for (i, letter) in word.chars().enumerate() {
        let pos = anchor.with_along(dir, start_idx + i);
        if let Some(existing) = board.get(pos) {
            if existing.letter != letter {
                return None;
            }
            continue;
        }
        let tile = if let Some(at) = available.iter().position(|&c| c == letter) {
            available.swap_remove(at);
            Tile::letter(letter)
        } else if let Some(at) = available.iter().position(|&c| c == BLANK) {
            available.swap_remove(at);
            Tile::blank_as(letter)
        } else {
            return None;
        };
        tiles.push((pos, tile));
    }

    (!tiles.is_empty()).then_some(tiles)
}
