//! Self-play session state

use std::collections::VecDeque;
use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{info, warn};

use lexigrid::game::dictionary::Dictionary;
use lexigrid::game::moves::Move;
use lexigrid::game::state::{GameState, Phase};
use lexigrid::search::{ComputerPlayer, Difficulty};

/// How many moves the feed keeps.
const FEED_MAX: usize = 12;

/// One line of the move feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    pub turn: u32,
    pub player: String,
    pub text: String,
    pub points: u32,
    pub accepted: bool,
}

/// A game between computer players, advanced one move per step.
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Stop stepping but keep drawing
    pub paused: bool,
    game: GameState,
    dictionary: Arc<Dictionary>,
    ai: ComputerPlayer,
    difficulty: Difficulty,
    rng: StdRng,
    /// Recent moves, newest last
    pub feed: VecDeque<FeedEntry>,
}

impl App {
    /// Wrap a started game.
    pub fn new(
        game: GameState,
        dictionary: Arc<Dictionary>,
        ai: ComputerPlayer,
        difficulty: Difficulty,
        rng: StdRng,
    ) -> Self {
        Self {
            should_quit: false,
            paused: false,
            game,
            dictionary,
            ai,
            difficulty,
            rng,
            feed: VecDeque::new(),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_over(&self) -> bool {
        self.game.phase() == Phase::Completed
    }

    /// Let the player on turn search and submit a move.
    /// Returns false once there is nothing left to play.
    pub fn step(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        let Some(player) = self.game.current_player().map(str::to_string) else {
            return false;
        };
        let Some(rack) = self.game.rack(&player).cloned() else {
            return false;
        };

        let turn = self.game.turn_number();
        let mv = self.ai.choose_move_with_rng(
            self.game.board(),
            &rack,
            self.game.is_first_move(),
            self.difficulty,
            &std::sync::atomic::AtomicBool::new(false),
            &mut self.rng,
        );
        let summary = describe(&mv);
        let mut outcome = self.game.submit(&player, mv, &self.dictionary);
        if !outcome.accepted {
            // Search runs the same checks as submit, so this is a bug
            warn!(player = %player, reason = %outcome.message, "computer move rejected, passing");
            outcome = self.game.submit(&player, Move::Pass, &self.dictionary);
        }

        let text = if outcome.words.is_empty() {
            summary
        } else {
            outcome.words.join(", ")
        };
        info!(turn, player = %player, move_ = %text, points = outcome.points, "turn played");
        self.push_feed(FeedEntry {
            turn,
            player,
            text,
            points: outcome.points,
            accepted: outcome.accepted,
        });

        !self.is_over()
    }

    fn push_feed(&mut self, entry: FeedEntry) {
        if self.feed.len() >= FEED_MAX {
            self.feed.pop_front();
        }
        self.feed.push_back(entry);
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

fn describe(mv: &Move) -> String {
    match mv {
        Move::Place { tiles } => format!("{} tiles", tiles.len()),
        Move::Exchange { letters } => format!("exchange {}", letters.len()),
        Move::Pass => "pass".to_string(),
    }
}
