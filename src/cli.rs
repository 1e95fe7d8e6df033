//! Command-line interface for the lexigrid viewer.

use clap::Parser;
use std::path::PathBuf;

use lexigrid::game::letters::Language;
use lexigrid::search::Difficulty;

/// Lexigrid - watch computer players fight it out on a word board
#[derive(Parser, Debug)]
#[command(name = "lexigrid")]
#[command(about = "Self-play viewer for the lexigrid rules engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Word list, one word per line
    #[arg(short, long)]
    pub words: PathBuf,

    /// Number of computer players
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u8).range(2..=4))]
    pub players: u8,

    /// easy, medium or hard
    #[arg(short, long, default_value = "medium")]
    pub difficulty: Difficulty,

    /// Tile set: english or french
    #[arg(short, long, default_value = "english")]
    pub language: Language,

    /// Seed for the bag and move choice, for replayable games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause between moves in the terminal view
    #[arg(long, default_value = "600")]
    pub delay_ms: u64,

    /// Print the game as log lines instead of drawing the board
    #[arg(long)]
    pub headless: bool,
}
