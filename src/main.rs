//! Lexigrid - computer players on a 15x15 word board
//!
//! Runs a self-play game either in the terminal or as plain log lines.

mod app;
mod cli;
mod tui;

use app::App;
use clap::Parser;
use cli::Cli;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use lexigrid::game::dictionary::Dictionary;
use lexigrid::game::state::GameState;
use lexigrid::search::{ComputerPlayer, SearchConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tui::Tui;

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.words)?;
    let dictionary = Arc::new(Dictionary::parse(&text));
    if dictionary.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no usable words in {}", cli.words.display()),
        ));
    }

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    let mut game = GameState::with_seed(cli.language, seed);
    for n in 1..=cli.players {
        game.add_player(&format!("cpu{}", n)).map_err(invalid_input)?;
    }
    game.start(None).map_err(invalid_input)?;

    let ai = ComputerPlayer::new(dictionary.clone(), cli.language, SearchConfig::default());
    let rng = StdRng::seed_from_u64(seed);
    let mut app = App::new(game, dictionary, ai, cli.difficulty, rng);

    if cli.headless {
        run_headless(&mut app, seed)
    } else {
        run_tui(&mut app, Duration::from_millis(cli.delay_ms))
    }
}

fn run_headless(app: &mut App, seed: u64) -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(seed, players = app.game().player_count(), difficulty = %app.difficulty(), "game started");
    while app.step() {}

    if let Some(completion) = app.game().completion() {
        println!("{}", app.game().board());
        for (player, score) in &completion.final_scores {
            println!("{:<6} {:>4}", player, score);
        }
        if completion.is_tie() {
            println!("Tie between {}", completion.tied.join(", "));
        } else {
            println!("{} wins", completion.winner);
        }
    }
    Ok(())
}

fn run_tui(app: &mut App, tick_rate: Duration) -> io::Result<()> {
    // Logging stays off while the alternate screen is up
    let mut terminal = Tui::new()?;
    terminal.enter()?;

    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| tui::render(frame, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => app.quit(),
                        KeyCode::Char(' ') => app.toggle_pause(),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if !app.paused {
                app.step();
            }
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    // Restore before the result is printed; drop covers the error paths
    terminal.exit()
}

fn invalid_input(err: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
}
