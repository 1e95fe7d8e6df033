//! UI rendering using ratatui
//!
//! One screen: the board on the left, scores, racks and the move feed on
//! the right, and the final result once the game is over.

use crate::app::{App, FeedEntry};
use lexigrid::game::board::{Board, Premium, PremiumLayout};
use lexigrid::game::state::Completion;
use lexigrid::game::{Position, BOARD_SIZE};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Board cells are three columns wide.
const CELL_WIDTH: u16 = 3;

/// Render the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board and side panels
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], app);

    let board_width = BOARD_SIZE as u16 * CELL_WIDTH + 2;
    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width), // Board
            Constraint::Min(30),             // Side panels
        ])
        .split(layout[1]);

    render_board(frame, content[0], app.game().board());

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(app.game().player_count() as u16 + 2), // Scoreboard
            Constraint::Min(6),                                      // Feed or result
        ])
        .split(content[1]);

    render_scoreboard(frame, side[0], app);
    match app.game().completion() {
        Some(completion) => render_result(frame, side[1], completion),
        None => render_feed(frame, side[1], app.feed.iter()),
    }

    let footer_text = if app.paused {
        "PAUSED  Space Resume  Esc Quit"
    } else {
        "Space Pause  Esc Quit"
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

/// Header: title, turn, bag
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Title
            Constraint::Min(20),    // Turn
            Constraint::Length(14), // Bag
        ])
        .split(inner);

    let title = Paragraph::new("LEXIGRID")
        .style(Style::default().fg(Color::Yellow).bold())
        .alignment(Alignment::Left);
    frame.render_widget(title, header_layout[0]);

    let game = app.game();
    let turn_text = match game.current_player() {
        Some(player) => format!("Turn {}: {} ({})", game.turn_number(), player, app.difficulty()),
        None => "Game over".to_string(),
    };
    let turn = Paragraph::new(turn_text)
        .style(Style::default().fg(Color::Cyan).bold())
        .alignment(Alignment::Center);
    frame.render_widget(turn, header_layout[1]);

    let bag = Paragraph::new(format!("Bag: {}", game.bag_remaining()))
        .style(Style::default().fg(bag_color(game.bag_remaining())))
        .alignment(Alignment::Right);
    frame.render_widget(bag, header_layout[2]);
}

/// The 15x15 grid, premium squares shown where no tile lies yet
fn render_board(frame: &mut Frame, area: Rect, board: &Board) {
    let layout = PremiumLayout::standard();
    let lines: Vec<Line> = (0..BOARD_SIZE)
        .map(|row| {
            let spans: Vec<Span> = (0..BOARD_SIZE)
                .map(|col| {
                    let pos = Position::new(row, col);
                    match board.get(pos) {
                        Some(tile) => {
                            let color = if tile.is_blank { Color::Magenta } else { Color::White };
                            Span::styled(format!(" {} ", tile), Style::default().fg(color).bold())
                        }
                        None => {
                            let premium = layout.at(pos);
                            Span::styled(
                                format!("{:^3}", premium.label()),
                                Style::default().fg(premium_color(premium)),
                            )
                        }
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let grid = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Board"),
    );
    frame.render_widget(grid, area);
}

/// Scores and racks, player on turn highlighted
fn render_scoreboard(frame: &mut Frame, area: Rect, app: &App) {
    let game = app.game();
    let items: Vec<ListItem> = game
        .players()
        .map(|player| {
            let on_turn = game.current_player() == Some(player);
            let style = if on_turn {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if on_turn { "> " } else { "  " };
            let score = game.score(player).unwrap_or(0);
            let rack = game.rack(player).map(format_rack).unwrap_or_default();
            ListItem::new(format!("{}{:<6} {:>4}  {}", prefix, player, score, rack)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Scoreboard"),
    );
    frame.render_widget(list, area);
}

/// Recent moves, newest first
fn render_feed<'a>(frame: &mut Frame, area: Rect, feed: impl DoubleEndedIterator<Item = &'a FeedEntry>) {
    let items: Vec<ListItem> = feed
        .rev()
        .map(|entry| {
            let style = if !entry.accepted {
                Style::default().fg(Color::Red)
            } else if entry.points > 0 {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(format_feed_entry(entry)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Moves"),
    );
    frame.render_widget(list, area);
}

/// Final standings
fn render_result(frame: &mut Frame, area: Rect, completion: &Completion) {
    let mut lines = vec![
        Line::from(Span::styled(
            format_winner(completion),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(""),
    ];
    let mut standings: Vec<(&String, &i32)> = completion.final_scores.iter().collect();
    standings.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (player, score) in standings {
        let penalty = completion.penalties.get(player).copied().unwrap_or(0);
        lines.push(Line::from(format!("{:<6} {:>4}  (-{})", player, score, penalty)));
    }

    let result = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title("Result"),
    );
    frame.render_widget(result, area);
}

fn format_rack(rack: &lexigrid::game::rack::Rack) -> String {
    rack.letters()
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_feed_entry(entry: &FeedEntry) -> String {
    if entry.points > 0 {
        format!("{:>3} {}: {} +{}", entry.turn, entry.player, entry.text, entry.points)
    } else {
        format!("{:>3} {}: {}", entry.turn, entry.player, entry.text)
    }
}

fn format_winner(completion: &Completion) -> String {
    if completion.is_tie() {
        format!("Tie between {}", completion.tied.join(", "))
    } else {
        format!("{} wins", completion.winner)
    }
}

fn premium_color(premium: Premium) -> Color {
    match premium {
        Premium::TripleWord => Color::Red,
        Premium::DoubleWord => Color::LightMagenta,
        Premium::TripleLetter => Color::Blue,
        Premium::DoubleLetter => Color::LightCyan,
        Premium::None => Color::DarkGray,
    }
}

fn bag_color(remaining: usize) -> Color {
    if remaining == 0 {
        Color::Red
    } else if remaining < 7 {
        Color::Yellow
    } else {
        Color::Green
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexigrid::game::rack::Rack;
    use lexigrid::game::state::EndReason;
    use std::collections::BTreeMap;

    #[test]
    fn test_format_rack() {
        assert_eq!(format_rack(&Rack::from_letters("AB?")), "A B ?");
    }

    #[test]
    fn test_format_feed_entry() {
        let entry = FeedEntry {
            turn: 4,
            player: "cpu1".to_string(),
            text: "CAT".to_string(),
            points: 5,
            accepted: true,
        };
        assert_eq!(format_feed_entry(&entry), "  4 cpu1: CAT +5");
    }

    #[test]
    fn test_format_winner() {
        let mut completion = Completion {
            reason: EndReason::AllPassed,
            final_scores: BTreeMap::new(),
            penalties: BTreeMap::new(),
            went_out: None,
            winner: "cpu1".to_string(),
            tied: vec!["cpu1".to_string()],
        };
        assert_eq!(format_winner(&completion), "cpu1 wins");
        completion.tied.push("cpu2".to_string());
        assert_eq!(format_winner(&completion), "Tie between cpu1, cpu2");
    }

    #[test]
    fn test_bag_color() {
        assert_eq!(bag_color(0), Color::Red);
        assert_eq!(bag_color(3), Color::Yellow);
        assert_eq!(bag_color(50), Color::Green);
    }
}
