//! Anchor squares: the empty cells a new word has to cover.

use crate::game::board::{Board, Premium, PremiumLayout};
use crate::game::{Position, BOARD_SIZE, CENTER};

/// How far around an anchor premium squares still count toward its rank.
const PREMIUM_REACH: usize = 2;

fn premium_weight(premium: Premium) -> u32 {
    match premium {
        Premium::TripleWord => 6,
        Premium::DoubleWord => 4,
        Premium::TripleLetter => 3,
        Premium::DoubleLetter => 2,
        Premium::None => 0,
    }
}

/// Rank of an empty cell: touching more tiles is worth most, then open
/// premium squares on or near it.
pub fn anchor_rank(board: &Board, layout: &PremiumLayout, pos: Position) -> u32 {
    let contact = board.neighbor_count(pos) as u32 * 10;
    let own = premium_weight(layout.at(pos)) * 2;

    let row_lo = pos.row.saturating_sub(PREMIUM_REACH);
    let col_lo = pos.col.saturating_sub(PREMIUM_REACH);
    let row_hi = (pos.row + PREMIUM_REACH).min(BOARD_SIZE - 1);
    let col_hi = (pos.col + PREMIUM_REACH).min(BOARD_SIZE - 1);
    let mut nearby = 0;
    for row in row_lo..=row_hi {
        for col in col_lo..=col_hi {
            let p = Position::new(row, col);
            let distance = row.abs_diff(pos.row) + col.abs_diff(pos.col);
            if p != pos && distance <= PREMIUM_REACH && !board.is_occupied(p) {
                nearby += premium_weight(layout.at(p));
            }
        }
    }

    contact + own + nearby
}

/// The best `limit` anchors, highest rank first. An empty board has the
/// center as its only anchor.
pub fn anchors(board: &Board, layout: &PremiumLayout, limit: usize) -> Vec<Position> {
    if board.is_empty() {
        return vec![CENTER];
    }

    let mut ranked: Vec<(u32, Position)> = Vec::new();
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            if !board.is_occupied(pos) && board.has_neighbor(pos) {
                ranked.push((anchor_rank(board, layout, pos), pos));
            }
        }
    }
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    ranked.into_iter().take(limit).map(|(_, pos)| pos).collect()
}
