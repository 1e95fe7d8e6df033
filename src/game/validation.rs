//! Placement legality checks
//!
//! Validates a proposed placement against:
//! - Board bounds
//! - Single row/column alignment
//! - Occupied squares
//! - Gaps along the word
//! - The first-move center rule
//! - Connection to tiles already on the board

use std::collections::HashSet;

use super::board::Board;
use super::{Direction, Placement, Position, CENTER};
use crate::error::ValidationError;

/// Validate a placement against the board.
///
/// Checks in order, failing on the first violation:
/// 1. At least one tile
/// 2. Every tile on the board
/// 3. All tiles on one row or column
/// 4. No tile on an occupied square (or two tiles on one square)
/// 5. No empty square between the first and last tile
/// 6. First move covers the center
/// 7. Later moves touch or run through existing tiles
///
/// Returns the axis the placement lies on.
pub fn validate(
    board: &Board,
    placement: &Placement,
    is_first_move: bool,
) -> Result<Direction, ValidationError> {
    if placement.is_empty() {
        return Err(ValidationError::Empty);
    }

    if let Some(pos) = placement.positions().find(|p| !p.in_bounds()) {
        return Err(ValidationError::OutOfBounds(pos));
    }

    let dir = placement_axis(board, placement)?;

    let mut seen = HashSet::new();
    for pos in placement.positions() {
        if board.is_occupied(pos) || !seen.insert(pos) {
            return Err(ValidationError::Overlap(pos));
        }
    }

    let (start, end) = span(placement, dir);
    let mut touches_existing = false;
    for idx in start.along(dir)..=end.along(dir) {
        let pos = start.with_along(dir, idx);
        if board.is_occupied(pos) {
            touches_existing = true;
        } else if placement.tile_at(pos).is_none() {
            return Err(ValidationError::Gap(pos));
        }
    }

    if is_first_move {
        if placement.tile_at(CENTER).is_none() {
            return Err(ValidationError::MissingCenter);
        }
        return Ok(dir);
    }

    // Existing tiles inside the run count as a connection: they can bridge
    // two groups of new tiles.
    let connected = touches_existing || placement.positions().any(|p| board.has_neighbor(p));
    if !connected {
        return Err(ValidationError::NotConnected);
    }

    Ok(dir)
}

/// The axis of a placement. A single tile takes the axis along which it
/// touches existing tiles, horizontal when it touches none or both.
pub(crate) fn placement_axis(board: &Board, placement: &Placement) -> Result<Direction, ValidationError> {
    let tiles = placement.tiles();
    let first = tiles[0].position;

    if tiles.len() == 1 {
        let touches = |dir: Direction| {
            first.prev(dir).is_some_and(|p| board.is_occupied(p))
                || first.next(dir).is_some_and(|p| board.is_occupied(p))
        };
        if !touches(Direction::Horizontal) && touches(Direction::Vertical) {
            return Ok(Direction::Vertical);
        }
        return Ok(Direction::Horizontal);
    }

    if tiles.iter().all(|t| t.position.row == first.row) {
        Ok(Direction::Horizontal)
    } else if tiles.iter().all(|t| t.position.col == first.col) {
        Ok(Direction::Vertical)
    } else {
        Err(ValidationError::MultiLine)
    }
}

/// First and last placed position along `dir`.
fn span(placement: &Placement, dir: Direction) -> (Position, Position) {
    let mut positions: Vec<Position> = placement.positions().collect();
    positions.sort_by_key(|p| p.along(dir));
    let start = positions[0];
    let end = positions[positions.len() - 1];
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Tile;

    fn placement(tiles: &[(usize, usize, char)]) -> Placement {
        Placement::new(
            tiles
                .iter()
                .map(|&(r, c, l)| (Position::new(r, c), Tile::letter(l)))
                .collect(),
        )
        .unwrap()
    }

    fn rad_board() -> Board {
        let mut board = Board::new();
        board.write_word(Position::new(7, 6), Direction::Horizontal, "RAD");
        board
    }

    #[test]
    fn test_first_move_through_center() {
        let board = Board::new();
        let cat = placement(&[(7, 7, 'C'), (7, 8, 'A'), (7, 9, 'T')]);
        assert_eq!(validate(&board, &cat, true), Ok(Direction::Horizontal));
    }

    #[test]
    fn test_first_move_missing_center() {
        let board = Board::new();
        let cat = placement(&[(3, 3, 'C'), (3, 4, 'A'), (3, 5, 'T')]);
        assert_eq!(validate(&board, &cat, true), Err(ValidationError::MissingCenter));
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::new();
        let p = placement(&[(7, 14, 'A'), (7, 15, 'T')]);
        assert_eq!(
            validate(&board, &p, true),
            Err(ValidationError::OutOfBounds(Position::new(7, 15)))
        );
    }

    #[test]
    fn test_multi_line() {
        let board = Board::new();
        let p = placement(&[(7, 7, 'A'), (8, 8, 'T')]);
        assert_eq!(validate(&board, &p, true), Err(ValidationError::MultiLine));
    }

    #[test]
    fn test_overlap_existing_and_duplicate() {
        let board = rad_board();
        let p = placement(&[(7, 7, 'E')]);
        assert_eq!(
            validate(&board, &p, false),
            Err(ValidationError::Overlap(Position::new(7, 7)))
        );

        let empty = Board::new();
        let dup = placement(&[(7, 7, 'A'), (7, 7, 'B')]);
        assert_eq!(
            validate(&empty, &dup, true),
            Err(ValidationError::Overlap(Position::new(7, 7)))
        );
    }

    #[test]
    fn test_gap() {
        let board = Board::new();
        let p = placement(&[(7, 7, 'C'), (7, 9, 'T')]);
        assert_eq!(
            validate(&board, &p, true),
            Err(ValidationError::Gap(Position::new(7, 8)))
        );
    }

    #[test]
    fn test_gap_filled_by_existing_tile_connects() {
        // G above and R below the A of RAD form GAR through the board's A
        let board = rad_board();
        let p = placement(&[(6, 7, 'G'), (8, 7, 'R')]);
        assert_eq!(validate(&board, &p, false), Ok(Direction::Vertical));
    }

    #[test]
    fn test_adjacent_tile_connects() {
        let board = rad_board();
        let p = placement(&[(8, 8, 'O'), (8, 9, 'N')]);
        assert_eq!(validate(&board, &p, false), Ok(Direction::Horizontal));
    }

    #[test]
    fn test_not_connected() {
        let board = rad_board();
        let p = placement(&[(2, 2, 'O'), (2, 3, 'N')]);
        assert_eq!(validate(&board, &p, false), Err(ValidationError::NotConnected));
    }

    #[test]
    fn test_single_tile_axis_follows_neighbours() {
        let board = rad_board();
        let below = placement(&[(8, 7, 'S')]);
        assert_eq!(validate(&board, &below, false), Ok(Direction::Vertical));
        let after = placement(&[(7, 9, 'S')]);
        assert_eq!(validate(&board, &after, false), Ok(Direction::Horizontal));
    }

    #[test]
    fn test_validation_order() {
        // Out of bounds wins over multi-line
        let board = Board::new();
        let p = placement(&[(0, 0, 'A'), (20, 3, 'B')]);
        assert!(matches!(
            validate(&board, &p, true),
            Err(ValidationError::OutOfBounds(_))
        ));
    }
}
