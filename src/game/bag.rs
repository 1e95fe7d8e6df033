//! The shared letter supply ("bag") for one game.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use super::letters::Language;
use super::Tile;

fn fresh_rng() -> StdRng {
    StdRng::from_rng(&mut rand::rng())
}

/// Undrawn tiles for one game, kept in shuffled order.
///
/// Drawing never fails: an exhausted bag simply hands out fewer tiles.
/// The RNG is not part of the saved state; a restored bag gets a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterSupply {
    language: Language,
    tiles: Vec<Tile>,
    #[serde(skip, default = "fresh_rng")]
    rng: StdRng,
}

impl LetterSupply {
    /// A full, shuffled bag for `language`.
    pub fn new(language: Language) -> Self {
        Self::with_rng(language, fresh_rng())
    }

    /// A full bag shuffled from a fixed seed (for testing/replays).
    pub fn with_seed(language: Language, seed: u64) -> Self {
        Self::with_rng(language, StdRng::seed_from_u64(seed))
    }

    fn with_rng(language: Language, rng: StdRng) -> Self {
        let mut tiles = Vec::with_capacity(language.tile_total());
        for (letter, count) in language.distribution() {
            for _ in 0..count {
                tiles.push(Tile::from_rack_char(letter));
            }
        }
        let mut supply = Self { language, tiles, rng };
        supply.shuffle();
        supply
    }

    /// A bag holding exactly `tiles`, in the given order (draws come off the end).
    pub fn from_tiles(language: Language, tiles: Vec<Tile>) -> Self {
        Self {
            language,
            tiles,
            rng: fresh_rng(),
        }
    }

    /// Draw up to `n` tiles. Returns fewer if the bag runs out.
    pub fn draw(&mut self, n: usize) -> Vec<Tile> {
        let keep = self.tiles.len().saturating_sub(n);
        let mut drawn = self.tiles.split_off(keep);
        drawn.reverse();
        drawn
    }

    /// Return tiles to the bag and reshuffle.
    ///
    /// Placed blanks go back as unassigned blanks.
    pub fn put_back(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles.into_iter().map(|t| {
            if t.is_blank {
                Tile::blank()
            } else {
                t
            }
        }));
        self.shuffle();
    }

    fn shuffle(&mut self) {
        self.tiles.shuffle(&mut self.rng);
    }

    /// Number of tiles left.
    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The undrawn tiles, in draw order reversed.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

impl PartialEq for LetterSupply {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language && self.tiles == other.tiles
    }
}

impl Eq for LetterSupply {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BLANK;

    #[test]
    fn test_full_bag_matches_distribution() {
        let bag = LetterSupply::new(Language::English);
        assert_eq!(bag.remaining(), 100);
        let e_count = bag.tiles().iter().filter(|t| t.letter == 'E').count();
        assert_eq!(e_count, 12);
        let blanks = bag.tiles().iter().filter(|t| t.is_blank).count();
        assert_eq!(blanks, 2);
        assert!(bag.tiles().iter().filter(|t| t.is_blank).all(|t| t.letter == BLANK));
    }

    #[test]
    fn test_draw_short_bag_returns_fewer() {
        let mut bag = LetterSupply::from_tiles(
            Language::English,
            vec![Tile::letter('A'), Tile::letter('B')],
        );
        let drawn = bag.draw(7);
        assert_eq!(drawn.len(), 2);
        assert!(bag.is_empty());
        assert!(bag.draw(3).is_empty());
    }

    #[test]
    fn test_draw_takes_from_end() {
        let mut bag = LetterSupply::from_tiles(
            Language::English,
            vec![Tile::letter('A'), Tile::letter('B'), Tile::letter('C')],
        );
        assert_eq!(bag.draw(2), vec![Tile::letter('C'), Tile::letter('B')]);
        assert_eq!(bag.remaining(), 1);
    }

    #[test]
    fn test_put_back_resets_blanks() {
        let mut bag = LetterSupply::from_tiles(Language::English, vec![]);
        bag.put_back([Tile::blank_as('Q'), Tile::letter('Z')]);
        assert_eq!(bag.remaining(), 2);
        assert!(bag.tiles().contains(&Tile::blank()));
        assert!(bag.tiles().contains(&Tile::letter('Z')));
    }

    #[test]
    fn test_seeded_bags_are_deterministic() {
        let mut a = LetterSupply::with_seed(Language::French, 42);
        let mut b = LetterSupply::with_seed(Language::French, 42);
        assert_eq!(a.draw(7), b.draw(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_conservation_across_draw_and_return() {
        let mut bag = LetterSupply::with_seed(Language::English, 7);
        let hand = bag.draw(7);
        assert_eq!(bag.remaining() + hand.len(), 100);
        bag.put_back(hand);
        assert_eq!(bag.remaining(), 100);
    }
}
