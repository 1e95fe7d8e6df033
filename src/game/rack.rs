//! A player's rack of up to seven tiles.

use serde::{Deserialize, Serialize};

use super::bag::LetterSupply;
use super::letters::Language;
use super::{Tile, BLANK, RACK_SIZE};

/// Tiles in a player's hand. Blanks are held unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a rack from its letter notation, e.g. `"AEIOU??"`.
    pub fn from_letters(letters: &str) -> Self {
        Self {
            tiles: letters.chars().map(Tile::from_rack_char).collect(),
        }
    }

    /// Top the rack up to seven tiles from the bag (fewer if the bag is short).
    pub fn refill(&mut self, supply: &mut LetterSupply) -> usize {
        let wanted = RACK_SIZE.saturating_sub(self.tiles.len());
        let drawn = supply.draw(wanted);
        let count = drawn.len();
        self.tiles.extend(drawn);
        count
    }

    /// Letters the rack cannot supply for `needed`, deduplicated.
    ///
    /// A blank in `needed` consumes one of the rack's blanks, whatever
    /// letter it shows. `None` means the rack covers everything.
    pub fn missing_for(&self, needed: &[Tile]) -> Option<Vec<char>> {
        let mut available: Vec<char> = self.letters();
        let mut missing: Vec<char> = Vec::new();

        for tile in needed {
            let c = tile.rack_char();
            if let Some(pos) = available.iter().position(|&r| r == c) {
                available.swap_remove(pos);
            } else {
                missing.push(c);
            }
        }

        if missing.is_empty() {
            None
        } else {
            // Deduplicate missing letters while preserving order
            let mut seen = std::collections::HashSet::new();
            missing.retain(|c| seen.insert(*c));
            Some(missing)
        }
    }

    /// Remove the rack tiles used by a placement. Caller checks availability first.
    pub fn remove_placed(&mut self, placed: &[Tile]) {
        for tile in placed {
            let c = tile.rack_char();
            if let Some(pos) = self.tiles.iter().position(|t| t.rack_char() == c) {
                self.tiles.swap_remove(pos);
            }
        }
    }

    /// Take out the named letters (`?` for a blank), e.g. for an exchange.
    ///
    /// Either every letter is removed or, if any is missing, nothing is.
    pub fn take_letters(&mut self, letters: &[char]) -> Result<Vec<Tile>, Vec<char>> {
        let wanted: Vec<Tile> = letters.iter().map(|&c| Tile::from_rack_char(c)).collect();
        if let Some(missing) = self.missing_for(&wanted) {
            return Err(missing);
        }
        self.remove_placed(&wanted);
        Ok(wanted)
    }

    /// Sum of the point values still on the rack.
    pub fn penalty(&self, language: Language) -> u32 {
        self.tiles
            .iter()
            .filter(|t| !t.is_blank)
            .map(|t| language.value(t.letter))
            .sum()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Rack notation for each tile (`?` for blanks).
    pub fn letters(&self) -> Vec<char> {
        self.tiles.iter().map(Tile::rack_char).collect()
    }

    pub fn blank_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_blank).count()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Display the rack as a string.
    pub fn as_string(&self) -> String {
        self.letters().into_iter().collect()
    }

    pub fn contains_blank(&self) -> bool {
        self.letters().contains(&BLANK)
    }
}
