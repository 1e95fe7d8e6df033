//! Per-language tile tables: how many of each tile and what each is worth.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::BLANK;

/// (letter, count in bag, point value). Blanks use [`BLANK`].
type TileSpec = (char, u32, u32);

/// Standard English distribution, 100 tiles.
const ENGLISH: [TileSpec; 27] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
    (BLANK, 2, 0),
];

/// Standard French distribution, 102 tiles.
const FRENCH: [TileSpec; 27] = [
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 3, 2),
    ('E', 15, 1),
    ('F', 2, 4),
    ('G', 2, 2),
    ('H', 2, 4),
    ('I', 8, 1),
    ('J', 1, 8),
    ('K', 1, 10),
    ('L', 5, 1),
    ('M', 3, 2),
    ('N', 6, 1),
    ('O', 6, 1),
    ('P', 2, 3),
    ('Q', 1, 8),
    ('R', 6, 1),
    ('S', 6, 1),
    ('T', 6, 1),
    ('U', 6, 1),
    ('V', 2, 4),
    ('W', 1, 10),
    ('X', 1, 10),
    ('Y', 1, 10),
    ('Z', 1, 10),
    (BLANK, 2, 0),
];

/// A tile set. Each language fixes both the bag contents and letter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    French,
}

impl Language {
    fn table(&self) -> &'static [TileSpec; 27] {
        match self {
            Language::English => &ENGLISH,
            Language::French => &FRENCH,
        }
    }

    /// Point value of a letter. Blanks and unknown characters are worth 0.
    pub fn value(&self, letter: char) -> u32 {
        let letter = letter.to_ascii_uppercase();
        self.table()
            .iter()
            .find(|(c, _, _)| *c == letter)
            .map(|(_, _, value)| *value)
            .unwrap_or(0)
    }

    /// How many copies of `letter` a full bag holds.
    pub fn count(&self, letter: char) -> u32 {
        self.table()
            .iter()
            .find(|(c, _, _)| *c == letter)
            .map(|(_, count, _)| *count)
            .unwrap_or(0)
    }

    /// `(letter, count)` for every tile kind, blanks last.
    pub fn distribution(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.table().iter().map(|(c, count, _)| (*c, *count))
    }

    /// Total number of tiles in a full set.
    pub fn tile_total(&self) -> usize {
        self.table().iter().map(|(_, count, _)| *count as usize).sum()
    }

    pub fn all() -> [Language; 2] {
        [Language::English, Language::French]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "english"),
            Language::French => write!(f, "french"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "french" | "fr" => Ok(Language::French),
            other => Err(format!("unknown language: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_totals() {
        assert_eq!(Language::English.tile_total(), 100);
        assert_eq!(Language::French.tile_total(), 102);
    }

    #[test]
    fn test_every_letter_present() {
        for language in Language::all() {
            for c in 'A'..='Z' {
                assert!(language.count(c) >= 1, "{} missing {}", language, c);
                assert!(language.value(c) >= 1, "{} has no value for {}", language, c);
            }
            assert_eq!(language.count(BLANK), 2);
        }
    }

    #[test]
    fn test_values() {
        assert_eq!(Language::English.value('Q'), 10);
        assert_eq!(Language::English.value('k'), 5);
        assert_eq!(Language::French.value('K'), 10);
        assert_eq!(Language::English.value(BLANK), 0);
        assert_eq!(Language::English.value('1'), 0);
    }

    #[test]
    fn test_parse_language() {
        assert_eq!("English".parse::<Language>(), Ok(Language::English));
        assert_eq!("fr".parse::<Language>(), Ok(Language::French));
        assert!("klingon".parse::<Language>().is_err());
    }
}
