//! Rack-compatibility index over a dictionary.
//!
//! Every entry keeps a 26-bit letter mask and per-letter counts, so finding
//! the words a rack can make is a bit test followed by a short count check
//! instead of a pass over each word's letters.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::game::dictionary::Dictionary;
use crate::game::rack::Rack;
use crate::game::{BLANK, BOARD_SIZE};

fn letter_index(c: char) -> Option<usize> {
    c.is_ascii_uppercase().then(|| (c as u8 - b'A') as usize)
}

/// A dictionary word with its precomputed letter profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedWord {
    pub word: String,
    /// Bit `n` set when the word contains the `n`th letter of the alphabet.
    pub mask: u32,
    pub counts: [u8; 26],
}

impl IndexedWord {
    fn new(word: &str) -> Option<Self> {
        let mut mask = 0u32;
        let mut counts = [0u8; 26];
        for c in word.chars() {
            let i = letter_index(c)?;
            mask |= 1 << i;
            counts[i] = counts[i].saturating_add(1);
        }
        Some(Self {
            word: word.to_string(),
            mask,
            counts,
        })
    }

    pub fn len(&self) -> usize {
        self.word.len()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Letter profile of a rack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RackProfile {
    pub mask: u32,
    pub counts: [u8; 26],
    pub blanks: u8,
}

impl RackProfile {
    pub fn of(rack: &Rack) -> Self {
        Self::from_letters(&rack.letters())
    }

    pub fn from_letters(letters: &[char]) -> Self {
        let mut profile = Self::default();
        for &c in letters {
            if c == BLANK {
                profile.blanks += 1;
            } else if let Some(i) = letter_index(c.to_ascii_uppercase()) {
                profile.mask |= 1 << i;
                profile.counts[i] += 1;
            }
        }
        profile
    }
}

/// Words grouped by length and by letter set, each with a letter profile.
///
/// Anagrams and words that only repeat letters share a letter-set group, so
/// the bit test against a rack runs once per distinct set. Built once per
/// dictionary and shared by every search against it.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    /// Longest first, then alphabetical.
    entries: Vec<IndexedWord>,
    by_length: BTreeMap<usize, Vec<usize>>,
    by_mask: HashMap<u32, Vec<usize>>,
}

impl WordIndex {
    /// Index every dictionary word of 2 to 15 letters.
    pub fn build(dictionary: &Dictionary) -> Self {
        let mut words: Vec<&str> = dictionary
            .words()
            .filter(|w| (2..=BOARD_SIZE).contains(&w.len()))
            .collect();
        // Longest first, then alphabetical, so ties never depend on hashing
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut index = Self::default();
        for word in words {
            let Some(entry) = IndexedWord::new(word) else {
                continue;
            };
            let id = index.entries.len();
            index.by_length.entry(entry.len()).or_default().push(id);
            index.by_mask.entry(entry.mask).or_default().push(id);
            index.entries.push(entry);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn of_length(&self, len: usize) -> impl Iterator<Item = &IndexedWord> {
        let entries = &self.entries;
        self.by_length
            .get(&len)
            .into_iter()
            .flatten()
            .map(move |&id| &entries[id])
    }

    /// Number of distinct letter sets.
    pub fn group_count(&self) -> usize {
        self.by_mask.len()
    }

    /// Words the rack can spell on its own, blanks covering any shortfall.
    /// Longest words come first.
    pub fn playable(&self, rack: &RackProfile) -> Vec<&IndexedWord> {
        self.playable_through(rack, 0)
    }

    /// Like [`WordIndex::playable`], but a word may also borrow one letter
    /// from `board_mask` (letters already on the board it could run through).
    pub fn playable_through(&self, rack: &RackProfile, board_mask: u32) -> Vec<&IndexedWord> {
        let max_len = usize::from(rack.counts.iter().sum::<u8>() + rack.blanks)
            + usize::from(board_mask != 0);
        if max_len < 2 {
            return Vec::new();
        }

        let reachable: HashSet<u32> = self
            .by_mask
            .keys()
            .copied()
            .filter(|&mask| letters_within_reach(mask, rack, board_mask))
            .collect();
        if reachable.is_empty() {
            return Vec::new();
        }

        let entries = &self.entries;
        self.by_length
            .range(2..=max_len)
            .rev()
            .flat_map(|(_, ids)| ids.iter().map(move |&id| &entries[id]))
            .filter(|entry| reachable.contains(&entry.mask) && counts_fit(entry, rack, board_mask))
            .collect()
    }
}

/// Phase one, per letter set: no more distinct letters missing than
/// blanks plus one borrowed board letter can cover.
fn letters_within_reach(mask: u32, rack: &RackProfile, board_mask: u32) -> bool {
    let borrow = u32::from(board_mask != 0);
    (mask & !rack.mask).count_ones() <= u32::from(rack.blanks) + borrow
}

/// Phase two, per word: exact counts, the borrowed letter only when the
/// board actually shows one of the missing letters.
fn counts_fit(entry: &IndexedWord, rack: &RackProfile, board_mask: u32) -> bool {
    let borrow = u32::from(board_mask != 0);
    let blanks = u32::from(rack.blanks);

    let mut shortfall = 0u32;
    let mut borrowable = false;
    for (i, (&need, &have)) in entry.counts.iter().zip(&rack.counts).enumerate() {
        if need > have {
            shortfall += u32::from(need - have);
            if board_mask & (1 << i) != 0 {
                borrowable = true;
            }
        }
    }
    shortfall <= blanks || (borrowable && shortfall <= blanks + borrow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> WordIndex {
        WordIndex::build(&Dictionary::from_words([
            "CAT", "CATS", "ACT", "TACT", "AT", "DOG", "A", "ZYZZYVAS",
        ]))
    }

    fn words(found: Vec<&IndexedWord>) -> Vec<&str> {
        found.into_iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn test_profile_bits() {
        let entry = IndexedWord::new("TACT").unwrap();
        assert_eq!(entry.mask, (1 << 0) | (1 << 2) | (1 << 19));
        assert_eq!(entry.counts[19], 2);
        assert!(IndexedWord::new("NO-GO").is_none());
    }

    #[test]
    fn test_single_letters_not_indexed() {
        let idx = index();
        assert_eq!(idx.len(), 7);
        assert_eq!(idx.of_length(1).count(), 0);
        assert_eq!(idx.of_length(4).map(|e| e.word.as_str()).collect::<Vec<_>>(), ["CATS", "TACT"]);
        let rack = RackProfile::from_letters(&['A']);
        assert!(idx.playable(&rack).is_empty());
    }

    #[test]
    fn test_anagrams_share_a_group() {
        // {A,C,T} holds CAT, ACT and TACT; then CATS, AT, DOG, ZYZZYVAS
        let idx = index();
        assert_eq!(idx.group_count(), 5);
    }

    #[test]
    fn test_playable_order_across_groups() {
        let idx = index();
        let rack = RackProfile::from_letters(&['T', 'A', 'C', 'S', 'T']);
        assert_eq!(words(idx.playable(&rack)), ["CATS", "TACT", "ACT", "CAT", "AT"]);
    }

    #[test]
    fn test_playable_exact_letters() {
        let idx = index();
        let rack = RackProfile::from_letters(&['C', 'A', 'T', 'Q']);
        assert_eq!(words(idx.playable(&rack)), ["ACT", "CAT", "AT"]);
    }

    #[test]
    fn test_counts_matter() {
        // One T cannot make TACT without a blank
        let idx = index();
        let rack = RackProfile::from_letters(&['T', 'A', 'C', 'E']);
        assert!(!words(idx.playable(&rack)).contains(&"TACT"));

        let rack = RackProfile::from_letters(&['T', 'A', 'C', '?']);
        assert!(words(idx.playable(&rack)).contains(&"TACT"));
    }

    #[test]
    fn test_blanks_cover_missing_letters() {
        let idx = index();
        let rack = RackProfile::from_letters(&['C', 'A', '?']);
        let found = words(idx.playable(&rack));
        assert!(found.contains(&"CAT"));
        assert!(found.contains(&"ACT"));
        assert!(!found.contains(&"CATS"));
    }

    #[test]
    fn test_board_letter_borrowed_once() {
        let idx = index();
        let rack = RackProfile::from_letters(&['C', 'A', 'T']);
        let s = 1 << 18;
        let found = words(idx.playable_through(&rack, s));
        assert!(found.contains(&"CATS"));
        // The borrowed letter must actually be on the board
        assert!(!found.contains(&"TACT"));
    }
}
