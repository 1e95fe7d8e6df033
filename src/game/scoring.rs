//! Move scoring.

use serde::{Deserialize, Serialize};

use super::board::PremiumLayout;
use super::letters::Language;
use super::words::FormedWord;
use super::{Placement, BINGO_BONUS, RACK_SIZE};

/// Points for one move, word by word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Each formed word with its points, in formation order.
    pub words: Vec<(String, u32)>,
    /// Whether the full-rack bonus applied.
    pub bingo: bool,
    pub total: u32,
}

/// Score a single formed word.
///
/// Letter premiums multiply the letter; word premiums multiply the whole
/// word. Premiums only count under tiles placed this move, and blanks are
/// worth nothing wherever they land.
pub fn score_word(word: &FormedWord, language: Language, layout: &PremiumLayout) -> u32 {
    let mut sum = 0;
    let mut word_multiplier = 1;
    for cell in &word.cells {
        let base = if cell.tile.is_blank {
            0
        } else {
            language.value(cell.tile.letter)
        };
        if cell.is_new {
            let premium = layout.at(cell.position);
            sum += base * premium.letter_multiplier();
            word_multiplier *= premium.word_multiplier();
        } else {
            sum += base;
        }
    }
    sum * word_multiplier
}

/// Score a move: every formed word scored on its own and summed, plus the
/// bingo bonus when all seven rack tiles were played.
pub fn score(
    placement: &Placement,
    words: &[FormedWord],
    language: Language,
    layout: &PremiumLayout,
) -> ScoreBreakdown {
    let words: Vec<(String, u32)> = words
        .iter()
        .map(|w| (w.text(), score_word(w, language, layout)))
        .collect();
    let bingo = placement.len() == RACK_SIZE;
    let mut total: u32 = words.iter().map(|(_, points)| points).sum();
    if bingo {
        total += BINGO_BONUS;
    }
    ScoreBreakdown { words, bingo, total }
}
