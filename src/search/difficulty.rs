//! Difficulty levels: which of the ranked candidates gets played.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How strong the computer plays. Every level runs the same search; the
/// level only decides which ranked move is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    /// A random move from the lower-scoring half.
    Easy,
    /// A random move from the higher-scoring half.
    #[default]
    Medium,
    /// One of the three best moves.
    Hard,
}

/// Hard picks among this many of the best moves.
const HARD_POOL: usize = 3;

impl Difficulty {
    /// The slice of `ranked` (best first) this level chooses from.
    pub fn pool<'a, T>(&self, ranked: &'a [T]) -> &'a [T] {
        let len = ranked.len();
        match self {
            Difficulty::Easy => &ranked[len / 2..],
            Difficulty::Medium => &ranked[..len.div_ceil(2)],
            Difficulty::Hard => &ranked[..len.min(HARD_POOL)],
        }
    }

    /// Pick a candidate from `ranked` (best first). `None` only when empty.
    pub fn select<'a, T, R: Rng + ?Sized>(&self, ranked: &'a [T], rng: &mut R) -> Option<&'a T> {
        self.pool(ranked).choose(rng)
    }

    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}
