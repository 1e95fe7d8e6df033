//! Dictionary for word validation
//!
//! Holds an uppercase word set plus a by-length index. Patterns with blank
//! wildcards (`?`) are resolved against the same-length bucket only, and
//! each pattern's answer is memoized for the lifetime of the dictionary.
//!
//! A loaded dictionary is read-only apart from its cache and is meant to be
//! shared (`Arc<Dictionary>`) across every game using that word list.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use tracing::{debug, warn};

use super::words::FormedWord;
use super::BLANK;

/// A word list with O(1) lookup and cached wildcard matching.
#[derive(Debug, Default)]
pub struct Dictionary {
    words: HashSet<String>,
    by_length: HashMap<usize, Vec<String>>,
    pattern_cache: RwLock<HashMap<String, bool>>,
}

impl Dictionary {
    /// Build from any list of words. Entries are uppercased; entries with
    /// non-alphabetic characters are skipped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                continue;
            }
            set.insert(word.to_ascii_uppercase());
        }

        let mut by_length: HashMap<usize, Vec<String>> = HashMap::new();
        for word in &set {
            by_length.entry(word.len()).or_default().push(word.clone());
        }
        for bucket in by_length.values_mut() {
            bucket.sort();
        }

        debug!(words = set.len(), "dictionary loaded");
        Self {
            words: set,
            by_length,
            pattern_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Build from newline-separated text, one word per line.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    /// Check if a word is in the dictionary. Case-insensitive.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_ascii_uppercase())
    }

    /// Check if any word fits `pattern`, where `?` matches any letter.
    ///
    /// Plain words are a hash lookup. Wildcard patterns scan only the
    /// same-length bucket the first time, then come from the cache.
    pub fn matches(&self, pattern: &str) -> bool {
        let pattern = pattern.to_ascii_uppercase();
        if !pattern.contains(BLANK) {
            return self.words.contains(&pattern);
        }

        match self.pattern_cache.read() {
            Ok(cache) => {
                if let Some(&hit) = cache.get(&pattern) {
                    return hit;
                }
            }
            Err(_) => warn!("pattern cache poisoned, matching uncached"),
        }

        let found = self.scan(&pattern);
        if let Ok(mut cache) = self.pattern_cache.write() {
            cache.insert(pattern, found);
        }
        found
    }

    /// Display text of every word that fits no dictionary entry,
    /// deduplicated, in formation order.
    pub fn invalid_words(&self, words: &[FormedWord]) -> Vec<String> {
        let mut invalid: Vec<String> = Vec::new();
        for word in words {
            if !self.matches(&word.pattern()) {
                let text = word.text();
                if !invalid.contains(&text) {
                    invalid.push(text);
                }
            }
        }
        invalid
    }

    fn scan(&self, pattern: &str) -> bool {
        let wanted = pattern.as_bytes();
        let Some(bucket) = self.by_length.get(&wanted.len()) else {
            return false;
        };
        bucket.iter().any(|word| {
            word.as_bytes()
                .iter()
                .zip(wanted)
                .all(|(&have, &want)| want == BLANK as u8 || have == want)
        })
    }

    /// Words of exactly `len` letters, sorted.
    pub fn words_of_length(&self, len: usize) -> &[String] {
        self.by_length.get(&len).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every word, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Returns the total number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of wildcard patterns resolved so far.
    pub fn cached_patterns(&self) -> usize {
        self.pattern_cache.read().map(|c| c.len()).unwrap_or(0)
    }
}
