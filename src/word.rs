//! Words, word pools and letter sets.
//!
//! Every word handled by the solver is lowercase ASCII. That lets letters be
//! indexed `0..26` and lets a set of letters live in a single `u32`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest word the solver accepts. Feedback patterns for words of this
/// length still fit in a `u32` code and a dense bin table.
pub const MAX_WORD_LENGTH: usize = 10;

/// Number of letters in the alphabet.
pub const ALPHABET_SIZE: usize = 26;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("word is empty")]
    Empty,
    #[error("'{word}' has {found} letters, expected {expected}")]
    WrongLength {
        word: String,
        expected: usize,
        found: usize,
    },
    #[error("'{word}' is longer than the supported maximum of {max} letters", max = MAX_WORD_LENGTH)]
    TooLong { word: String },
    #[error("'{word}' contains '{letter}', only lowercase a-z is allowed")]
    InvalidLetter { word: String, letter: char },
}

/// Index of a lowercase ASCII letter in `0..26`.
#[inline]
pub(crate) fn letter_index(letter: u8) -> usize {
    debug_assert!(letter.is_ascii_lowercase());
    (letter - b'a') as usize
}

/// A validated word: 1 to [`MAX_WORD_LENGTH`] lowercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(Box<str>);

impl Word {
    /// Parse a word that must have exactly `length` letters.
    pub fn parse(s: &str, length: usize) -> Result<Self, WordError> {
        let word: Word = s.parse()?;
        if word.len() != length {
            return Err(WordError::WrongLength {
                word: s.to_string(),
                expected: length,
                found: word.len(),
            });
        }
        Ok(word)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Letter at `position`.
    pub fn letter(&self, position: usize) -> u8 {
        self.as_bytes()[position]
    }

    /// The set of distinct letters in this word.
    pub fn letters(&self) -> LetterSet {
        self.as_bytes().iter().copied().collect()
    }
}

impl FromStr for Word {
    type Err = WordError;

    /// Accepts any length up to [`MAX_WORD_LENGTH`]; use [`Word::parse`] to pin it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(WordError::Empty);
        }
        if let Some(letter) = s.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(WordError::InvalidLetter {
                word: s.to_string(),
                letter,
            });
        }
        if s.len() > MAX_WORD_LENGTH {
            return Err(WordError::TooLong {
                word: s.to_string(),
            });
        }
        Ok(Self(s.into()))
    }
}

impl AsRef<str> for Word {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of lowercase letters stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LetterSet(u32);

impl LetterSet {
    pub const EMPTY: Self = Self(0);

    pub fn insert(&mut self, letter: u8) {
        self.0 |= 1 << letter_index(letter);
    }

    pub fn contains(self, letter: u8) -> bool {
        self.0 & (1 << letter_index(letter)) != 0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// `true` if every letter of `self` is also in `other`.
    pub fn is_subset(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    /// Letters in alphabetical order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..ALPHABET_SIZE as u8)
            .filter(move |i| self.0 & (1 << i) != 0)
            .map(|i| b'a' + i)
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.iter() {
            write!(f, "{}", letter as char)?;
        }
        Ok(())
    }
}

/// A set of unique words, kept sorted so lookups are a binary search and
/// slices of it can be handed to worker threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<Word>,
}

impl WordPool {
    pub fn new(words: impl IntoIterator<Item = Word>) -> Self {
        let mut words: Vec<Word> = words.into_iter().collect();
        words.sort_unstable();
        words.dedup();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub fn first(&self) -> Option<&Word> {
        self.words.first()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    /// Look up the pooled copy of `word`.
    pub fn get(&self, word: &str) -> Option<&Word> {
        self.words
            .binary_search_by(|w| w.as_str().cmp(word))
            .ok()
            .map(|i| &self.words[i])
    }

    /// Keep only the words for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&Word) -> bool) {
        self.words.retain(keep);
    }

    /// Words present in either pool.
    pub fn union(&self, other: &WordPool) -> WordPool {
        Self::new(self.words.iter().chain(other.words.iter()).cloned())
    }
}

impl FromIterator<Word> for WordPool {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a WordPool {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_uppercase_and_wrong_length() {
        assert!(matches!(
            "Crane".parse::<Word>(),
            Err(WordError::InvalidLetter { letter: 'C', .. })
        ));
        assert!(matches!(
            Word::parse("cranes", 5),
            Err(WordError::WrongLength { found: 6, .. })
        ));
        assert_eq!("".parse::<Word>(), Err(WordError::Empty));
        assert!(matches!(
            "abcdefghijk".parse::<Word>(),
            Err(WordError::TooLong { .. })
        ));
    }

    #[test]
    fn pool_is_sorted_and_unique() {
        let pool: WordPool = ["slate", "crane", "slate", "audio"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let words: Vec<&str> = pool.iter().map(Word::as_str).collect();
        assert_eq!(words, ["audio", "crane", "slate"]);
        assert!(pool.contains("crane"));
        assert!(!pool.contains("trace"));
    }

    #[test]
    fn letter_set_operations() {
        let word: Word = "geese".parse().unwrap();
        let set = word.letters();
        assert_eq!(set.len(), 3);
        assert_eq!(set.to_string(), "egs");
        assert!(set.contains(b'g'));
        assert!(!set.contains(b'a'));

        let other: LetterSet = b"gz".iter().copied().collect();
        assert_eq!(set.difference(other).to_string(), "es");
        assert_eq!(set.union(other).to_string(), "egsz");
        assert!(LetterSet::EMPTY.is_subset(set));
        assert!(!other.is_subset(set));
    }
}
