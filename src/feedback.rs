//! Feedback calculation for guesses.
//!
//! This module handles computing the feedback pattern (green/yellow/black)
//! for a guess against a target word, including the duplicate-letter rules.

use crate::word::{letter_index, Word, ALPHABET_SIZE, MAX_WORD_LENGTH};
use std::fmt;
use thiserror::Error;

/// Represents the feedback for a single letter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Correct letter in correct position (green)
    Hit,
    /// Correct letter in wrong position (yellow)
    Present,
    /// Letter not in word, or all its occurrences already accounted for (black)
    Miss,
}

impl Feedback {
    /// Convert to a character for display
    pub fn to_char(self) -> char {
        match self {
            Feedback::Hit => '🟩',
            Feedback::Present => '🟨',
            Feedback::Miss => '⬛',
        }
    }

    /// The input symbol for this feedback (`g`, `y` or `b`)
    pub fn to_symbol(self) -> char {
        match self {
            Feedback::Hit => 'g',
            Feedback::Present => 'y',
            Feedback::Miss => 'b',
        }
    }

    /// Parse from a character (g=green, y=yellow, b=black)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'g' | '2' => Some(Feedback::Hit),
            'y' | '1' => Some(Feedback::Present),
            'b' | 'x' | '0' => Some(Feedback::Miss),
            _ => None,
        }
    }

    fn value(self) -> u32 {
        match self {
            Feedback::Miss => 0,
            Feedback::Present => 1,
            Feedback::Hit => 2,
        }
    }

    fn from_value(value: u32) -> Self {
        match value {
            0 => Feedback::Miss,
            1 => Feedback::Present,
            _ => Feedback::Hit,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("feedback '{input}' has {found} symbols, expected {expected}")]
    WrongLength {
        input: String,
        expected: usize,
        found: usize,
    },
    #[error("feedback '{input}' contains '{symbol}', use g=green, y=yellow, b=black")]
    InvalidSymbol { input: String, symbol: char },
}

/// A complete feedback pattern for a guess.
///
/// Encoded as a base-3 number, position 0 being the least significant digit:
/// `p0 + 3*p1 + 9*p2 + ...` where each digit is 0 (miss), 1 (present) or
/// 2 (hit). The code doubles as an index into a bin table of
/// [`FeedbackPattern::pattern_count`] entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeedbackPattern {
    code: u32,
    len: u8,
}

impl FeedbackPattern {
    /// Create a new pattern from individual feedback values
    pub fn new(feedbacks: &[Feedback]) -> Self {
        debug_assert!(feedbacks.len() <= MAX_WORD_LENGTH);
        let mut code = 0;
        let mut multiplier = 1;
        for fb in feedbacks {
            code += fb.value() * multiplier;
            multiplier *= 3;
        }
        Self {
            code,
            len: feedbacks.len() as u8,
        }
    }

    /// The pattern indicating all hits (winning)
    pub fn all_hit(len: usize) -> Self {
        Self::new(&vec![Feedback::Hit; len])
    }

    /// Total number of possible patterns for words of `len` letters (3^len)
    pub fn pattern_count(len: usize) -> usize {
        3usize.pow(len as u32)
    }

    /// Index of this pattern in a table of [`FeedbackPattern::pattern_count`] bins
    pub fn index(self) -> usize {
        self.code as usize
    }

    pub fn len(self) -> usize {
        self.len as usize
    }

    pub fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Convert pattern to a list of feedbacks, in position order
    pub fn to_feedbacks(self) -> Vec<Feedback> {
        let mut code = self.code;
        (0..self.len)
            .map(|_| {
                let fb = Feedback::from_value(code % 3);
                code /= 3;
                fb
            })
            .collect()
    }

    /// Check if this pattern represents a win (all hits)
    pub fn is_win(self) -> bool {
        self == Self::all_hit(self.len())
    }

    /// Parse a pattern from a string like "gybbb" or "21000"
    pub fn parse(s: &str, len: usize) -> Result<Self, FeedbackError> {
        let found = s.chars().count();
        if found != len {
            return Err(FeedbackError::WrongLength {
                input: s.to_string(),
                expected: len,
                found,
            });
        }
        let feedbacks = s
            .chars()
            .map(|c| {
                Feedback::from_char(c).ok_or_else(|| FeedbackError::InvalidSymbol {
                    input: s.to_string(),
                    symbol: c,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(&feedbacks))
    }

    /// Display as a `g`/`y`/`b` string
    pub fn to_symbol_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_symbol()).collect()
    }

    /// Display as emoji string
    pub fn to_emoji_string(self) -> String {
        self.to_feedbacks().iter().map(|f| f.to_char()).collect()
    }
}

impl fmt::Display for FeedbackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji_string())
    }
}

/// Calculate the feedback pattern for `guess` against `target`.
///
/// Hits are marked first and consume the target's letter counts. Letters the
/// target lacks entirely are misses. What is left is resolved left to right,
/// so when the guess repeats a letter more often than the target does, the
/// earliest unmatched copies are the ones reported as present.
pub fn compare(target: &Word, guess: &Word) -> FeedbackPattern {
    let target = target.as_bytes();
    let guess = guess.as_bytes();

    debug_assert_eq!(target.len(), guess.len());
    let len = guess.len();

    let mut in_target = [0u8; ALPHABET_SIZE];
    for &c in target {
        in_target[letter_index(c)] += 1;
    }

    let mut remaining = in_target;
    let mut feedback: [Option<Feedback>; MAX_WORD_LENGTH] = [None; MAX_WORD_LENGTH];

    for i in 0..len {
        if guess[i] == target[i] {
            feedback[i] = Some(Feedback::Hit);
            remaining[letter_index(guess[i])] -= 1;
        }
    }

    for i in 0..len {
        if feedback[i].is_none() && in_target[letter_index(guess[i])] == 0 {
            feedback[i] = Some(Feedback::Miss);
        }
    }

    for i in 0..len {
        if feedback[i].is_some() {
            continue;
        }
        let idx = letter_index(guess[i]);
        feedback[i] = if remaining[idx] > 0 {
            remaining[idx] -= 1;
            Some(Feedback::Present)
        } else {
            Some(Feedback::Miss)
        };
    }

    let mut code = 0;
    let mut multiplier = 1;
    for fb in feedback[..len].iter().flatten() {
        code += fb.value() * multiplier;
        multiplier *= 3;
    }
    FeedbackPattern {
        code,
        len: len as u8,
    }
}
