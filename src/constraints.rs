//! Accumulated knowledge about the answer.
//!
//! Each observed (guess, feedback) pair is folded into three kinds of facts:
//! letters confirmed at a position, letters excluded from a position, and
//! letters absent from the answer entirely. Together they form the predicate
//! used to narrow the candidate pool.

use crate::feedback::{Feedback, FeedbackPattern};
use crate::word::{LetterSet, Word, WordPool};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error(
        "position {position} was confirmed as '{confirmed}' but feedback now confirms '{observed}'"
    )]
    ConflictingHit {
        position: usize,
        confirmed: char,
        observed: char,
    },
    #[error("guess has {guess} letters but feedback has {feedback} symbols, expected {expected}")]
    LengthMismatch {
        expected: usize,
        guess: usize,
        feedback: usize,
    },
}

/// Constraints learned from the feedback observed so far in one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraints {
    /// Letter known to be at each position (green)
    confirmed: Vec<Option<u8>>,
    /// Letters known not to be at each position (yellow)
    excluded_here: Vec<LetterSet>,
    /// Letters not in the answer at all
    absent: LetterSet,
    /// Letters that must appear somewhere, position still unknown
    required: LetterSet,
}

impl Constraints {
    pub fn new(word_length: usize) -> Self {
        Self {
            confirmed: vec![None; word_length],
            excluded_here: vec![LetterSet::EMPTY; word_length],
            absent: LetterSet::EMPTY,
            required: LetterSet::EMPTY,
        }
    }

    pub fn word_length(&self) -> usize {
        self.confirmed.len()
    }

    pub fn confirmed(&self, position: usize) -> Option<u8> {
        self.confirmed[position]
    }

    pub fn excluded_here(&self, position: usize) -> LetterSet {
        self.excluded_here[position]
    }

    pub fn absent(&self) -> LetterSet {
        self.absent
    }

    pub fn required(&self) -> LetterSet {
        self.required
    }

    pub fn is_empty(&self) -> bool {
        self.confirmed.iter().all(Option::is_none)
            && self.excluded_here.iter().all(|s| s.is_empty())
            && self.absent.is_empty()
    }

    fn confirmed_letters(&self) -> LetterSet {
        self.confirmed.iter().flatten().copied().collect()
    }

    fn misplaced_letters(&self) -> LetterSet {
        self.excluded_here
            .iter()
            .fold(LetterSet::EMPTY, |acc, set| acc.union(*set))
    }

    /// Fold one round of feedback into the constraints.
    ///
    /// Misses are processed only after every hit and present symbol of the
    /// round, and a missed letter is recorded as absent only if it is not
    /// known to be in the answer. A guess holding more copies of a letter
    /// than the answer reports the surplus copies as misses.
    pub fn observe(
        &mut self,
        guess: &Word,
        pattern: FeedbackPattern,
    ) -> Result<(), ConstraintError> {
        let expected = self.word_length();
        if guess.len() != expected || pattern.len() != expected {
            return Err(ConstraintError::LengthMismatch {
                expected,
                guess: guess.len(),
                feedback: pattern.len(),
            });
        }

        let feedbacks = pattern.to_feedbacks();

        // Check every hit before mutating anything so a rejected round
        // leaves the constraints untouched.
        for (i, &fb) in feedbacks.iter().enumerate() {
            let c = guess.letter(i);
            if fb == Feedback::Hit {
                if let Some(known) = self.confirmed[i].filter(|&known| known != c) {
                    return Err(ConstraintError::ConflictingHit {
                        position: i,
                        confirmed: known as char,
                        observed: c as char,
                    });
                }
            }
        }

        for (i, &fb) in feedbacks.iter().enumerate() {
            let c = guess.letter(i);
            match fb {
                Feedback::Hit => self.confirmed[i] = Some(c),
                Feedback::Present => self.excluded_here[i].insert(c),
                Feedback::Miss => {}
            }
        }

        let known_present = self.confirmed_letters().union(self.misplaced_letters());
        for (i, &fb) in feedbacks.iter().enumerate() {
            let c = guess.letter(i);
            if fb == Feedback::Miss && !known_present.contains(c) {
                self.absent.insert(c);
            }
        }

        self.required = self.misplaced_letters().difference(self.confirmed_letters());
        Ok(())
    }

    /// Test a word against every constraint observed so far.
    pub fn matches(&self, word: &Word) -> bool {
        if word.len() != self.word_length() {
            return false;
        }

        for (i, &c) in word.as_bytes().iter().enumerate() {
            match self.confirmed[i] {
                Some(known) => {
                    if c != known {
                        return false;
                    }
                }
                None => {
                    if self.excluded_here[i].contains(c) || self.absent.contains(c) {
                        return false;
                    }
                }
            }
        }

        self.required.is_subset(word.letters())
    }

    /// Remove every word that does not match from `pool`.
    pub fn filter(&self, pool: &mut WordPool) {
        pool.retain(|word| self.matches(word));
    }
}
