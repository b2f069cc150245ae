//! Solver configuration.

use crate::word::{Word, MAX_WORD_LENGTH};
use std::num::NonZeroUsize;
use std::thread;
use thiserror::Error;

/// Word length used by the standard game
pub const DEFAULT_WORD_LENGTH: usize = 5;

/// Round budget for one game
pub const DEFAULT_ROUNDS: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("word length must be between 1 and {}, got {}", MAX_WORD_LENGTH, .0)]
    WordLength(usize),
    #[error("the round budget must be at least 1")]
    NoRounds,
    #[error("the thread limit must be at least 1")]
    NoThreads,
    #[error("first guess '{word}' does not have {expected} letters")]
    FirstGuessLength { word: String, expected: usize },
    #[error("failed to start worker pool: {0}")]
    ThreadPool(String),
}

/// Everything that shapes a game, passed explicitly to the solver and ranker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    pub word_length: usize,
    pub rounds: usize,
    /// Upper bound on ranker worker threads; `None` uses every hardware thread.
    pub thread_limit: Option<usize>,
    /// Opening guess played without ranking the first round.
    pub first_guess: Option<Word>,
    /// Restrict guesses to words consistent with every clue so far.
    pub hard_mode: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            word_length: DEFAULT_WORD_LENGTH,
            rounds: DEFAULT_ROUNDS,
            thread_limit: None,
            first_guess: None,
            hard_mode: false,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_word_length(mut self, word_length: usize) -> Self {
        self.word_length = word_length;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_thread_limit(mut self, limit: usize) -> Self {
        self.thread_limit = Some(limit);
        self
    }

    pub fn with_first_guess(mut self, word: Word) -> Self {
        self.first_guess = Some(word);
        self
    }

    pub fn with_hard_mode(mut self, enabled: bool) -> Self {
        self.hard_mode = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.word_length == 0 || self.word_length > MAX_WORD_LENGTH {
            return Err(ConfigError::WordLength(self.word_length));
        }
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.thread_limit == Some(0) {
            return Err(ConfigError::NoThreads);
        }
        if let Some(word) = &self.first_guess {
            if word.len() != self.word_length {
                return Err(ConfigError::FirstGuessLength {
                    word: word.to_string(),
                    expected: self.word_length,
                });
            }
        }
        Ok(())
    }

    /// Number of ranker workers: the thread limit capped by the hardware, at least 1.
    pub fn worker_count(&self) -> usize {
        let hardware = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        self.thread_limit.unwrap_or(usize::MAX).min(hardware).max(1)
    }
}
