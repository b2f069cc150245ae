//! # Wordle Entropy
//!
//! A multithreaded Wordle solver using entropy-based information theory.
//!
//! Each round the solver ranks every legal guess by the Shannon entropy of
//! the feedback it would produce over the remaining candidate answers, plays
//! the most informative one, and folds the feedback into a set of letter
//! constraints that narrows the candidates for the next round.

pub mod config;
pub mod constraints;
pub mod feedback;
pub mod ranker;
pub mod solver;
pub mod word;
pub mod wordlist;

pub use config::{ConfigError, SolverConfig, DEFAULT_ROUNDS, DEFAULT_WORD_LENGTH};
pub use constraints::{ConstraintError, Constraints};
pub use feedback::{compare, Feedback, FeedbackError, FeedbackPattern};
pub use ranker::{entropy, EntropyRanker, GuessAnalysis, Ranking};
pub use solver::{
    BenchmarkReport, FeedbackSource, GameReport, OracleFeedback, Outcome, RoundRecord,
    SolverError, Suggestion, SuggestionSource, WordleSolver,
};
pub use word::{LetterSet, Word, WordError, WordPool, MAX_WORD_LENGTH};
pub use wordlist::{load_word_list, load_word_lists, save_word_list, LoadError, WordLists};
