//! Round-by-round solving.
//!
//! [`WordleSolver`] owns the word pools and the accumulated constraints for
//! one game. Each round it proposes a guess, takes feedback from a
//! [`FeedbackSource`] (a human, or the oracle for a known target), and narrows
//! the candidate answers, until the answer is hit or the round budget runs
//! out.

use crate::config::{ConfigError, SolverConfig};
use crate::constraints::{ConstraintError, Constraints};
use crate::feedback::{compare, FeedbackError, FeedbackPattern};
use crate::ranker::{EntropyRanker, GuessAnalysis, Ranking};
use crate::word::{Word, WordPool};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Constraint(#[from] ConstraintError),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    #[error("no candidate answers remain, the feedback so far is contradictory")]
    NoCandidates,
    #[error("'{0}' is not in the guess list")]
    UnknownWord(String),
    #[error("target '{target}' has {found} letters, expected {expected}")]
    TargetLength {
        target: String,
        expected: usize,
        found: usize,
    },
    #[error("reading input failed")]
    Io(#[from] io::Error),
}

/// Why a word was suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    /// The configured opening guess
    FirstGuess,
    /// The only candidate left
    OnlyCandidate,
    /// The highest entropy guess
    Entropy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub word: Word,
    /// `None` when no ranking was needed
    pub entropy: Option<f64>,
    pub source: SuggestionSource,
    pub is_possible_answer: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundRecord {
    /// 1-based round number
    pub round: usize,
    pub guess: Word,
    pub pattern: FeedbackPattern,
    /// Candidates left after this round
    pub remaining: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved { rounds: usize },
    /// The round budget ran out first
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameReport {
    pub rounds: Vec<RoundRecord>,
    pub outcome: Outcome,
}

impl GameReport {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved { .. })
    }

    pub fn guesses(&self) -> impl Iterator<Item = &Word> {
        self.rounds.iter().map(|r| &r.guess)
    }
}

/// Where a game's guesses are confirmed and its feedback comes from.
pub trait FeedbackSource {
    /// Pick the word to play. Defaults to the suggestion.
    fn choose_guess(&mut self, _round: usize, suggestion: Suggestion) -> Result<Word, SolverError> {
        Ok(suggestion.word)
    }

    /// Feedback for `guess` in round `round` (1-based).
    fn feedback(&mut self, round: usize, guess: &Word) -> Result<FeedbackPattern, SolverError>;

    /// Called once a round has been folded into the solver.
    fn round_finished(
        &mut self,
        _record: &RoundRecord,
        _solver: &WordleSolver,
    ) -> Result<(), SolverError> {
        Ok(())
    }
}

/// Feedback computed against a known target.
#[derive(Debug, Clone)]
pub struct OracleFeedback {
    target: Word,
}

impl OracleFeedback {
    pub fn new(target: Word) -> Self {
        Self { target }
    }
}

impl FeedbackSource for OracleFeedback {
    fn feedback(&mut self, _round: usize, guess: &Word) -> Result<FeedbackPattern, SolverError> {
        if self.target.len() != guess.len() {
            return Err(SolverError::TargetLength {
                target: self.target.to_string(),
                expected: guess.len(),
                found: self.target.len(),
            });
        }
        Ok(compare(&self.target, guess))
    }
}

/// Rounds needed per answer across a benchmark run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchmarkReport {
    /// rounds used -> number of answers solved in that many rounds
    pub distribution: BTreeMap<usize, usize>,
    pub exhausted: usize,
}

impl BenchmarkReport {
    pub fn games(&self) -> usize {
        self.solved() + self.exhausted
    }

    pub fn solved(&self) -> usize {
        self.distribution.values().sum()
    }

    /// Mean rounds over solved games.
    pub fn average_rounds(&self) -> f64 {
        let solved = self.solved();
        if solved == 0 {
            return 0.0;
        }
        let total: usize = self.distribution.iter().map(|(r, c)| r * c).sum();
        total as f64 / solved as f64
    }
}

/// The main solver
#[derive(Debug, Clone)]
pub struct WordleSolver {
    config: SolverConfig,
    ranker: EntropyRanker,
    all_guesses: WordPool,
    all_answers: WordPool,
    guesses: WordPool,
    candidates: WordPool,
    constraints: Constraints,
    rounds_played: usize,
}

impl WordleSolver {
    /// Every answer is added to the guess pool.
    pub fn new(
        config: SolverConfig,
        guesses: WordPool,
        answers: WordPool,
    ) -> Result<Self, SolverError> {
        config.validate()?;
        let ranker = EntropyRanker::new(&config)?;
        let all_guesses = guesses.union(&answers);
        Ok(Self {
            constraints: Constraints::new(config.word_length),
            guesses: all_guesses.clone(),
            candidates: answers.clone(),
            all_guesses,
            all_answers: answers,
            ranker,
            config,
            rounds_played: 0,
        })
    }

    /// A solver whose guesses and answers are the same list.
    pub fn with_words(config: SolverConfig, words: WordPool) -> Result<Self, SolverError> {
        Self::new(config, words.clone(), words)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn is_hard_mode(&self) -> bool {
        self.config.hard_mode
    }

    pub fn remaining_count(&self) -> usize {
        self.candidates.len()
    }

    /// Answers consistent with all feedback so far
    pub fn candidates(&self) -> &WordPool {
        &self.candidates
    }

    /// Guesses consistent with all feedback so far
    pub fn guesses(&self) -> &WordPool {
        &self.guesses
    }

    pub fn all_guesses(&self) -> &WordPool {
        &self.all_guesses
    }

    pub fn all_answers(&self) -> &WordPool {
        &self.all_answers
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    pub fn rounds_remaining(&self) -> usize {
        self.config.rounds.saturating_sub(self.rounds_played)
    }

    pub fn reset(&mut self) {
        self.guesses = self.all_guesses.clone();
        self.candidates = self.all_answers.clone();
        self.constraints = Constraints::new(self.config.word_length);
        self.rounds_played = 0;
    }

    /// Look up `word` in the guess list.
    pub fn lookup(&self, word: &str) -> Result<&Word, SolverError> {
        self.all_guesses
            .get(word)
            .ok_or_else(|| SolverError::UnknownWord(word.to_string()))
    }

    /// The words the ranker considers this round.
    ///
    /// Once there are no more candidates than rounds left, only candidates
    /// are ranked, so every guess can still be the answer.
    fn guess_domain(&self) -> &WordPool {
        if self.rounds_remaining() >= self.candidates.len() {
            &self.candidates
        } else if self.config.hard_mode {
            &self.guesses
        } else {
            &self.all_guesses
        }
    }

    /// Rank the current guess domain against the candidates.
    pub fn rank(&self) -> Ranking {
        self.ranker.rank(self.guess_domain(), &self.candidates)
    }

    pub fn top_guesses(&self, n: usize) -> Vec<GuessAnalysis> {
        let mut ranking = self.rank();
        ranking.truncate(n);
        ranking.into_vec()
    }

    pub fn suggest(&self) -> Result<Suggestion, SolverError> {
        if self.candidates.is_empty() {
            return Err(SolverError::NoCandidates);
        }

        if self.candidates.len() == 1 {
            if let Some(word) = self.candidates.first() {
                return Ok(Suggestion {
                    word: word.clone(),
                    entropy: None,
                    source: SuggestionSource::OnlyCandidate,
                    is_possible_answer: true,
                });
            }
        }

        if self.rounds_played == 0 {
            if let Some(word) = &self.config.first_guess {
                return Ok(Suggestion {
                    word: word.clone(),
                    entropy: None,
                    source: SuggestionSource::FirstGuess,
                    is_possible_answer: self.candidates.contains(word.as_str()),
                });
            }
        }

        let best = self.rank().into_iter().next().ok_or(SolverError::NoCandidates)?;
        Ok(Suggestion {
            word: best.word,
            entropy: Some(best.entropy),
            source: SuggestionSource::Entropy,
            is_possible_answer: best.is_possible_answer,
        })
    }

    /// Fold one round of feedback in and narrow the pools.
    ///
    /// Candidates must satisfy the accumulated constraints and reproduce the
    /// observed pattern exactly. Returns the number of candidates left.
    pub fn apply_feedback(
        &mut self,
        guess: &Word,
        pattern: FeedbackPattern,
    ) -> Result<usize, SolverError> {
        self.constraints.observe(guess, pattern)?;
        self.rounds_played += 1;

        let constraints = &self.constraints;
        self.candidates
            .retain(|word| constraints.matches(word) && compare(word, guess) == pattern);
        constraints.filter(&mut self.guesses);

        debug!(
            "{} candidates and {} guesses remain after {} {}",
            self.candidates.len(),
            self.guesses.len(),
            guess,
            pattern.to_symbol_string()
        );

        if self.candidates.is_empty() {
            return Err(SolverError::NoCandidates);
        }
        Ok(self.candidates.len())
    }

    /// Play until the answer is hit or the round budget is spent.
    pub fn play<S: FeedbackSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<GameReport, SolverError> {
        let mut rounds = Vec::new();

        while self.rounds_played < self.config.rounds {
            let round = self.rounds_played + 1;
            let suggestion = self.suggest()?;
            let chosen = source.choose_guess(round, suggestion)?;
            let guess = self.lookup(chosen.as_str())?.clone();

            let pattern = source.feedback(round, &guess)?;
            if pattern.len() != self.config.word_length {
                return Err(FeedbackError::WrongLength {
                    input: pattern.to_symbol_string(),
                    expected: self.config.word_length,
                    found: pattern.len(),
                }
                .into());
            }

            let record = if pattern.is_win() {
                self.rounds_played += 1;
                RoundRecord {
                    round,
                    guess,
                    pattern,
                    remaining: 1,
                }
            } else {
                let remaining = self.apply_feedback(&guess, pattern)?;
                RoundRecord {
                    round,
                    guess,
                    pattern,
                    remaining,
                }
            };
            info!(
                "round {}: {} {} ({} remaining)",
                round,
                record.guess,
                record.pattern.to_symbol_string(),
                record.remaining
            );
            source.round_finished(&record, self)?;
            rounds.push(record);

            if pattern.is_win() {
                return Ok(GameReport {
                    rounds,
                    outcome: Outcome::Solved { rounds: round },
                });
            }
        }

        warn!(
            "no solution within {} rounds, {} candidates left",
            self.config.rounds,
            self.candidates.len()
        );
        Ok(GameReport {
            rounds,
            outcome: Outcome::Exhausted,
        })
    }

    /// Solve a puzzle knowing the target word (for testing/benchmarking)
    pub fn solve_for_target(&mut self, target: &Word) -> Result<GameReport, SolverError> {
        let target = self.lookup(target.as_str())?.clone();
        self.play(&mut OracleFeedback::new(target))
    }

    /// Play every answer from a fresh state and tally the rounds used.
    ///
    /// The opening suggestion is computed once and reused for every game.
    pub fn benchmark(&self) -> Result<BenchmarkReport, SolverError> {
        let mut fresh = self.clone();
        fresh.reset();
        let opening = fresh.suggest()?.word;
        fresh.config.first_guess = Some(opening);

        let outcomes: Vec<Outcome> = self
            .all_answers
            .as_slice()
            .par_iter()
            .map(|target| {
                let mut solver = fresh.clone();
                solver.solve_for_target(target).map(|report| report.outcome)
            })
            .collect::<Result<_, _>>()?;

        let mut report = BenchmarkReport::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Solved { rounds } => *report.distribution.entry(rounds).or_insert(0) += 1,
                Outcome::Exhausted => report.exhausted += 1,
            }
        }
        Ok(report)
    }
}
