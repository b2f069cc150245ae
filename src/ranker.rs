//! Entropy-based guess ranking.
//!
//! For each guess, every remaining candidate answer is sorted into a bin by
//! the feedback it would produce. The Shannon entropy of the bin sizes is the
//! expected number of bits the guess reveals, assuming every candidate is
//! equally likely. Guesses are independent of one another, so the guess list
//! is split into contiguous chunks that a fixed pool of workers ranks in
//! parallel before the partial rankings are merged.

use crate::config::{ConfigError, SolverConfig};
use crate::feedback::{compare, FeedbackPattern};
use crate::word::{Word, WordPool};
use log::{debug, trace};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::cmp::Ordering;
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;

/// Result of analyzing a potential guess
#[derive(Debug, Clone, PartialEq)]
pub struct GuessAnalysis {
    pub word: Word,
    pub entropy: f64,
    pub is_possible_answer: bool,
}

impl GuessAnalysis {
    /// Expected number of candidates left after playing this guess.
    pub fn expected_remaining(&self, candidates: usize) -> f64 {
        candidates as f64 / 2_f64.powf(self.entropy)
    }

    /// Descending entropy, then candidates before non-candidates, then
    /// alphabetical.
    fn rank_order(&self, other: &Self) -> Ordering {
        other
            .entropy
            .total_cmp(&self.entropy)
            .then_with(|| other.is_possible_answer.cmp(&self.is_possible_answer))
            .then_with(|| self.word.cmp(&other.word))
    }
}

/// Guesses ordered best first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    entries: Vec<GuessAnalysis>,
}

impl Ranking {
    fn from_unsorted(mut entries: Vec<GuessAnalysis>) -> Self {
        entries.sort_by(GuessAnalysis::rank_order);
        Self { entries }
    }

    /// Merge per-worker rankings into one.
    pub fn merge(parts: impl IntoIterator<Item = Ranking>) -> Self {
        Self::from_unsorted(parts.into_iter().flat_map(|r| r.entries).collect())
    }

    pub fn best(&self) -> Option<&GuessAnalysis> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GuessAnalysis> {
        self.entries.iter()
    }

    pub fn truncate(&mut self, n: usize) {
        self.entries.truncate(n);
    }

    pub fn into_vec(self) -> Vec<GuessAnalysis> {
        self.entries
    }
}

impl IntoIterator for Ranking {
    type Item = GuessAnalysis;
    type IntoIter = std::vec::IntoIter<GuessAnalysis>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Split `len` items into `parts` contiguous ranges of `len / parts` items,
/// the last range also taking the remainder.
pub fn partition(len: usize, parts: usize) -> Vec<Range<usize>> {
    let parts = parts.max(1);
    let per_part = len / parts;
    (0..parts)
        .map(|i| {
            let start = i * per_part;
            let end = if i == parts - 1 { len } else { start + per_part };
            start..end
        })
        .filter(|range| !range.is_empty())
        .collect()
}

/// Per-worker feedback bin counts, reused across guesses.
struct Bins {
    counts: Vec<u32>,
    touched: Vec<usize>,
}

impl Bins {
    fn new(word_length: usize) -> Self {
        Self {
            counts: vec![0; FeedbackPattern::pattern_count(word_length)],
            touched: Vec::new(),
        }
    }

    fn entropy(&mut self, guess: &Word, candidates: &[Word]) -> f64 {
        for answer in candidates {
            let idx = compare(answer, guess).index();
            if self.counts[idx] == 0 {
                self.touched.push(idx);
            }
            self.counts[idx] += 1;
        }

        let n = candidates.len() as f64;
        let mut entropy = 0.0;
        for idx in self.touched.drain(..) {
            let p = self.counts[idx] as f64 / n;
            entropy -= p * p.log2();
            self.counts[idx] = 0;
        }
        entropy
    }
}

/// Entropy of the feedback distribution `guess` induces over `candidates`.
///
/// Probabilities are normalized by the number of candidates. An empty
/// candidate list has zero entropy.
pub fn entropy(guess: &Word, candidates: &[Word]) -> f64 {
    if candidates.is_empty() {
        return 0.0;
    }
    Bins::new(guess.len()).entropy(guess, candidates)
}

fn rank_chunk(guesses: &[Word], candidates: &WordPool) -> Ranking {
    let Some(first) = guesses.first() else {
        return Ranking::default();
    };
    let mut bins = Bins::new(first.len());
    let entries = guesses
        .iter()
        .map(|word| GuessAnalysis {
            word: word.clone(),
            entropy: bins.entropy(word, candidates.as_slice()),
            is_possible_answer: candidates.contains(word.as_str()),
        })
        .collect();
    Ranking::from_unsorted(entries)
}

/// Ranks guesses on a fixed-size worker pool.
#[derive(Debug, Clone)]
pub struct EntropyRanker {
    workers: usize,
    pool: Arc<ThreadPool>,
}

impl EntropyRanker {
    pub fn new(config: &SolverConfig) -> Result<Self, ConfigError> {
        Self::with_workers(config.worker_count())
    }

    pub fn with_workers(workers: usize) -> Result<Self, ConfigError> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("ranker-{}", i))
            .build()
            .map_err(|e| ConfigError::ThreadPool(e.to_string()))?;
        Ok(Self {
            workers,
            pool: Arc::new(pool),
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Rank every word in `guesses` by its entropy over `candidates`.
    pub fn rank(&self, guesses: &WordPool, candidates: &WordPool) -> Ranking {
        if guesses.is_empty() || candidates.is_empty() {
            return Ranking::default();
        }

        let start = Instant::now();
        let words = guesses.as_slice();
        let chunks = partition(words.len(), self.workers);

        let parts: Vec<Ranking> = self.pool.install(|| {
            chunks
                .into_par_iter()
                .enumerate()
                .map(|(i, range)| {
                    trace!("worker {} ranking guesses {:?}", i, range);
                    rank_chunk(&words[range], candidates)
                })
                .collect()
        });

        let ranking = Ranking::merge(parts);
        debug!(
            "ranked {} guesses against {} candidates on {} workers in {:.2?}",
            guesses.len(),
            candidates.len(),
            self.workers,
            start.elapsed()
        );
        ranking
    }
}
