//! Loading and saving newline-delimited word lists.

use crate::word::{Word, WordError, WordPool};
use log::debug;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read word list {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path}:{line}: invalid word")]
    InvalidWord {
        path: PathBuf,
        line: usize,
        #[source]
        source: WordError,
    },
    #[error("word list {0} contains no words")]
    Empty(PathBuf),
}

/// The two pools a game starts from.
#[derive(Debug, Clone)]
pub struct WordLists {
    /// Every legal guess, answers included
    pub guesses: WordPool,
    /// Every legal answer
    pub answers: WordPool,
}

/// Parse one word per line. Blank lines are skipped and surrounding
/// whitespace is ignored; any other malformed line is an error.
pub fn parse_word_list(
    text: &str,
    word_length: usize,
    path: &Path,
) -> Result<WordPool, LoadError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line, word)| {
            Word::parse(word, word_length).map_err(|source| LoadError::InvalidWord {
                path: path.to_path_buf(),
                line,
                source,
            })
        })
        .collect()
}

pub fn load_word_list(path: impl AsRef<Path>, word_length: usize) -> Result<WordPool, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let pool = parse_word_list(&text, word_length, path)?;
    if pool.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }
    debug!("loaded {} words from {}", pool.len(), path.display());
    Ok(pool)
}

/// Load the guess and answer lists. Every answer is also a legal guess.
pub fn load_word_lists(
    guesses: impl AsRef<Path>,
    answers: impl AsRef<Path>,
    word_length: usize,
) -> Result<WordLists, LoadError> {
    let answers = load_word_list(answers, word_length)?;
    let guesses = load_word_list(guesses, word_length)?.union(&answers);
    Ok(WordLists { guesses, answers })
}

/// Write `pool` to `path`, one word per line.
pub fn save_word_list(pool: &WordPool, path: impl AsRef<Path>) -> io::Result<()> {
    let mut out = BufWriter::new(fs::File::create(path)?);
    for word in pool {
        writeln!(out, "{}", word)?;
    }
    out.flush()
}
