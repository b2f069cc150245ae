use wordle_entropy::{entropy, EntropyRanker, Word, WordPool};

fn w(s: &str) -> Word {
    s.parse().unwrap()
}

fn pool(words: &[&str]) -> WordPool {
    words.iter().map(|s| w(s)).collect()
}

fn get_test_words() -> WordPool {
    pool(&[
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
        "geese", "creep", "those", "sores", "llama", "level", "audio", "pious", "quick", "dream",
        "charm", "speed", "arose", "flaky", "plant", "stick", "basis", "sassy", "eerie", "mamma",
    ])
}

#[test]
fn test_entropy_of_distinct_patterns() {
    let candidates = pool(&["crane", "trace", "crate", "slate"]);
    // Every candidate gives crane a different pattern: four equal bins.
    assert_eq!(entropy(&w("crane"), candidates.as_slice()), 2.0);
}

#[test]
fn test_entropy_is_zero_for_a_single_bin() {
    let candidates = pool(&["crane", "trace", "crate", "slate"]);
    assert_eq!(entropy(&w("xxxxx"), candidates.as_slice()), 0.0);
    assert_eq!(entropy(&w("crane"), pool(&["slate"]).as_slice()), 0.0);
    assert_eq!(entropy(&w("crane"), &[]), 0.0);
}

#[test]
fn test_entropy_is_normalized_by_candidates() {
    let candidates = pool(&["crane", "slate"]);
    assert_eq!(entropy(&w("crane"), candidates.as_slice()), 1.0);
    assert_eq!(entropy(&w("audio"), candidates.as_slice()), 0.0);
}

#[test]
fn test_entropy_non_negative_and_zero_iff_one_pattern() {
    let words = get_test_words();
    for guess in &words {
        let h = entropy(guess, words.as_slice());
        assert!(h >= 0.0);

        let first = wordle_entropy::compare(&words.as_slice()[0], guess);
        let single_bin = words
            .iter()
            .all(|answer| wordle_entropy::compare(answer, guess) == first);
        assert_eq!(h == 0.0, single_bin, "guess {}", guess);
    }
}

#[test]
fn test_rank_orders_by_descending_entropy() {
    let ranker = EntropyRanker::with_workers(2).unwrap();
    let words = get_test_words();
    let ranking = ranker.rank(&words, &words);

    assert_eq!(ranking.len(), words.len());
    let entries: Vec<_> = ranking.iter().collect();
    for pair in entries.windows(2) {
        assert!(pair[0].entropy >= pair[1].entropy);
    }
    let best = ranking.best().unwrap();
    for guess in &words {
        assert!(best.entropy >= entropy(guess, words.as_slice()));
    }
}

#[test]
fn test_ties_prefer_candidates_then_alphabetical() {
    let ranker = EntropyRanker::with_workers(1).unwrap();
    let guesses = pool(&["xxxxx", "slate", "caret", "trace", "crate", "crane"]);
    let candidates = pool(&["crane", "trace", "crate", "slate"]);

    let ranking = ranker.rank(&guesses, &candidates);
    let order: Vec<&str> = ranking.iter().map(|g| g.word.as_str()).collect();
    assert_eq!(order, ["crane", "crate", "slate", "trace", "caret", "xxxxx"]);

    let caret = ranking.iter().find(|g| g.word.as_str() == "caret").unwrap();
    assert!(!caret.is_possible_answer);
    assert_eq!(caret.entropy, 2.0);
    assert_eq!(caret.expected_remaining(4), 1.0);
}

#[test]
fn test_parallel_matches_single_threaded() {
    let guesses = get_test_words();
    let candidates = pool(&[
        "crane", "slate", "trace", "crate", "raise", "arise", "stare", "roast", "toast", "beast",
    ]);

    let single = EntropyRanker::with_workers(1)
        .unwrap()
        .rank(&guesses, &candidates);
    for workers in [2, 3, 4, 7, 64] {
        let ranker = EntropyRanker::with_workers(workers).unwrap();
        assert_eq!(ranker.workers(), workers);
        assert_eq!(ranker.rank(&guesses, &candidates), single, "{} workers", workers);
    }
}

#[test]
fn test_rank_with_empty_pools() {
    let ranker = EntropyRanker::with_workers(2).unwrap();
    let words = get_test_words();
    assert!(ranker.rank(&WordPool::default(), &words).is_empty());
    assert!(ranker.rank(&words, &WordPool::default()).is_empty());
}
