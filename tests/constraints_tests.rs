use wordle_entropy::{compare, ConstraintError, Constraints, FeedbackPattern, Word, WordPool};

fn w(s: &str) -> Word {
    s.parse().unwrap()
}

fn fb(s: &str) -> FeedbackPattern {
    FeedbackPattern::parse(s, s.len()).unwrap()
}

fn pool(words: &[&str]) -> WordPool {
    words.iter().map(|s| w(s)).collect()
}

const WORDS: &[&str] = &[
    "crane", "slate", "geese", "creep", "abcda", "azaza", "eerie", "those", "sores", "llama",
    "allay", "level", "mamma", "sissy", "xylyl", "basis", "sassy", "trace", "crate", "speed",
];

#[test]
fn test_new_constraints_match_everything() {
    let constraints = Constraints::new(5);
    assert!(constraints.is_empty());
    for word in WORDS {
        assert!(constraints.matches(&w(word)));
    }
}

#[test]
fn test_hits_confirm_letters() {
    let mut constraints = Constraints::new(5);
    constraints.observe(&w("slate"), fb("bggbb")).unwrap();

    assert_eq!(constraints.confirmed(1), Some(b'l'));
    assert_eq!(constraints.confirmed(2), Some(b'a'));
    assert_eq!(constraints.confirmed(0), None);
    assert_eq!(constraints.absent().to_string(), "est");

    assert!(constraints.matches(&w("flaky")));
    assert!(!constraints.matches(&w("flask")));
    assert!(!constraints.matches(&w("plant")));
}

#[test]
fn test_miss_with_present_copy_is_not_absent() {
    // s is present, hit and missed in the same guess
    let pattern = compare(&w("basis"), &w("sassy"));
    assert_eq!(pattern.to_symbol_string(), "yggbb");

    let mut constraints = Constraints::new(5);
    constraints.observe(&w("sassy"), pattern).unwrap();
    assert!(!constraints.absent().contains(b's'));
    assert!(constraints.absent().contains(b'y'));
    assert!(constraints.matches(&w("basis")));
}

#[test]
fn test_miss_with_hit_copy_is_not_absent() {
    let pattern = compare(&w("creep"), &w("geese"));
    assert_eq!(pattern.to_symbol_string(), "bygbb");

    let mut constraints = Constraints::new(5);
    constraints.observe(&w("geese"), pattern).unwrap();
    assert!(!constraints.absent().contains(b'e'));
    assert!(constraints.absent().contains(b'g'));
    assert!(constraints.absent().contains(b's'));
    assert!(constraints.matches(&w("creep")));
}

#[test]
fn test_present_letters_are_required_elsewhere() {
    let mut constraints = Constraints::new(5);
    constraints.observe(&w("crane"), fb("ybbbb")).unwrap();

    assert_eq!(constraints.excluded_here(0).to_string(), "c");
    assert_eq!(constraints.required().to_string(), "c");
    assert!(constraints.matches(&w("stick")));
    assert!(!constraints.matches(&w("ctxxx")));
    assert!(!constraints.matches(&w("sties")));
}

#[test]
fn test_confirmed_letter_is_no_longer_required() {
    let mut constraints = Constraints::new(5);
    constraints.observe(&w("crane"), fb("ybbbb")).unwrap();
    constraints.observe(&w("stick"), fb("bbbgb")).unwrap();
    assert!(constraints.required().is_empty());
    assert_eq!(constraints.confirmed(3), Some(b'c'));
}

#[test]
fn test_target_always_matches_its_own_feedback() {
    for target in WORDS {
        let target = w(target);
        let mut constraints = Constraints::new(5);
        for guess in WORDS {
            let guess = w(guess);
            constraints.observe(&guess, compare(&target, &guess)).unwrap();
            assert!(
                constraints.matches(&target),
                "{} filtered out after guessing {}",
                target,
                guess
            );
        }
    }
}

#[test]
fn test_observe_is_idempotent() {
    let target = w("those");
    for guess in WORDS {
        let guess = w(guess);
        let pattern = compare(&target, &guess);

        let mut once = Constraints::new(5);
        once.observe(&guess, pattern).unwrap();
        let mut twice = once.clone();
        twice.observe(&guess, pattern).unwrap();

        assert_eq!(once, twice, "guess {}", guess);
    }
}

#[test]
fn test_conflicting_hit_is_rejected() {
    let mut constraints = Constraints::new(5);
    constraints.observe(&w("crane"), fb("gbbbb")).unwrap();
    let before = constraints.clone();

    let err = constraints.observe(&w("drone"), fb("gybbb")).unwrap_err();
    assert_eq!(
        err,
        ConstraintError::ConflictingHit {
            position: 0,
            confirmed: 'c',
            observed: 'd',
        }
    );
    assert_eq!(constraints, before);
}

#[test]
fn test_length_mismatch_is_rejected() {
    let mut constraints = Constraints::new(5);
    assert!(matches!(
        constraints.observe(&w("cranes"), fb("bbbbbb")),
        Err(ConstraintError::LengthMismatch { expected: 5, .. })
    ));
    assert!(matches!(
        constraints.observe(&w("crane"), fb("bbbb")),
        Err(ConstraintError::LengthMismatch { feedback: 4, .. })
    ));
    assert!(!constraints.matches(&w("cranes")));
}

#[test]
fn test_filter_removes_non_matching_words() {
    let mut words = pool(&["crane", "crate", "trace", "slate", "caret"]);
    let mut constraints = Constraints::new(5);
    constraints
        .observe(&w("crane"), compare(&w("crate"), &w("crane")))
        .unwrap();
    constraints.filter(&mut words);

    let left: Vec<&str> = words.iter().map(Word::as_str).collect();
    assert_eq!(left, ["crate"]);
}
