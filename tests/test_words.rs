use std::collections::HashSet;

use sketchly_be::models::{
    room::Difficulty,
    word_catalog::{EASY_WORDS, HARD_WORDS, MEDIUM_WORDS, WORDS_PER_OFFER, sample_words, word_list},
};

#[test]
fn test_word_lists_load_and_are_distinct() {
    for list in [&*EASY_WORDS, &*MEDIUM_WORDS, &*HARD_WORDS] {
        assert!(list.len() >= WORDS_PER_OFFER);
        let unique: HashSet<&String> = list.iter().collect();
        assert_eq!(unique.len(), list.len());
    }
}

#[test]
fn test_word_list_routing() {
    assert_eq!(word_list(Difficulty::Easy).len(), EASY_WORDS.len());
    assert_eq!(word_list(Difficulty::Medium).len(), MEDIUM_WORDS.len());
    assert_eq!(word_list(Difficulty::Hard).len(), HARD_WORDS.len());
}

#[test]
fn test_sample_returns_three_distinct_catalog_words() {
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let words = sample_words(difficulty);
        assert_eq!(words.len(), WORDS_PER_OFFER);

        let unique: HashSet<&String> = words.iter().collect();
        assert_eq!(unique.len(), WORDS_PER_OFFER);

        for word in &words {
            assert!(word_list(difficulty).contains(word));
        }
    }
}

#[test]
fn test_words_are_lowercase_and_nonempty() {
    for list in [&*EASY_WORDS, &*MEDIUM_WORDS, &*HARD_WORDS] {
        for word in list.iter() {
            assert!(!word.is_empty());
            assert_eq!(*word, word.to_lowercase());
        }
    }
}

#[test]
fn test_catalog_contains_multiword_entries() {
    // Space- and hyphen-carrying words exercise the pre-reveal path.
    let has_special = |list: &[String]| list.iter().any(|w| w.contains(' ') || w.contains('-'));
    assert!(has_special(&EASY_WORDS));
    assert!(has_special(&MEDIUM_WORDS));
    assert!(has_special(&HARD_WORDS));
}
