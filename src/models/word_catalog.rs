use once_cell::sync::Lazy;
use rand::seq::IndexedRandom;

use crate::models::room::Difficulty;

pub const WORDS_PER_OFFER: usize = 3;

fn load_word_list(json: &str) -> Vec<String> {
    serde_json::from_str(json).expect("Failed to parse bundled word list")
}

pub static EASY_WORDS: Lazy<Vec<String>> =
    Lazy::new(|| load_word_list(include_str!("../assets/words_easy.json")));

pub static MEDIUM_WORDS: Lazy<Vec<String>> =
    Lazy::new(|| load_word_list(include_str!("../assets/words_medium.json")));

pub static HARD_WORDS: Lazy<Vec<String>> =
    Lazy::new(|| load_word_list(include_str!("../assets/words_hard.json")));

pub fn word_list(difficulty: Difficulty) -> &'static [String] {
    match difficulty {
        Difficulty::Easy => &EASY_WORDS,
        Difficulty::Medium => &MEDIUM_WORDS,
        Difficulty::Hard => &HARD_WORDS,
    }
}

/// Sample three distinct words for the drawer to choose from.
pub fn sample_words(difficulty: Difficulty) -> Vec<String> {
    let mut rng = rand::rng();
    word_list(difficulty)
        .choose_multiple(&mut rng, WORDS_PER_OFFER)
        .cloned()
        .collect()
}
