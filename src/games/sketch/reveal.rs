//! Partial-letter reveal: spaces and hyphens are visible from the start,
//! then one random letter surfaces on every reveal-timer tick.

use crate::{
    db,
    errors::AppError,
    models::{messages::SpecialChar, room::RoomInfo},
    state::RedisClient,
};

/// Positions of spaces and hyphens, pre-revealed to guessers.
pub fn special_char_indices(word: &str) -> Vec<usize> {
    word.chars()
        .enumerate()
        .filter(|(_, c)| *c == ' ' || *c == '-')
        .map(|(i, _)| i)
        .collect()
}

pub fn special_chars(word: &str) -> Vec<SpecialChar> {
    word.chars()
        .enumerate()
        .filter(|(_, c)| *c == ' ' || *c == '-')
        .map(|(index, char)| SpecialChar { index, char })
        .collect()
}

/// Render the word for guessers: revealed positions show the character,
/// everything else an underscore.
pub fn masked_word(word: &str, revealed: &[usize]) -> Vec<String> {
    word.chars()
        .enumerate()
        .map(|(i, c)| {
            if revealed.contains(&i) {
                c.to_string()
            } else {
                "_".to_string()
            }
        })
        .collect()
}

/// Seconds between reveals once the first hint is out: short words reveal
/// slowly, long words faster, never below one second.
pub fn reveal_interval(word_len: usize) -> u64 {
    if word_len == 0 {
        return 1;
    }
    (60 / word_len as u64).max(1)
}

#[derive(Debug, Clone)]
pub struct TurnStart {
    pub word_length: usize,
    pub time_remaining: u64,
    pub special_chars: Vec<SpecialChar>,
}

#[derive(Debug, Clone)]
pub struct RevealOutcome {
    pub revealed_word: Vec<String>,
    pub fully_revealed: bool,
}

/// Arm a new drawing turn: wipe the previous turn's canvas, reveals and
/// word, persist the chosen word, start the turn timer and (with hints on
/// and at least two characters) the first reveal timer at half the turn.
pub async fn start_turn(
    room_id: &str,
    word: &str,
    info: &RoomInfo,
    redis: RedisClient,
) -> Result<TurnStart, AppError> {
    db::turn::clear_canvas(room_id, redis.clone()).await?;
    db::turn::delete_revealed_indices(room_id, redis.clone()).await?;
    db::turn::delete_current_word(room_id, redis.clone()).await?;

    let initial = special_char_indices(word);
    if !initial.is_empty() {
        db::turn::set_revealed_indices(room_id, &initial, redis.clone()).await?;
    }

    db::turn::set_current_word(room_id, word, redis.clone()).await?;
    db::turn::start_turn_timer(room_id, info.turn_time, redis.clone()).await?;

    let word_length = word.chars().count();
    if info.hints_allowed && word_length >= 2 {
        db::turn::start_reveal_timer(room_id, info.turn_time / 2, redis.clone()).await?;
    }

    Ok(TurnStart {
        word_length,
        time_remaining: info.turn_time,
        special_chars: special_chars(word),
    })
}

/// Expose one more random letter and persist the grown index set.
pub async fn reveal_next_letter(
    room_id: &str,
    redis: RedisClient,
) -> Result<RevealOutcome, AppError> {
    let word = db::turn::get_current_word(room_id, redis.clone())
        .await?
        .ok_or(AppError::WordNotFound)?;

    let mut revealed = db::turn::get_revealed_indices(room_id, redis.clone()).await?;
    for idx in special_char_indices(&word) {
        if !revealed.contains(&idx) {
            revealed.push(idx);
        }
    }

    let word_length = word.chars().count();
    let remaining: Vec<usize> = (0..word_length)
        .filter(|i| !revealed.contains(i))
        .collect();

    if remaining.is_empty() {
        return Ok(RevealOutcome {
            revealed_word: word.chars().map(|c| c.to_string()).collect(),
            fully_revealed: true,
        });
    }

    let pick = {
        let mut rng = rand::rng();
        use rand::seq::IndexedRandom;
        *remaining.choose(&mut rng).expect("remaining is non-empty")
    };
    revealed.push(pick);
    revealed.sort_unstable();

    db::turn::set_revealed_indices(room_id, &revealed, redis.clone()).await?;

    Ok(RevealOutcome {
        revealed_word: masked_word(&word, &revealed),
        fully_revealed: remaining.len() == 1,
    })
}

/// Schedule the next reveal tick. Errors out instead of arming a timer when
/// the room has hints turned off.
pub async fn start_next_reveal_timer(
    room_id: &str,
    word_length: usize,
    hints_allowed: bool,
    redis: RedisClient,
) -> Result<(), AppError> {
    if !hints_allowed {
        return Err(AppError::HintsDisabled);
    }

    db::turn::start_reveal_timer(room_id, reveal_interval(word_length), redis).await
}

#[derive(Debug, Clone)]
pub struct WordStateSnapshot {
    pub word_length: usize,
    pub revealed_word: Vec<String>,
    pub time_remaining: u64,
    pub special_chars: Vec<SpecialChar>,
}

/// Current turn as a late-joining client should see it; `None` when no word
/// is in play.
pub async fn current_word_state(
    room_id: &str,
    redis: RedisClient,
) -> Result<Option<WordStateSnapshot>, AppError> {
    let Some(word) = db::turn::get_current_word(room_id, redis.clone()).await? else {
        return Ok(None);
    };

    let mut revealed = db::turn::get_revealed_indices(room_id, redis.clone()).await?;
    for idx in special_char_indices(&word) {
        if !revealed.contains(&idx) {
            revealed.push(idx);
        }
    }

    let time_remaining = db::turn::turn_time_remaining(room_id, redis.clone()).await?;

    Ok(Some(WordStateSnapshot {
        word_length: word.chars().count(),
        revealed_word: masked_word(&word, &revealed),
        time_remaining,
        special_chars: special_chars(&word),
    }))
}
