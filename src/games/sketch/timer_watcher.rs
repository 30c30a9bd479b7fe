//! Turns Redis key expirations into game transitions.
//!
//! Every replica subscribes to `__keyevent@<db>__:expired`, so each expiry
//! is delivered once per process. The SET-NX-PX handler lock is what keeps
//! a transition from firing more than once; losers drop the event silently.

use std::time::Duration;

use rand::seq::IndexedRandom;

use crate::{
    db,
    errors::AppError,
    games::sketch::{engine, reveal},
    models::{
        messages::{RoomServerMessage, TurnOverReason},
        redis::RedisKey,
        room::RoomStatus,
        word_catalog,
    },
    state::AppState,
    ws::bus,
};

pub async fn run(state: AppState) {
    db::store::enable_keyspace_events(state.redis.clone()).await;

    loop {
        let res = db::store::subscribe_expired_keys(&state.pubsub, state.config.redis_db, |key| {
            let state = state.clone();
            async move { handle_expired_key(&key, &state).await }
        })
        .await;

        match res {
            Ok(()) => tracing::warn!("Keyspace subscription ended, reconnecting"),
            Err(e) => tracing::error!("Keyspace subscription failed: {}", e),
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

pub async fn handle_expired_key(key: &str, state: &AppState) {
    let Some((room_id, suffix)) = RedisKey::parse_room_key(key) else {
        return;
    };
    let room_id = room_id.to_string();

    let result = match suffix {
        "timer" => on_turn_timeout(&room_id, key, state).await,
        "reveal_timer" => on_reveal_timer(&room_id, key, state).await,
        "word_selection_timer" => on_word_selection_timeout(&room_id, key, state).await,
        "turn_transition_timer" => on_turn_transition(&room_id, key, state).await,
        _ => Ok(()),
    };

    if let Err(e) = result {
        tracing::error!("Expiry handler failed for {}: {}", key, e);
    }
}

/// Leftover timers for a room that is no longer playing must not linger.
async fn cleanup_orphan_turn_keys(room_id: &str, state: &AppState) -> Result<(), AppError> {
    let redis = state.redis.clone();
    db::turn::clear_game_timers(room_id, redis.clone()).await?;
    db::turn::delete_current_word(room_id, redis.clone()).await?;
    db::turn::delete_revealed_indices(room_id, redis).await?;
    Ok(())
}

/// `room:{R}:timer` expired: the drawing time is up.
async fn on_turn_timeout(room_id: &str, key: &str, state: &AppState) -> Result<(), AppError> {
    let redis = state.redis.clone();

    let info = match db::room::get_room_info(room_id, redis.clone()).await {
        Ok(info) => info,
        Err(AppError::NotFound(_)) => return Ok(()),
        Err(e) => return Err(e),
    };

    if info.status != RoomStatus::Active {
        return cleanup_orphan_turn_keys(room_id, state).await;
    }

    let Some(word) = db::turn::get_current_word(room_id, redis.clone()).await? else {
        return Ok(());
    };

    // The word discriminates the lock so a stale lock from the previous
    // turn cannot suppress this one.
    if !db::store::acquire_handler_lock(key, &word, &state.config.node_id, redis.clone()).await? {
        return Ok(());
    }

    engine::end_turn(
        room_id,
        info.current_round,
        TurnOverReason::Timeout,
        &word,
        state,
    )
    .await
}

/// `room:{R}:reveal_timer` expired: surface one more letter to guessers.
async fn on_reveal_timer(room_id: &str, key: &str, state: &AppState) -> Result<(), AppError> {
    let redis = state.redis.clone();

    let info = match db::room::get_room_info(room_id, redis.clone()).await {
        Ok(info) => info,
        Err(AppError::NotFound(_)) => return Ok(()),
        Err(e) => return Err(e),
    };

    if info.status != RoomStatus::Active {
        return cleanup_orphan_turn_keys(room_id, state).await;
    }

    if !info.hints_allowed {
        return Ok(());
    }

    let Some(word) = db::turn::get_current_word(room_id, redis.clone()).await? else {
        return Ok(());
    };

    if !db::store::acquire_handler_lock(key, &word, &state.config.node_id, redis.clone()).await? {
        return Ok(());
    }

    let outcome = match reveal::reveal_next_letter(room_id, redis.clone()).await {
        Ok(outcome) => outcome,
        // The turn ended between the expiry and this read.
        Err(AppError::WordNotFound) => return Ok(()),
        Err(e) => return Err(e),
    };

    bus::broadcast_room_except(
        room_id,
        &info.current_drawer,
        &RoomServerMessage::LetterReveal {
            revealed_word: outcome.revealed_word,
        },
        &redis,
    )
    .await;

    if !outcome.fully_revealed {
        reveal::start_next_reveal_timer(
            room_id,
            word.chars().count(),
            info.hints_allowed,
            redis.clone(),
        )
        .await?;
    }

    Ok(())
}

/// `room:{R}:word_selection_timer` expired: the drawer never picked, so the
/// engine picks for them from the mirrored candidate list.
async fn on_word_selection_timeout(
    room_id: &str,
    key: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let redis = state.redis.clone();

    let info = match db::room::get_room_info(room_id, redis.clone()).await {
        Ok(info) => info,
        Err(AppError::NotFound(_)) => return Ok(()),
        Err(e) => return Err(e),
    };

    if info.status != RoomStatus::Active {
        db::turn::delete_selection_words(room_id, redis.clone()).await?;
        return Ok(());
    }

    if info.current_drawer.is_empty() {
        return Ok(());
    }

    if !db::store::acquire_handler_lock(key, room_id, &state.config.node_id, redis.clone()).await? {
        return Ok(());
    }

    let words = match db::turn::get_selection_words(room_id, redis.clone()).await? {
        Some(words) if !words.is_empty() => words,
        _ => {
            tracing::warn!(
                "Candidate mirror missing for {}, resampling {:?}",
                room_id,
                info.difficulty
            );
            word_catalog::sample_words(info.difficulty)
        }
    };

    let word = {
        let mut rng = rand::rng();
        words.choose(&mut rng).cloned().unwrap_or_default()
    };
    if word.is_empty() {
        return Ok(());
    }

    db::turn::delete_selection_words(room_id, redis.clone()).await?;

    engine::begin_turn(room_id, &info, &word, true, state).await?;

    bus::send_to_user(
        &info.current_drawer,
        &RoomServerMessage::WordAutoSelected { word },
        &redis,
    )
    .await;

    Ok(())
}

/// `room:{R}:turn_transition_timer` expired: the turn-over animation is
/// done, move the room along.
async fn on_turn_transition(room_id: &str, key: &str, state: &AppState) -> Result<(), AppError> {
    let redis = state.redis.clone();

    if !db::store::acquire_handler_lock(key, room_id, &state.config.node_id, redis.clone()).await? {
        return Ok(());
    }

    let status = match db::room::get_room_status(room_id, redis.clone()).await {
        Ok(status) => status,
        Err(AppError::NotFound(_)) => return Ok(()),
        Err(e) => return Err(e),
    };

    if status != RoomStatus::Active {
        return Ok(());
    }

    engine::start_round(room_id, state).await
}
