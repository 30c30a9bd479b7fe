//! The per-room turn state machine:
//! waiting -> selecting drawer -> offering words -> drawing -> turn over,
//! looping until every round is played. All authority lives in Redis; this
//! module only sequences commands and broadcasts, so any replica can drive
//! any transition.

use crate::{
    db,
    errors::AppError,
    models::{
        messages::{RoomServerMessage, TurnOverReason},
        room::{RoomInfo, RoomStatus},
        word_catalog,
    },
    state::AppState,
    ws::bus,
};

/// Advance the room: pick the next drawer and offer them words, rolling
/// over into the next round or ending the game when drawers run out.
/// Idempotent in the sense that a finished room simply restarts.
pub async fn start_round(room_id: &str, state: &AppState) -> Result<(), AppError> {
    let redis = state.redis.clone();
    let info = db::room::get_room_info(room_id, redis.clone()).await?;
    let mut current_round = info.current_round;

    // A start on a finished room restarts it from scratch.
    if info.status == RoomStatus::Finished {
        db::room::reset_room(room_id, redis.clone()).await?;
        current_round = 0;
    }

    if current_round == 0 {
        db::players::clear_all_scores(room_id, redis.clone()).await?;
        let players = db::players::get_players(room_id, redis.clone()).await?;
        for user_id in &players {
            bus::broadcast_room(
                room_id,
                &RoomServerMessage::ScoreUpdated {
                    user_id: user_id.clone(),
                    score: 0,
                    streak: None,
                    streak_bonus: None,
                },
                &redis,
            )
            .await;
        }
    }

    db::turn::delete_non_eligible_guessers(room_id, current_round, redis.clone()).await?;
    db::room::set_room_status(room_id, RoomStatus::Active, redis.clone()).await?;

    loop {
        match db::turn::pop_eligible_drawer(room_id, current_round, redis.clone()).await? {
            Some(drawer) => {
                // SPOP can hand back someone who already left the room.
                if !db::players::is_player(room_id, &drawer, redis.clone()).await? {
                    tracing::debug!("Skipping departed drawer {} in {}", drawer, room_id);
                    continue;
                }

                db::room::set_current_drawer(room_id, &drawer, redis.clone()).await?;
                bus::broadcast_room(
                    room_id,
                    &RoomServerMessage::DrawerAssigned {
                        round: current_round,
                        drawer: drawer.clone(),
                    },
                    &redis,
                )
                .await;

                let words = word_catalog::sample_words(info.difficulty);
                let words_json = serde_json::to_string(&words)
                    .map_err(|e| AppError::Serialization(e.to_string()))?;

                db::turn::stash_selection_words(
                    room_id,
                    &words,
                    db::turn::WORD_SELECTION_SECS,
                    redis.clone(),
                )
                .await?;
                db::turn::start_word_selection_timer(room_id, &words_json, redis.clone()).await?;

                bus::send_to_user(&drawer, &RoomServerMessage::SelectWord { words }, &redis).await;

                tracing::info!(
                    "Round {} in {}: {} is drawing",
                    current_round,
                    room_id,
                    drawer
                );
                return Ok(());
            }
            None if current_round >= info.max_rounds => {
                return end_game(room_id, state).await;
            }
            None => {
                current_round += 1;
                db::room::set_current_round(room_id, current_round, redis.clone()).await?;

                let players = db::players::get_players(room_id, redis.clone()).await?;
                if players.is_empty() {
                    tracing::warn!("No players left to draw in {}", room_id);
                    return end_game(room_id, state).await;
                }
                db::turn::populate_eligible_drawers(
                    room_id,
                    current_round,
                    &players,
                    redis.clone(),
                )
                .await?;
            }
        }
    }
}

/// Tear the game down: final scores out, counters wiped, room back to its
/// waiting state.
pub async fn end_game(room_id: &str, state: &AppState) -> Result<(), AppError> {
    let redis = state.redis.clone();

    let scores = db::players::get_all_scores(room_id, redis.clone()).await?;
    let players = db::players::get_players(room_id, redis.clone()).await?;
    let round = db::room::get_room_info(room_id, redis.clone())
        .await
        .map(|i| i.current_round)
        .unwrap_or(0);

    db::players::clear_all_scores(room_id, redis.clone()).await?;
    for user_id in &players {
        if let Err(e) = db::players::reset_streak(user_id, redis.clone()).await {
            tracing::error!("Failed to reset streak for {}: {}", user_id, e);
        }
    }

    db::room::set_room_status(room_id, RoomStatus::Finished, redis.clone()).await?;
    db::room::set_current_drawer(room_id, "", redis.clone()).await?;

    bus::broadcast_room(room_id, &RoomServerMessage::GameOver { scores }, &redis).await;

    db::turn::clear_game_timers(room_id, redis.clone()).await?;
    db::turn::delete_current_word(room_id, redis.clone()).await?;
    db::turn::delete_revealed_indices(room_id, redis.clone()).await?;
    db::turn::delete_non_eligible_guessers(room_id, round, redis.clone()).await?;
    db::turn::clear_canvas(room_id, redis.clone()).await?;

    db::room::reset_room(room_id, redis.clone()).await?;
    db::players::refresh_public_room_index(room_id, redis.clone()).await?;

    tracing::info!("Game over in room {}", room_id);
    Ok(())
}

/// Shared entry for both the drawer picking a word and the auto-pick on
/// selection timeout.
pub async fn begin_turn(
    room_id: &str,
    info: &RoomInfo,
    word: &str,
    auto_selected: bool,
    state: &AppState,
) -> Result<(), AppError> {
    let redis = state.redis.clone();
    let turn = super::reveal::start_turn(room_id, word, info, redis.clone()).await?;

    bus::broadcast_room(
        room_id,
        &RoomServerMessage::TurnStarted {
            word_length: turn.word_length,
            time_remaining: turn.time_remaining,
            special_chars: turn.special_chars,
            auto_selected,
        },
        &redis,
    )
    .await;

    Ok(())
}

/// Drawer action. Anyone else (or a stale drawer after the turn moved on)
/// is ignored without feedback.
pub async fn select_word(
    room_id: &str,
    user_id: &str,
    word: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let redis = state.redis.clone();
    let info = db::room::get_room_info(room_id, redis.clone()).await?;

    if info.status != RoomStatus::Active || info.current_drawer != user_id {
        tracing::debug!("Ignoring select_word from {} in {}", user_id, room_id);
        return Ok(());
    }

    db::turn::delete_word_selection_timer(room_id, redis.clone()).await?;
    db::turn::delete_selection_words(room_id, redis.clone()).await?;

    begin_turn(room_id, &info, word, false, state).await
}

/// Route one chat line: correct guesses score, near misses hint, everything
/// else is chat.
pub async fn handle_guess(
    room_id: &str,
    user_id: &str,
    message: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let redis = state.redis.clone();

    let info = match db::room::get_room_info(room_id, redis.clone()).await {
        Ok(info) => info,
        Err(AppError::NotFound(_)) => {
            broadcast_chat(room_id, user_id, message, state).await;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if info.status != RoomStatus::Active {
        broadcast_chat(room_id, user_id, message, state).await;
        return Ok(());
    }

    let word = db::turn::get_current_word(room_id, redis.clone()).await?;

    if user_id == info.current_drawer {
        // The drawer must not leak the word into chat.
        match &word {
            Some(w) if message.to_lowercase() == w.to_lowercase() => {}
            _ => broadcast_chat(room_id, user_id, message, state).await,
        }
        return Ok(());
    }

    let Some(word) = word else {
        broadcast_chat(room_id, user_id, message, state).await;
        return Ok(());
    };

    if message.to_lowercase() == word.to_lowercase() {
        handle_correct_guess(room_id, user_id, &info, &word, state).await
    } else if super::similarity::similar(message, &word) {
        bus::broadcast_room(
            room_id,
            &RoomServerMessage::SimilarWord {
                user_id: user_id.to_string(),
                message: message.to_string(),
            },
            &redis,
        )
        .await;
        broadcast_chat(room_id, user_id, message, state).await;
        Ok(())
    } else {
        broadcast_chat(room_id, user_id, message, state).await;
        Ok(())
    }
}

async fn handle_correct_guess(
    room_id: &str,
    user_id: &str,
    info: &RoomInfo,
    word: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let redis = state.redis.clone();
    let round = info.current_round;

    // A second correct submission from the same player scores nothing and
    // stays invisible.
    if db::turn::is_non_eligible_guesser(room_id, round, user_id, redis.clone()).await? {
        return Ok(());
    }

    let rank = db::turn::add_non_eligible_guesser(room_id, round, user_id, redis.clone()).await?;
    let time_remaining = db::turn::turn_time_remaining(room_id, redis.clone()).await?;
    let streak = db::players::increment_streak(user_id, redis.clone()).await?;

    let score =
        super::scoring::score_correct_guess(time_remaining, info.turn_time, rank, streak);

    let guesser_total =
        db::players::increment_score(room_id, user_id, score.guesser_points, redis.clone()).await?;

    bus::broadcast_room(
        room_id,
        &RoomServerMessage::CorrectGuess {
            user_id: user_id.to_string(),
        },
        &redis,
    )
    .await;

    bus::broadcast_room(
        room_id,
        &RoomServerMessage::ScoreUpdated {
            user_id: user_id.to_string(),
            score: guesser_total,
            streak: Some(streak),
            streak_bonus: Some(score.streak_bonus),
        },
        &redis,
    )
    .await;

    if score.drawer_points > 0 {
        let drawer_total = db::players::increment_score(
            room_id,
            &info.current_drawer,
            score.drawer_points,
            redis.clone(),
        )
        .await?;

        bus::broadcast_room(
            room_id,
            &RoomServerMessage::ScoreUpdated {
                user_id: info.current_drawer.clone(),
                score: drawer_total,
                streak: None,
                streak_bonus: None,
            },
            &redis,
        )
        .await;
    }

    let players = db::players::player_count(room_id, redis.clone()).await?;
    if players > 1 && rank == players - 1 {
        award_all_guessed_bonus(room_id, &info.current_drawer, state).await?;
        end_turn(room_id, round, TurnOverReason::AllGuessed, word, state).await?;
    }

    Ok(())
}

async fn award_all_guessed_bonus(
    room_id: &str,
    drawer: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let redis = state.redis.clone();
    let total = db::players::increment_score(
        room_id,
        drawer,
        super::scoring::ALL_GUESSED_BONUS,
        redis.clone(),
    )
    .await?;

    bus::broadcast_room(
        room_id,
        &RoomServerMessage::ScoreUpdated {
            user_id: drawer.to_string(),
            score: total,
            streak: None,
            streak_bonus: None,
        },
        &redis,
    )
    .await;

    Ok(())
}

/// Close the current turn: announce the word, punish broken streaks, wipe
/// the turn keys and arm the transition timer that drives the next
/// `start_round`.
pub async fn end_turn(
    room_id: &str,
    round: u32,
    reason: TurnOverReason,
    word: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let redis = state.redis.clone();

    bus::broadcast_room(
        room_id,
        &RoomServerMessage::TurnOver {
            reason,
            word: word.to_string(),
        },
        &redis,
    )
    .await;

    // Every non-drawer who failed to guess loses their streak, whatever
    // ended the turn.
    let players = db::players::get_players(room_id, redis.clone()).await?;
    let drawer = db::room::get_current_drawer(room_id, redis.clone()).await?;
    let guessers = db::turn::get_non_eligible_guessers(room_id, round, redis.clone()).await?;

    for user_id in &players {
        if *user_id != drawer && !guessers.contains(user_id) {
            if let Err(e) = db::players::reset_streak(user_id, redis.clone()).await {
                tracing::error!("Failed to reset streak for {}: {}", user_id, e);
            }
        }
    }

    db::turn::delete_current_word(room_id, redis.clone()).await?;
    db::turn::delete_revealed_indices(room_id, redis.clone()).await?;
    db::turn::delete_turn_timer(room_id, redis.clone()).await?;
    db::turn::delete_reveal_timer(room_id, redis.clone()).await?;
    db::room::set_current_drawer(room_id, "", redis.clone()).await?;

    db::turn::start_turn_transition_timer(room_id, redis.clone()).await?;

    tracing::info!("Turn over in {} ({:?})", room_id, reason);
    Ok(())
}

/// The drawer disconnected. With a word in play the turn ends visibly;
/// during word selection the room skips straight to the next drawer.
pub async fn handle_drawer_left(room_id: &str, state: &AppState) -> Result<(), AppError> {
    let redis = state.redis.clone();
    let info = db::room::get_room_info(room_id, redis.clone()).await?;

    db::turn::delete_word_selection_timer(room_id, redis.clone()).await?;
    db::turn::delete_selection_words(room_id, redis.clone()).await?;

    match db::turn::get_current_word(room_id, redis.clone()).await? {
        Some(word) => {
            end_turn(
                room_id,
                info.current_round,
                TurnOverReason::DrawerLeft,
                &word,
                state,
            )
            .await
        }
        None => {
            db::room::set_current_drawer(room_id, "", redis.clone()).await?;
            db::turn::start_turn_transition_timer(room_id, redis.clone()).await?;
            Ok(())
        }
    }
}

/// A guesser left mid-turn. Their streak dies if they had not solved, and
/// if everyone still present has solved, the turn completes as all-guessed.
pub async fn check_all_guessed_after_leave(
    room_id: &str,
    drawer: &str,
    round: u32,
    leaver: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let redis = state.redis.clone();

    let guessers = db::turn::get_non_eligible_guessers(room_id, round, redis.clone()).await?;
    if leaver != drawer && !guessers.iter().any(|g| g == leaver) {
        if let Err(e) = db::players::reset_streak(leaver, redis.clone()).await {
            tracing::error!("Failed to reset streak for {}: {}", leaver, e);
        }
    }

    let players = db::players::get_players(room_id, redis.clone()).await?;
    let non_drawers: Vec<&String> = players.iter().filter(|p| *p != drawer).collect();

    if non_drawers.is_empty() || !non_drawers.iter().all(|p| guessers.contains(*p)) {
        return Ok(());
    }

    let Some(word) = db::turn::get_current_word(room_id, redis.clone()).await? else {
        return Ok(());
    };

    award_all_guessed_bonus(room_id, drawer, state).await?;
    end_turn(room_id, round, TurnOverReason::AllGuessed, &word, state).await
}

async fn broadcast_chat(room_id: &str, user_id: &str, message: &str, state: &AppState) {
    bus::broadcast_room(
        room_id,
        &RoomServerMessage::NewMessage {
            message: message.to_string(),
            user_id: user_id.to_string(),
            ts: chrono::Utc::now().timestamp_millis(),
        },
        &state.redis,
    )
    .await;
}
