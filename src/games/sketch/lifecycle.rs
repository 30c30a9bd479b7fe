//! Player lifecycle: joining, leaving and kick votes. Leaving is the
//! delicate one; the steps run in a fixed order because removing a player
//! can complete the turn, hand off the admin seat or end the whole game.

use rand::seq::IndexedRandom;

use crate::{
    db,
    errors::AppError,
    games::sketch::engine,
    models::{
        messages::RoomServerMessage,
        room::{RoomInfo, RoomOptions, RoomStatus},
    },
    state::AppState,
    ws::bus,
};

/// First join creates the room (the joiner becomes admin); later joins just
/// grow the player set. Returns the room info for the post-join sync.
pub async fn join_room(
    room_id: &str,
    user_id: &str,
    opts: &RoomOptions,
    state: &AppState,
) -> Result<RoomInfo, AppError> {
    let redis = state.redis.clone();

    let info = db::room::get_or_init_room(room_id, user_id, opts, redis.clone()).await?;

    if !db::players::is_player(room_id, user_id, redis.clone()).await? {
        let count = db::players::player_count(room_id, redis.clone()).await?;
        if count >= info.max_players as usize {
            return Err(AppError::BadRequest("Room is full".into()));
        }
    }

    db::players::add_player(room_id, user_id, redis.clone()).await?;
    db::players::refresh_public_room_index(room_id, redis.clone()).await?;

    let players = db::players::get_players(room_id, redis.clone()).await?;
    bus::broadcast_room(room_id, &RoomServerMessage::PlayersUpdated { players }, &redis).await;

    tracing::info!("Player {} joined room {}", user_id, room_id);
    Ok(info)
}

/// The ordered leave path (also the tail end of a kick). Safe to call for a
/// user who already left; it degrades to an empty-room check.
pub async fn leave_room(room_id: &str, user_id: &str, state: &AppState) -> Result<(), AppError> {
    let redis = state.redis.clone();

    let info = match db::room::get_room_info(room_id, redis.clone()).await {
        Ok(info) => info,
        Err(AppError::NotFound(_)) => return Ok(()),
        Err(e) => return Err(e),
    };

    if !db::players::is_player(room_id, user_id, redis.clone()).await? {
        db::room::cleanup_room_if_empty(room_id, redis.clone()).await?;
        return Ok(());
    }

    db::players::remove_player(room_id, user_id, redis.clone()).await?;
    db::players::clear_kick_votes(room_id, user_id, redis.clone()).await?;

    if info.status == RoomStatus::Active {
        db::turn::remove_non_eligible_guesser(room_id, info.current_round, user_id, redis.clone())
            .await?;
    }

    if info.status == RoomStatus::Active && info.current_drawer == user_id {
        if let Err(e) = engine::handle_drawer_left(room_id, state).await {
            tracing::error!("Failed drawer-left handling in {}: {}", room_id, e);
        }
    } else if info.status == RoomStatus::Active && !info.current_drawer.is_empty() {
        // The leaver may have been the last outstanding guesser.
        if let Err(e) = engine::check_all_guessed_after_leave(
            room_id,
            &info.current_drawer,
            info.current_round,
            user_id,
            state,
        )
        .await
        {
            tracing::error!("Failed all-guessed check in {}: {}", room_id, e);
        }
    }

    let remaining = db::players::get_players(room_id, redis.clone()).await?;

    if info.admin_id == user_id {
        let new_admin = {
            let mut rng = rand::rng();
            remaining.choose(&mut rng).cloned()
        };
        match new_admin {
            Some(admin_id) => {
                db::room::set_admin(room_id, &admin_id, redis.clone()).await?;
                bus::broadcast_room(
                    room_id,
                    &RoomServerMessage::AdminChanged { admin_id },
                    &redis,
                )
                .await;
            }
            None => db::room::set_admin(room_id, "", redis.clone()).await?,
        }
    }

    if remaining.len() == 1 && info.status == RoomStatus::Active {
        // A one-player game cannot continue.
        if let Err(e) = engine::end_game(room_id, state).await {
            tracing::error!("Failed to end game in {}: {}", room_id, e);
        }
    }

    if !remaining.is_empty() {
        bus::broadcast_room(
            room_id,
            &RoomServerMessage::PlayersUpdated { players: remaining },
            &redis,
        )
        .await;
    }

    db::players::refresh_public_room_index(room_id, redis.clone()).await?;
    db::room::cleanup_room_if_empty(room_id, redis.clone()).await?;

    tracing::info!("Player {} left room {}", user_id, room_id);
    Ok(())
}

/// Majority vote to eject a player. Preconditions are silent no-ops by
/// design: probing the kick system yields no feedback.
pub async fn vote_kick(
    room_id: &str,
    voter_id: &str,
    target_user_id: &str,
    state: &AppState,
) -> Result<(), AppError> {
    let redis = state.redis.clone();

    if voter_id == target_user_id {
        return Ok(());
    }
    if !db::players::is_player(room_id, voter_id, redis.clone()).await?
        || !db::players::is_player(room_id, target_user_id, redis.clone()).await?
    {
        return Ok(());
    }

    let votes =
        db::players::add_kick_vote(room_id, target_user_id, voter_id, redis.clone()).await?;
    let count = db::players::player_count(room_id, redis.clone()).await?;
    let required = (count + 1) / 2;

    tracing::debug!(
        "Kick vote in {}: {}/{} against {}",
        room_id,
        votes,
        required,
        target_user_id
    );

    if votes >= required {
        bus::broadcast_room(
            room_id,
            &RoomServerMessage::PlayerKicked {
                player_id: target_user_id.to_string(),
            },
            &redis,
        )
        .await;

        db::players::clear_all_kick_votes(room_id, redis.clone()).await?;
        leave_room(room_id, target_user_id, state).await?;
    }

    Ok(())
}
