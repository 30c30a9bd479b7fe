use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

pub const WORD_SELECTION_SECS: u64 = 10;
pub const TURN_TRANSITION_SECS: u64 = 3;

/// SETEX rejects a zero TTL, so a zero-second turn becomes a 1 ms PX expiry
/// (the timer fires effectively immediately, which is the required behavior).
async fn set_expiring_sentinel(
    key: &str,
    value: &str,
    secs: u64,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    if secs == 0 {
        let _: () = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("PX")
            .arg(1)
            .query_async(&mut *conn)
            .await
            .map_err(AppError::RedisCommandError)?;
    } else {
        let _: () = conn
            .set_ex(key, value, secs)
            .await
            .map_err(AppError::RedisCommandError)?;
    }

    Ok(())
}

pub async fn start_turn_timer(room_id: &str, secs: u64, redis: RedisClient) -> Result<(), AppError> {
    set_expiring_sentinel(&RedisKey::turn_timer(room_id), "active", secs, redis).await
}

/// Seconds left on the current turn; 0 once the timer is gone.
pub async fn turn_time_remaining(room_id: &str, redis: RedisClient) -> Result<u64, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    // TTL returns -2 for a missing key and -1 for one without expiry.
    let ttl: i64 = conn
        .ttl(RedisKey::turn_timer(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(ttl.max(0) as u64)
}

pub async fn start_reveal_timer(
    room_id: &str,
    secs: u64,
    redis: RedisClient,
) -> Result<(), AppError> {
    set_expiring_sentinel(&RedisKey::reveal_timer(room_id), "reveal_letter", secs, redis).await
}

/// The timer key carries the candidate list itself; a mirror with a grace
/// TTL is stashed separately by the caller for post-expiry recovery.
pub async fn start_word_selection_timer(
    room_id: &str,
    words_json: &str,
    redis: RedisClient,
) -> Result<(), AppError> {
    set_expiring_sentinel(
        &RedisKey::word_selection_timer(room_id),
        words_json,
        WORD_SELECTION_SECS,
        redis,
    )
    .await
}

pub async fn start_turn_transition_timer(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    set_expiring_sentinel(
        &RedisKey::turn_transition_timer(room_id),
        "next_turn",
        TURN_TRANSITION_SECS,
        redis,
    )
    .await
}

/// Remove every timer key of a room (game end, reset, orphan cleanup).
pub async fn clear_game_timers(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let keys = [
        RedisKey::turn_timer(room_id),
        RedisKey::reveal_timer(room_id),
        RedisKey::word_selection_timer(room_id),
        RedisKey::word_selection_words(room_id),
        RedisKey::turn_transition_timer(room_id),
    ];

    let _: () = conn.del(&keys).await.map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn delete_turn_timer(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::turn_timer(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn delete_reveal_timer(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::reveal_timer(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn delete_word_selection_timer(
    room_id: &str,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::word_selection_timer(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
