use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

/// How much longer than the selection timer the mirror key lives. Expired
/// events carry only the key name, so the candidate list must survive until
/// the auto-pick handler reads it.
pub const SELECTION_MIRROR_GRACE_SECS: u64 = 5;

pub async fn set_current_word(
    room_id: &str,
    word: &str,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .set(RedisKey::current_word(room_id), word)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn get_current_word(
    room_id: &str,
    redis: RedisClient,
) -> Result<Option<String>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let word: Option<String> = conn
        .get(RedisKey::current_word(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(word.filter(|w| !w.is_empty()))
}

pub async fn delete_current_word(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::current_word(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

/// Mirror the offered candidates next to the selection timer.
pub async fn stash_selection_words(
    room_id: &str,
    words: &[String],
    timer_secs: u64,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let payload = serde_json::to_string(words)
        .map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set_ex(
            RedisKey::word_selection_words(room_id),
            payload,
            timer_secs + SELECTION_MIRROR_GRACE_SECS,
        )
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn get_selection_words(
    room_id: &str,
    redis: RedisClient,
) -> Result<Option<Vec<String>>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let payload: Option<String> = conn
        .get(RedisKey::word_selection_words(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    match payload {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| AppError::Deserialization(e.to_string())),
        None => Ok(None),
    }
}

pub async fn delete_selection_words(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::word_selection_words(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
