use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

/// Indices visible to guessers, persisted as a JSON int array. Missing key
/// reads as empty.
pub async fn get_revealed_indices(
    room_id: &str,
    redis: RedisClient,
) -> Result<Vec<usize>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let payload: Option<String> = conn
        .get(RedisKey::revealed_indices(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    match payload {
        Some(json) => {
            serde_json::from_str(&json).map_err(|e| AppError::Deserialization(e.to_string()))
        }
        None => Ok(Vec::new()),
    }
}

pub async fn set_revealed_indices(
    room_id: &str,
    indices: &[usize],
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let payload = serde_json::to_string(indices)
        .map_err(|e| AppError::Serialization(e.to_string()))?;

    let _: () = conn
        .set(RedisKey::revealed_indices(room_id), payload)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn delete_revealed_indices(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::revealed_indices(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
