use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

pub async fn add_player(room_id: &str, user_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .sadd(RedisKey::room_players(room_id), user_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn remove_player(
    room_id: &str,
    user_id: &str,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .srem(RedisKey::room_players(room_id), user_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
