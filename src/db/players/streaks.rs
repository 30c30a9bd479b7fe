use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

/// Streaks live per user, not per room: a player keeps their run going
/// across rooms until a turn ends without them guessing.
pub async fn increment_streak(user_id: &str, redis: RedisClient) -> Result<i64, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let streak: i64 = conn
        .incr(RedisKey::player_streak(user_id), 1)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(streak)
}

pub async fn get_streak(user_id: &str, redis: RedisClient) -> Result<i64, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let streak: Option<i64> = conn
        .get(RedisKey::player_streak(user_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(streak.unwrap_or(0))
}

pub async fn reset_streak(user_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::player_streak(user_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
