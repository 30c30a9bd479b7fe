use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

pub async fn get_players(room_id: &str, redis: RedisClient) -> Result<Vec<String>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let players: Vec<String> = conn
        .smembers(RedisKey::room_players(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(players)
}

pub async fn player_count(room_id: &str, redis: RedisClient) -> Result<usize, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let count: usize = conn
        .scard(RedisKey::room_players(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(count)
}

pub async fn is_player(room_id: &str, user_id: &str, redis: RedisClient) -> Result<bool, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let is_member: bool = conn
        .sismember(RedisKey::room_players(room_id), user_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(is_member)
}
