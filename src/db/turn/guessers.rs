use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

/// Mark a player as having guessed this turn. Returns their 1-based rank
/// (the set cardinality after the add), which drives the rank bonus.
pub async fn add_non_eligible_guesser(
    room_id: &str,
    round: u32,
    user_id: &str,
    redis: RedisClient,
) -> Result<usize, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let key = RedisKey::non_eligible_guessers(room_id, round);
    let _: () = conn
        .sadd(&key, user_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    let rank: usize = conn.scard(&key).await.map_err(AppError::RedisCommandError)?;

    Ok(rank)
}

pub async fn is_non_eligible_guesser(
    room_id: &str,
    round: u32,
    user_id: &str,
    redis: RedisClient,
) -> Result<bool, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let is_member: bool = conn
        .sismember(RedisKey::non_eligible_guessers(room_id, round), user_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(is_member)
}

pub async fn get_non_eligible_guessers(
    room_id: &str,
    round: u32,
    redis: RedisClient,
) -> Result<Vec<String>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let guessers: Vec<String> = conn
        .smembers(RedisKey::non_eligible_guessers(room_id, round))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(guessers)
}

pub async fn remove_non_eligible_guesser(
    room_id: &str,
    round: u32,
    user_id: &str,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .srem(RedisKey::non_eligible_guessers(room_id, round), user_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn delete_non_eligible_guessers(
    room_id: &str,
    round: u32,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::non_eligible_guessers(room_id, round))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
