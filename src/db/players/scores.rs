use std::collections::HashMap;

use redis::AsyncCommands;

use crate::{db::players::get_players, errors::AppError, models::redis::RedisKey, state::RedisClient};

/// Atomic across replicas; returns the new total.
pub async fn increment_score(
    room_id: &str,
    user_id: &str,
    delta: i64,
    redis: RedisClient,
) -> Result<i64, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let new_total: i64 = conn
        .incr(RedisKey::player_score(room_id, user_id), delta)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(new_total)
}

/// Score table for every current player; missing keys read as 0.
pub async fn get_all_scores(
    room_id: &str,
    redis: RedisClient,
) -> Result<HashMap<String, i64>, AppError> {
    let players = get_players(room_id, redis.clone()).await?;

    if players.is_empty() {
        return Ok(HashMap::new());
    }

    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let mut pipe = redis::pipe();
    for user_id in &players {
        pipe.cmd("GET").arg(RedisKey::player_score(room_id, user_id));
    }

    let scores: Vec<Option<i64>> = pipe
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(players
        .into_iter()
        .zip(scores)
        .map(|(user_id, score)| (user_id, score.unwrap_or(0)))
        .collect())
}

pub async fn clear_all_scores(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let keys: Vec<String> = redis::cmd("KEYS")
        .arg(RedisKey::player_score_pattern(room_id))
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if !keys.is_empty() {
        let _: () = conn.del(&keys).await.map_err(AppError::RedisCommandError)?;
    }

    Ok(())
}
