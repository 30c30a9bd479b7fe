use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

/// Record one vote and return the vote count for the target.
pub async fn add_kick_vote(
    room_id: &str,
    target_user_id: &str,
    voter_id: &str,
    redis: RedisClient,
) -> Result<usize, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let key = RedisKey::kick_votes(room_id, target_user_id);
    let _: () = conn
        .sadd(&key, voter_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    let votes: usize = conn.scard(&key).await.map_err(AppError::RedisCommandError)?;

    Ok(votes)
}

pub async fn clear_kick_votes(
    room_id: &str,
    target_user_id: &str,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::kick_votes(room_id, target_user_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

/// Wipe every kick-vote set in the room, used once a quorum fires.
pub async fn clear_all_kick_votes(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let keys: Vec<String> = redis::cmd("KEYS")
        .arg(RedisKey::kick_votes_pattern(room_id))
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if !keys.is_empty() {
        let _: () = conn.del(&keys).await.map_err(AppError::RedisCommandError)?;
    }

    Ok(())
}
