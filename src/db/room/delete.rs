use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

/// Drop every `room:{R}:*` key and the public-rooms entry once the player
/// set is empty. Returns true if the sweep ran.
pub async fn cleanup_room_if_empty(room_id: &str, redis: RedisClient) -> Result<bool, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let count: usize = conn
        .scard(RedisKey::room_players(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    if count > 0 {
        return Ok(false);
    }

    let keys: Vec<String> = redis::cmd("KEYS")
        .arg(RedisKey::room_pattern(room_id))
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    if !keys.is_empty() {
        let _: () = conn.del(&keys).await.map_err(AppError::RedisCommandError)?;
    }

    let _: () = conn
        .srem(RedisKey::public_rooms(), room_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!("Cleaned up empty room {}", room_id);
    Ok(true)
}
