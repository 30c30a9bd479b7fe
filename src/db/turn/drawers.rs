use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

/// Seed the round's eligible-drawer set from the current players.
pub async fn populate_eligible_drawers(
    room_id: &str,
    round: u32,
    players: &[String],
    redis: RedisClient,
) -> Result<(), AppError> {
    if players.is_empty() {
        return Ok(());
    }

    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .sadd(RedisKey::eligible_drawers(room_id, round), players)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

/// Random pick-and-remove; `None` means everyone has drawn this round.
pub async fn pop_eligible_drawer(
    room_id: &str,
    round: u32,
    redis: RedisClient,
) -> Result<Option<String>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let drawer: Option<String> = conn
        .spop(RedisKey::eligible_drawers(room_id, round))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(drawer)
}
