use redis::AsyncCommands;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

/// Strokes are appended in draw order so a late joiner can replay them.
pub async fn append_stroke(
    room_id: &str,
    stroke_json: &str,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .rpush(RedisKey::canvas(room_id), stroke_json)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn get_canvas(room_id: &str, redis: RedisClient) -> Result<Vec<String>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let strokes: Vec<String> = conn
        .lrange(RedisKey::canvas(room_id), 0, -1)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(strokes)
}

pub async fn clear_canvas(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .del(RedisKey::canvas(room_id))
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
