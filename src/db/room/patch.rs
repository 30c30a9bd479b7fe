use redis::AsyncCommands;

use crate::{
    errors::AppError,
    models::{redis::RedisKey, room::RoomStatus},
    state::RedisClient,
};

pub async fn set_room_status(
    room_id: &str,
    status: RoomStatus,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .hset(RedisKey::room_info(room_id), "status", status.as_str())
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

/// Pass an empty string for "no drawer".
pub async fn set_current_drawer(
    room_id: &str,
    drawer_id: &str,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .hset(RedisKey::room_info(room_id), "current_drawer", drawer_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn set_admin(room_id: &str, admin_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .hset(RedisKey::room_info(room_id), "admin_id", admin_id)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

pub async fn set_current_round(
    room_id: &str,
    round: u32,
    redis: RedisClient,
) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let _: () = conn
        .hset(RedisKey::room_info(room_id), "current_round", round)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}

/// Back to the pre-game state: waiting, round 0, no drawer. Settings keep
/// whatever the room was created with.
pub async fn reset_room(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let key = RedisKey::room_info(room_id);
    let _: () = conn
        .hset_multiple(
            &key,
            &[
                ("status", RoomStatus::Waiting.as_str().to_string()),
                ("current_round", "0".to_string()),
                ("current_drawer", String::new()),
            ],
        )
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(())
}
