use std::collections::HashMap;

use redis::AsyncCommands;

use crate::{
    errors::AppError,
    models::{
        redis::RedisKey,
        room::{RoomInfo, RoomStatus},
    },
    state::RedisClient,
};

pub async fn get_room_info(room_id: &str, redis: RedisClient) -> Result<RoomInfo, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let key = RedisKey::room_info(room_id);
    let map: HashMap<String, String> = conn
        .hgetall(&key)
        .await
        .map_err(AppError::RedisCommandError)?;

    if map.is_empty() {
        return Err(AppError::NotFound(format!("Room {} not found", room_id)));
    }

    RoomInfo::from_redis_hash(&map)
}

pub async fn get_room_status(room_id: &str, redis: RedisClient) -> Result<RoomStatus, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let status: Option<String> = conn
        .hget(RedisKey::room_info(room_id), "status")
        .await
        .map_err(AppError::RedisCommandError)?;

    status
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))?
        .parse()
        .map_err(|_| AppError::Deserialization("Invalid status".into()))
}

/// Empty string means no drawer is assigned.
pub async fn get_current_drawer(room_id: &str, redis: RedisClient) -> Result<String, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let drawer: Option<String> = conn
        .hget(RedisKey::room_info(room_id), "current_drawer")
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(drawer.unwrap_or_default())
}
