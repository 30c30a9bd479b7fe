use redis::AsyncCommands;

use crate::{
    db::{players::player_count, room::get_room_info},
    errors::AppError,
    models::{redis::RedisKey, room::RoomType},
    state::RedisClient,
};

/// Recompute `public_rooms` membership for one room. A room is listed while
/// it is public, non-empty and has a free slot; late joins during an active
/// game are allowed, so status is not part of the predicate.
pub async fn refresh_public_room_index(room_id: &str, redis: RedisClient) -> Result<(), AppError> {
    let info = match get_room_info(room_id, redis.clone()).await {
        Ok(info) => info,
        Err(AppError::NotFound(_)) => {
            let mut conn = redis.get().await.map_err(|e| match e {
                bb8::RunError::User(err) => AppError::RedisCommandError(err),
                bb8::RunError::TimedOut => {
                    AppError::RedisPoolError("Redis connection timed out".into())
                }
            })?;
            let _: () = conn
                .srem(RedisKey::public_rooms(), room_id)
                .await
                .map_err(AppError::RedisCommandError)?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let count = player_count(room_id, redis.clone()).await?;
    let listed = info.room_type == RoomType::Public && count > 0 && count < info.max_players as usize;

    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    if listed {
        let _: () = conn
            .sadd(RedisKey::public_rooms(), room_id)
            .await
            .map_err(AppError::RedisCommandError)?;
    } else {
        let _: () = conn
            .srem(RedisKey::public_rooms(), room_id)
            .await
            .map_err(AppError::RedisCommandError)?;
    }

    Ok(())
}

pub async fn list_public_rooms(redis: RedisClient) -> Result<Vec<String>, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let rooms: Vec<String> = conn
        .smembers(RedisKey::public_rooms())
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(rooms)
}
