use std::collections::HashMap;

use redis::AsyncCommands;

use crate::{
    db::room::reset_room,
    errors::AppError,
    models::{
        redis::RedisKey,
        room::{RoomInfo, RoomOptions, RoomStatus},
    },
    state::RedisClient,
};

/// Fetch the room hash, creating it on first join. A `finished` room is
/// reset back to its initial waiting state instead of being recreated, so
/// settings survive between games.
pub async fn get_or_init_room(
    room_id: &str,
    admin_id: &str,
    opts: &RoomOptions,
    redis: RedisClient,
) -> Result<RoomInfo, AppError> {
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
        let info = RoomInfo::new(admin_id, opts);
        let pairs: Vec<(String, String)> = info.to_redis_hash().into_iter().collect();
        let _: () = conn
            .hset_multiple(&key, &pairs)
            .await
            .map_err(AppError::RedisCommandError)?;
        tracing::info!("Created room {} with admin {}", room_id, admin_id);
        return Ok(info);
    }

    let mut info = RoomInfo::from_redis_hash(&map)?;
    if info.status == RoomStatus::Finished {
        reset_room(room_id, redis.clone()).await?;
        info.status = RoomStatus::Waiting;
        info.current_round = 0;
        info.current_drawer = String::new();
    }

    Ok(info)
}
