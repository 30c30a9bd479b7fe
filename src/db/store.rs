use futures::StreamExt;

use crate::{errors::AppError, models::redis::RedisKey, state::RedisClient};

pub const HANDLER_LOCK_TTL_MS: u64 = 5_000;

/// Claim the expiry handler for one timer across replicas.
///
/// `SET lock:<timer-key>:<discriminator> <node_id> NX PX 5000`. Returns true
/// only for the single replica that wins; losers must drop the event.
pub async fn acquire_handler_lock(
    timer_key: &str,
    discriminator: &str,
    node_id: &str,
    redis: RedisClient,
) -> Result<bool, AppError> {
    let mut conn = redis.get().await.map_err(|e| match e {
        bb8::RunError::User(err) => AppError::RedisCommandError(err),
        bb8::RunError::TimedOut => AppError::RedisPoolError("Redis connection timed out".into()),
    })?;

    let key = RedisKey::handler_lock(timer_key, discriminator);

    let res: Option<String> = redis::cmd("SET")
        .arg(&key)
        .arg(node_id)
        .arg("NX")
        .arg("PX")
        .arg(HANDLER_LOCK_TTL_MS)
        .query_async(&mut *conn)
        .await
        .map_err(AppError::RedisCommandError)?;

    Ok(res.is_some())
}

/// Turn on expired-key notifications so the timer watcher has something to
/// listen to. Managed Redis offerings sometimes refuse CONFIG; the watcher is
/// inert then and we only log.
pub async fn enable_keyspace_events(redis: RedisClient) {
    let mut conn = match redis.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!("Could not get connection for CONFIG SET: {}", e);
            return;
        }
    };

    let res: Result<(), redis::RedisError> = redis::cmd("CONFIG")
        .arg("SET")
        .arg("notify-keyspace-events")
        .arg("Ex")
        .query_async(&mut *conn)
        .await;

    if let Err(e) = res {
        tracing::warn!(
            "Failed to enable keyspace notifications (set notify-keyspace-events Ex manually): {}",
            e
        );
    }
}

/// Subscribe to `__keyevent@<db>__:expired` and hand each expired key name to
/// the callback. Runs until the pub/sub connection dies.
pub async fn subscribe_expired_keys<F, Fut>(
    client: &redis::Client,
    db: i64,
    mut on_expired: F,
) -> Result<(), AppError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut pubsub = client
        .get_async_pubsub()
        .await
        .map_err(AppError::RedisCommandError)?;

    let channel = format!("__keyevent@{db}__:expired");
    pubsub
        .subscribe(&channel)
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!("Subscribed to keyspace expirations on {}", channel);

    let mut stream = pubsub.on_message();
    while let Some(msg) = stream.next().await {
        match msg.get_payload::<String>() {
            Ok(key) => on_expired(key).await,
            Err(e) => tracing::warn!("Unreadable expired-key payload: {}", e),
        }
    }

    Ok(())
}
