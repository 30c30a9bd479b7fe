//! Broadcast bus over Redis pub/sub.
//!
//! Engine code publishes frames on `room:<R>` / `user:<U>` channels; every
//! server process runs one relay that forwards frames to the WebSocket
//! connections it owns. That keeps replicas in sync without any cross-node
//! connection registry.

use axum::extract::ws::Message;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};

use crate::{
    errors::AppError,
    models::messages::RoomServerMessage,
    state::{AppState, ConnectionInfo, RedisClient},
};

#[derive(Debug, Serialize, Deserialize)]
struct BusFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude: Option<String>,
    payload: serde_json::Value,
}

/// Publish failures are logged and swallowed: a broadcast must never abort
/// a state transition that is already persisted.
async fn publish(channel: &str, frame: &BusFrame, redis: &RedisClient) {
    let payload = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize bus frame: {}", e);
            return;
        }
    };

    let mut conn = match redis.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("No connection for publish on {}: {}", channel, e);
            return;
        }
    };

    let res: Result<(), redis::RedisError> = redis::cmd("PUBLISH")
        .arg(channel)
        .arg(&payload)
        .query_async(&mut *conn)
        .await;

    if let Err(e) = res {
        tracing::error!("Failed to publish on {}: {}", channel, e);
    }
}

pub async fn broadcast_room(room_id: &str, msg: &RoomServerMessage, redis: &RedisClient) {
    let Ok(payload) = serde_json::to_value(msg) else {
        tracing::error!("Failed to serialize RoomServerMessage");
        return;
    };

    publish(
        &format!("room:{room_id}"),
        &BusFrame {
            exclude: None,
            payload,
        },
        redis,
    )
    .await;
}

/// Room broadcast that skips one user locally on every node (letter reveals
/// must not reach the drawer).
pub async fn broadcast_room_except(
    room_id: &str,
    exclude_user_id: &str,
    msg: &RoomServerMessage,
    redis: &RedisClient,
) {
    let Ok(payload) = serde_json::to_value(msg) else {
        tracing::error!("Failed to serialize RoomServerMessage");
        return;
    };

    publish(
        &format!("room:{room_id}"),
        &BusFrame {
            exclude: Some(exclude_user_id.to_string()),
            payload,
        },
        redis,
    )
    .await;
}

pub async fn send_to_user(user_id: &str, msg: &RoomServerMessage, redis: &RedisClient) {
    let Ok(payload) = serde_json::to_value(msg) else {
        tracing::error!("Failed to serialize RoomServerMessage");
        return;
    };

    publish(
        &format!("user:{user_id}"),
        &BusFrame {
            exclude: None,
            payload,
        },
        redis,
    )
    .await;
}

/// Forward bus frames to this node's sockets until the pub/sub connection
/// drops, then reconnect.
pub async fn run_relay(state: AppState) {
    loop {
        if let Err(e) = relay_once(&state).await {
            tracing::error!("Broadcast relay disconnected: {}", e);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn relay_once(state: &AppState) -> Result<(), AppError> {
    let mut pubsub = state
        .pubsub
        .get_async_pubsub()
        .await
        .map_err(AppError::RedisCommandError)?;

    pubsub
        .psubscribe("room:*")
        .await
        .map_err(AppError::RedisCommandError)?;
    pubsub
        .psubscribe("user:*")
        .await
        .map_err(AppError::RedisCommandError)?;

    tracing::info!("Broadcast relay subscribed to room:* and user:*");

    let mut stream = pubsub.on_message();
    while let Some(msg) = stream.next().await {
        let channel = msg.get_channel_name().to_string();
        let payload: String = match msg.get_payload() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Unreadable bus payload on {}: {}", channel, e);
                continue;
            }
        };

        let frame: BusFrame = match serde_json::from_str(&payload) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Malformed bus frame on {}: {}", channel, e);
                continue;
            }
        };

        let text = frame.payload.to_string();

        if let Some(room_id) = channel.strip_prefix("room:") {
            // Take the maps one at a time; holding both invites lock-order
            // trouble with the connection store.
            let users: Vec<String> = {
                let index = state.room_index.lock().await;
                index
                    .get(room_id)
                    .map(|users| {
                        users
                            .iter()
                            .filter(|u| frame.exclude.as_deref() != Some(u.as_str()))
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default()
            };
            let targets: Vec<Arc<ConnectionInfo>> = {
                let conns = state.connections.lock().await;
                users.iter().filter_map(|u| conns.get(u).cloned()).collect()
            };

            for conn in targets {
                let mut sender = conn.sender.lock().await;
                let _ = sender.send(Message::Text(text.clone().into())).await;
            }
        } else if let Some(user_id) = channel.strip_prefix("user:") {
            let conn = { state.connections.lock().await.get(user_id).cloned() };
            if let Some(conn) = conn {
                let mut sender = conn.sender.lock().await;
                let _ = sender.send(Message::Text(text.into())).await;
            }
        }
    }

    Ok(())
}
