use axum::extract::ws::{Message, WebSocket};
use futures::stream::SplitSink;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::state::{AppState, ConnectionInfo};

pub async fn store_connection(
    user_id: &str,
    room_id: &str,
    sender: SplitSink<WebSocket, Message>,
    state: &AppState,
) {
    let conn_info = ConnectionInfo {
        user_id: user_id.to_string(),
        room_id: room_id.to_string(),
        sender: Arc::new(Mutex::new(sender)),
    };

    // Never hold both maps at once; the relay takes them one at a time too.
    {
        let mut conns = state.connections.lock().await;
        conns.insert(user_id.to_string(), Arc::new(conn_info));
    }
    {
        let mut index = state.room_index.lock().await;
        index
            .entry(room_id.to_string())
            .or_default()
            .insert(user_id.to_string());
    }

    tracing::debug!("Stored connection for {} in room {}", user_id, room_id);
}

pub async fn remove_connection(user_id: &str, room_id: &str, state: &AppState) {
    {
        let mut conns = state.connections.lock().await;
        if conns.remove(user_id).is_some() {
            tracing::debug!("Removed connection for {}", user_id);
        }
    }

    let mut index = state.room_index.lock().await;
    if let Some(users) = index.get_mut(room_id) {
        users.remove(user_id);
        if users.is_empty() {
            index.remove(room_id);
        }
    }
}
