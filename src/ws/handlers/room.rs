//! Per-connection room channel: validates client events and delegates to
//! the engine. One task per socket; everything a client can do enters the
//! system here.

use axum::{
    extract::{ConnectInfo, Path, Query, State, WebSocketUpgrade, ws::Message, ws::WebSocket},
    http::StatusCode,
    response::IntoResponse,
};
use futures::StreamExt;
use serde::Deserialize;
use std::net::SocketAddr;

use crate::{
    auth, db,
    games::sketch::{engine, lifecycle, reveal},
    models::{
        messages::{DrawingPayload, RoomClientMessage, RoomServerMessage},
        room::RoomStatus,
    },
    state::AppState,
    ws::{
        bus,
        handlers::utils::{remove_connection, store_connection},
    },
};

#[derive(Deserialize)]
pub struct WsQueryParams {
    pub token: String,
}

pub async fn room_ws_handler(
    ws: WebSocketUpgrade,
    Query(query): Query<WsQueryParams>,
    Path(room_id): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::info!("New WebSocket connection from {}", addr);

    let claims = auth::decode_token(&query.token, &state.config.jwt_secret)
        .map_err(|e| e.to_response())?;
    let user_id = claims.sub;

    if room_id.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Missing room id".into()));
    }

    Ok(ws.on_upgrade(move |socket| handle_room_socket(socket, room_id, user_id, state)))
}

async fn handle_room_socket(socket: WebSocket, room_id: String, user_id: String, state: AppState) {
    let (sender, mut receiver) = socket.split();

    store_connection(&user_id, &room_id, sender, &state).await;

    while let Some(msg_result) = receiver.next().await {
        let msg = match msg_result {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!("WebSocket error for {}: {}", user_id, e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                let parsed = match serde_json::from_str::<RoomClientMessage>(&text) {
                    Ok(msg) => msg,
                    Err(e) => {
                        tracing::info!("Invalid message format from {}: {}", user_id, e);
                        continue;
                    }
                };

                if let RoomClientMessage::Leave = parsed {
                    break;
                }

                dispatch(parsed, &room_id, &user_id, &state).await;
            }
            Message::Close(_) => {
                tracing::debug!("WebSocket close from {}", user_id);
                break;
            }
            _ => {}
        }
    }

    remove_connection(&user_id, &room_id, &state).await;

    if let Err(e) = lifecycle::leave_room(&room_id, &user_id, &state).await {
        tracing::error!("Failed to remove {} from {}: {}", user_id, room_id, e);
    }
}

async fn dispatch(msg: RoomClientMessage, room_id: &str, user_id: &str, state: &AppState) {
    match msg {
        RoomClientMessage::Join { room_opts } => {
            let opts = room_opts.unwrap_or_default();
            match lifecycle::join_room(room_id, user_id, &opts, state).await {
                Ok(info) => {
                    if info.status == RoomStatus::Active {
                        sync_late_joiner(room_id, user_id, state).await;
                    }
                }
                Err(e) => {
                    bus::send_to_user(
                        user_id,
                        &RoomServerMessage::Error {
                            message: e.to_string(),
                        },
                        &state.redis,
                    )
                    .await;
                }
            }
        }

        RoomClientMessage::StartGame => {
            let info = match db::room::get_room_info(room_id, state.redis.clone()).await {
                Ok(info) => info,
                Err(e) => {
                    tracing::error!("Failed to fetch room {}: {}", room_id, e);
                    return;
                }
            };

            if info.admin_id != user_id {
                send_error(user_id, "Only the admin can start the game", state).await;
                return;
            }
            if info.status == RoomStatus::Active {
                send_error(user_id, "Game already in progress", state).await;
                return;
            }

            let count = db::players::player_count(room_id, state.redis.clone())
                .await
                .unwrap_or(0);
            if count < 2 {
                send_error(user_id, "Need at least 2 players to start", state).await;
                return;
            }

            if let Err(e) = engine::start_round(room_id, state).await {
                tracing::error!("Failed to start game in {}: {}", room_id, e);
            }
        }

        RoomClientMessage::SelectWord { word } => {
            if let Err(e) = engine::select_word(room_id, user_id, &word, state).await {
                tracing::error!("Failed select_word in {}: {}", room_id, e);
            }
        }

        RoomClientMessage::NewMessage { message } => {
            if let Err(e) = engine::handle_guess(room_id, user_id, &message, state).await {
                tracing::error!("Failed guess handling in {}: {}", room_id, e);
            }
        }

        RoomClientMessage::Drawing(stroke) => {
            handle_drawing(room_id, user_id, stroke, state).await;
        }

        RoomClientMessage::DrawingClear => {
            let drawer = db::room::get_current_drawer(room_id, state.redis.clone())
                .await
                .unwrap_or_default();
            if drawer != user_id {
                return;
            }

            if let Err(e) = db::turn::clear_canvas(room_id, state.redis.clone()).await {
                tracing::error!("Failed to clear canvas in {}: {}", room_id, e);
                return;
            }
            bus::broadcast_room(room_id, &RoomServerMessage::DrawingClear, &state.redis).await;
        }

        RoomClientMessage::VoteKick { target_user_id } => {
            if let Err(e) = lifecycle::vote_kick(room_id, user_id, &target_user_id, state).await {
                tracing::error!("Failed kick vote in {}: {}", room_id, e);
            }
        }

        RoomClientMessage::Leave => {
            // Handled by the socket loop before dispatch.
        }

        RoomClientMessage::Ping { ts } => {
            let now = chrono::Utc::now().timestamp_millis() as u64;
            bus::send_to_user(
                user_id,
                &RoomServerMessage::Pong {
                    ts,
                    elapsed: now.saturating_sub(ts),
                },
                &state.redis,
            )
            .await;
        }
    }
}

async fn handle_drawing(room_id: &str, user_id: &str, stroke: DrawingPayload, state: &AppState) {
    let drawer = db::room::get_current_drawer(room_id, state.redis.clone())
        .await
        .unwrap_or_default();
    if drawer != user_id {
        return;
    }

    match serde_json::to_string(&stroke) {
        Ok(json) => {
            if let Err(e) = db::turn::append_stroke(room_id, &json, state.redis.clone()).await {
                tracing::error!("Failed to persist stroke in {}: {}", room_id, e);
            }
        }
        Err(e) => tracing::error!("Failed to serialize stroke: {}", e),
    }

    bus::broadcast_room(
        room_id,
        &RoomServerMessage::Drawing {
            user_id: user_id.to_string(),
            stroke,
        },
        &state.redis,
    )
    .await;
}

/// Catch a player who joined mid-turn up to the rest of the room.
async fn sync_late_joiner(room_id: &str, user_id: &str, state: &AppState) {
    match reveal::current_word_state(room_id, state.redis.clone()).await {
        Ok(Some(snapshot)) => {
            bus::send_to_user(
                user_id,
                &RoomServerMessage::WordState {
                    word_length: snapshot.word_length,
                    revealed_word: snapshot.revealed_word,
                    time_remaining: snapshot.time_remaining,
                    special_chars: snapshot.special_chars,
                },
                &state.redis,
            )
            .await;
        }
        Ok(None) => {}
        Err(e) => tracing::error!("Failed word-state sync for {}: {}", user_id, e),
    }

    match db::turn::get_canvas(room_id, state.redis.clone()).await {
        Ok(strokes) if !strokes.is_empty() => {
            let strokes: Vec<DrawingPayload> = strokes
                .iter()
                .filter_map(|json| serde_json::from_str(json).ok())
                .collect();
            bus::send_to_user(
                user_id,
                &RoomServerMessage::CanvasState { strokes },
                &state.redis,
            )
            .await;
        }
        Ok(_) => {}
        Err(e) => tracing::error!("Failed canvas sync for {}: {}", user_id, e),
    }

    match db::players::get_all_scores(room_id, state.redis.clone()).await {
        Ok(scores) => {
            for (uid, score) in scores {
                bus::send_to_user(
                    user_id,
                    &RoomServerMessage::ScoreUpdated {
                        user_id: uid,
                        score,
                        streak: None,
                        streak_bonus: None,
                    },
                    &state.redis,
                )
                .await;
            }
        }
        Err(e) => tracing::error!("Failed score sync for {}: {}", user_id, e),
    }
}

async fn send_error(user_id: &str, message: &str, state: &AppState) {
    bus::send_to_user(
        user_id,
        &RoomServerMessage::Error {
            message: message.to_string(),
        },
        &state.redis,
    )
    .await;
}
