use axum::{Json, extract::State, http::StatusCode};

use crate::{auth::AuthClaims, db, models::room::PublicRoomEntry, state::AppState};

/// Joinable public rooms, straight from the availability index.
pub async fn list_public_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicRoomEntry>>, (StatusCode, String)> {
    let room_ids = db::players::list_public_rooms(state.redis.clone())
        .await
        .map_err(|e| e.to_response())?;

    let mut rooms = Vec::with_capacity(room_ids.len());
    for room_id in room_ids {
        match db::room::get_room_info(&room_id, state.redis.clone()).await {
            Ok(info) => {
                let player_count = db::players::player_count(&room_id, state.redis.clone())
                    .await
                    .unwrap_or(0);
                rooms.push(PublicRoomEntry {
                    room_id,
                    status: info.status,
                    player_count,
                    max_players: info.max_players,
                    difficulty: info.difficulty,
                });
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable public room {}: {}", room_id, e);
            }
        }
    }

    Ok(Json(rooms))
}

/// The caller's live streak counter (streaks persist across rooms).
pub async fn my_streak(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let streak = db::players::get_streak(&claims.sub, state.redis.clone())
        .await
        .map_err(|e| e.to_response())?;

    Ok(Json(serde_json::json!({
        "user_id": claims.sub,
        "streak": streak,
    })))
}

pub async fn health() -> &'static str {
    "ok"
}
