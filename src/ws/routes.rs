use axum::{Router, routing::get};

use crate::{state::AppState, ws::handlers::room_ws_handler};

pub fn create_ws_routes(state: AppState) -> Router {
    Router::new()
        .route("/ws/room/{room_id}", get(room_ws_handler))
        .with_state(state)
}
