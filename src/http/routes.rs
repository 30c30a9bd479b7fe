use axum::{Router, routing::get};

use crate::{http::handlers::rooms, state::AppState};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(rooms::health))
        .route("/api/rooms/public", get(rooms::list_public_rooms))
        .route("/api/me/streak", get(rooms::my_streak))
        .with_state(state)
}
