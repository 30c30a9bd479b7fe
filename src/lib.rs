pub mod auth;
pub mod db;
pub mod errors;
pub mod games;
pub mod http;
pub mod middleware;
pub mod models;
pub mod state;
pub mod ws;

use std::net::SocketAddr;

use state::AppState;

pub async fn start_server() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let state = AppState::new()
        .await
        .expect("Failed to initialize application state");

    // One relay and one timer watcher per process; both reconnect on their
    // own when the pub/sub link drops.
    tokio::spawn(ws::bus::run_relay(state.clone()));
    tokio::spawn(games::sketch::timer_watcher::run(state.clone()));

    let limiter = middleware::create_global_rate_limiter();

    let app = http::routes::create_http_routes(state.clone())
        .merge(ws::routes::create_ws_routes(state.clone()))
        .layer(axum::middleware::from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                middleware::rate_limit_middleware(limiter.clone(), req, next)
            },
        ))
        .layer(middleware::cors_layer())
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", state.config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind address");

    tracing::info!("Server running at http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
