use axum::extract::ws::{Message, WebSocket};
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use futures::stream::SplitSink;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub redis_url: String,
    pub pubsub_url: String,
    pub redis_db: i64,
    pub node_id: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, crate::errors::AppError> {
        let redis_url = std::env::var("REDIS_URL")
            .map_err(|_| crate::errors::AppError::EnvError("REDIS_URL must be set".into()))?;
        let pubsub_url = std::env::var("PUBSUB_URL").unwrap_or_else(|_| redis_url.clone());
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| crate::errors::AppError::EnvError("JWT_SECRET must be set".into()))?;
        let redis_db = std::env::var("REDIS_DB")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        let node_id =
            std::env::var("NODE_ID").unwrap_or_else(|_| Uuid::new_v4().to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3001);

        Ok(Self {
            jwt_secret,
            redis_url,
            pubsub_url,
            redis_db,
            node_id,
            port,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub redis: RedisClient,
    /// Dedicated client for pub/sub connections (broadcast bus + keyspace events).
    pub pubsub: redis::Client,
    pub connections: ConnectionInfoMap,
    pub room_index: RoomIndex,
}

impl AppState {
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let config = AppConfig::from_env()?;

        let manager = RedisConnectionManager::new(config.redis_url.clone())?;
        let redis_pool = Pool::builder()
            .max_size(100)
            .min_idle(Some(10))
            .connection_timeout(Duration::from_secs(2))
            .max_lifetime(Some(Duration::from_secs(300)))
            .idle_timeout(Some(Duration::from_secs(30)))
            .build(manager)
            .await?;

        let pubsub = redis::Client::open(config.pubsub_url.clone())?;

        Ok(Self {
            config,
            redis: redis_pool,
            pubsub,
            connections: Default::default(),
            room_index: Default::default(),
        })
    }
}

#[derive(Debug)]
pub struct ConnectionInfo {
    pub user_id: String,
    pub room_id: String,
    pub sender: Arc<Mutex<SplitSink<WebSocket, Message>>>,
}

/// All websocket connections on this node, keyed by user id.
pub type ConnectionInfoMap = Arc<Mutex<HashMap<String, Arc<ConnectionInfo>>>>;

/// room id -> user ids connected to this node.
pub type RoomIndex = Arc<Mutex<HashMap<String, HashSet<String>>>>;

pub type RedisClient = Pool<RedisConnectionManager>;
