use std::{collections::HashMap, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const DEFAULT_MAX_ROUNDS: u32 = 3;
pub const DEFAULT_TURN_TIME: u64 = 60;
pub const DEFAULT_MAX_PLAYERS: u32 = 8;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Waiting,
    Active,
    Finished,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Waiting => "waiting",
            RoomStatus::Active => "active",
            RoomStatus::Finished => "finished",
        }
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(RoomStatus::Waiting),
            "active" => Ok(RoomStatus::Active),
            "finished" => Ok(RoomStatus::Finished),
            other => Err(format!("Unknown RoomStatus: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Public,
    Private,
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Public => "public",
            RoomType::Private => "private",
        }
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(RoomType::Public),
            "private" => Ok(RoomType::Private),
            other => Err(format!("Unknown RoomType: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("Unknown Difficulty: {}", other)),
        }
    }
}

/// Per-room settings a client may supply when creating a room on first join.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RoomOptions {
    pub max_rounds: Option<u32>,
    pub turn_time: Option<u64>,
    pub hints_allowed: Option<bool>,
    pub difficulty: Option<Difficulty>,
    pub max_players: Option<u32>,
    pub room_type: Option<RoomType>,
}

/// The `room:{R}:info` hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomInfo {
    pub status: RoomStatus,
    pub max_rounds: u32,
    pub current_round: u32,
    /// Empty string means no drawer.
    pub current_drawer: String,
    pub admin_id: String,
    pub room_type: RoomType,
    pub max_players: u32,
    pub turn_time: u64,
    pub hints_allowed: bool,
    pub difficulty: Difficulty,
}

impl RoomInfo {
    pub fn new(admin_id: &str, opts: &RoomOptions) -> Self {
        Self {
            status: RoomStatus::Waiting,
            max_rounds: opts.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS),
            current_round: 0,
            current_drawer: String::new(),
            admin_id: admin_id.to_string(),
            room_type: opts.room_type.unwrap_or(RoomType::Public),
            max_players: opts.max_players.unwrap_or(DEFAULT_MAX_PLAYERS),
            turn_time: opts.turn_time.unwrap_or(DEFAULT_TURN_TIME),
            hints_allowed: opts.hints_allowed.unwrap_or(true),
            difficulty: opts.difficulty.unwrap_or(Difficulty::Medium),
        }
    }

    pub fn to_redis_hash(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("status".into(), self.status.as_str().to_string());
        map.insert("max_rounds".into(), self.max_rounds.to_string());
        map.insert("current_round".into(), self.current_round.to_string());
        map.insert("current_drawer".into(), self.current_drawer.clone());
        map.insert("admin_id".into(), self.admin_id.clone());
        map.insert("room_type".into(), self.room_type.as_str().to_string());
        map.insert("max_players".into(), self.max_players.to_string());
        map.insert("turn_time".into(), self.turn_time.to_string());
        map.insert("hints_allowed".into(), self.hints_allowed.to_string());
        map.insert("difficulty".into(), self.difficulty.as_str().to_string());
        map
    }

    pub fn from_redis_hash(map: &HashMap<String, String>) -> Result<Self, AppError> {
        Ok(Self {
            status: map
                .get("status")
                .ok_or_else(|| AppError::Deserialization("Missing status".into()))?
                .parse()
                .map_err(|_| AppError::Deserialization("Invalid status".into()))?,

            max_rounds: map
                .get("max_rounds")
                .ok_or_else(|| AppError::Deserialization("Missing max_rounds".into()))?
                .parse()
                .map_err(|_| AppError::Deserialization("Invalid max_rounds".into()))?,

            current_round: map
                .get("current_round")
                .ok_or_else(|| AppError::Deserialization("Missing current_round".into()))?
                .parse()
                .map_err(|_| AppError::Deserialization("Invalid current_round".into()))?,

            current_drawer: map.get("current_drawer").cloned().unwrap_or_default(),

            admin_id: map.get("admin_id").cloned().unwrap_or_default(),

            room_type: map
                .get("room_type")
                .map(|s| s.parse())
                .transpose()
                .map_err(|_| AppError::Deserialization("Invalid room_type".into()))?
                .unwrap_or(RoomType::Public),

            max_players: map
                .get("max_players")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_PLAYERS),

            turn_time: map
                .get("turn_time")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TURN_TIME),

            hints_allowed: map
                .get("hints_allowed")
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),

            difficulty: map
                .get("difficulty")
                .map(|s| s.parse())
                .transpose()
                .map_err(|_| AppError::Deserialization("Invalid difficulty".into()))?
                .unwrap_or(Difficulty::Medium),
        })
    }
}

/// Public-room listing entry for the discovery API.
#[derive(Debug, Serialize)]
pub struct PublicRoomEntry {
    pub room_id: String,
    pub status: RoomStatus,
    pub player_count: usize,
    pub max_players: u32,
    pub difficulty: Difficulty,
}
