use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::room::RoomOptions;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingPayload {
    pub draw_mode: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub paths: Vec<PathPoint>,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecialChar {
    pub index: usize,
    pub char: char,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnOverReason {
    Timeout,
    AllGuessed,
    DrawerLeft,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomClientMessage {
    /// Identity comes from the connection token, never the payload.
    Join {
        #[serde(default)]
        room_opts: Option<RoomOptions>,
    },
    StartGame,
    SelectWord {
        word: String,
    },
    NewMessage {
        message: String,
    },
    Drawing(DrawingPayload),
    DrawingClear,
    VoteKick {
        target_user_id: String,
    },
    Leave,
    Ping {
        ts: u64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomServerMessage {
    DrawerAssigned {
        round: u32,
        drawer: String,
    },
    /// Targeted at the drawer only.
    SelectWord {
        words: Vec<String>,
    },
    TurnStarted {
        word_length: usize,
        time_remaining: u64,
        special_chars: Vec<SpecialChar>,
        auto_selected: bool,
    },
    /// Broadcast to everyone except the current drawer.
    LetterReveal {
        revealed_word: Vec<String>,
    },
    NewMessage {
        message: String,
        user_id: String,
        ts: i64,
    },
    SimilarWord {
        user_id: String,
        message: String,
    },
    CorrectGuess {
        user_id: String,
    },
    ScoreUpdated {
        user_id: String,
        score: i64,
        #[serde(skip_serializing_if = "Option::is_none")]
        streak: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        streak_bonus: Option<i64>,
    },
    TurnOver {
        reason: TurnOverReason,
        word: String,
    },
    GameOver {
        scores: HashMap<String, i64>,
    },
    AdminChanged {
        admin_id: String,
    },
    PlayerKicked {
        player_id: String,
    },
    /// Targeted at the drawer when the selection timer auto-picked.
    WordAutoSelected {
        word: String,
    },
    PlayersUpdated {
        players: Vec<String>,
    },
    /// Targeted late-join sync of the in-flight turn.
    WordState {
        word_length: usize,
        revealed_word: Vec<String>,
        time_remaining: u64,
        special_chars: Vec<SpecialChar>,
    },
    /// Targeted late-join replay of the drawer's strokes so far.
    CanvasState {
        strokes: Vec<DrawingPayload>,
    },
    Drawing {
        user_id: String,
        #[serde(flatten)]
        stroke: DrawingPayload,
    },
    DrawingClear,
    Pong {
        ts: u64,
        elapsed: u64,
    },
    Error {
        message: String,
    },
}
