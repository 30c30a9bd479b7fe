use std::collections::HashMap;

use sketchly_be::models::room::{
    DEFAULT_MAX_PLAYERS, DEFAULT_MAX_ROUNDS, DEFAULT_TURN_TIME, Difficulty, RoomInfo, RoomOptions,
    RoomStatus, RoomType,
};

#[test]
fn test_new_room_defaults() {
    let info = RoomInfo::new("admin1", &RoomOptions::default());
    assert_eq!(info.status, RoomStatus::Waiting);
    assert_eq!(info.max_rounds, DEFAULT_MAX_ROUNDS);
    assert_eq!(info.current_round, 0);
    assert_eq!(info.current_drawer, "");
    assert_eq!(info.admin_id, "admin1");
    assert_eq!(info.room_type, RoomType::Public);
    assert_eq!(info.max_players, DEFAULT_MAX_PLAYERS);
    assert_eq!(info.turn_time, DEFAULT_TURN_TIME);
    assert!(info.hints_allowed);
    assert_eq!(info.difficulty, Difficulty::Medium);
}

#[test]
fn test_options_override_defaults() {
    let opts = RoomOptions {
        max_rounds: Some(1),
        turn_time: Some(30),
        hints_allowed: Some(false),
        difficulty: Some(Difficulty::Easy),
        max_players: Some(4),
        room_type: Some(RoomType::Private),
    };
    let info = RoomInfo::new("admin1", &opts);
    assert_eq!(info.max_rounds, 1);
    assert_eq!(info.turn_time, 30);
    assert!(!info.hints_allowed);
    assert_eq!(info.difficulty, Difficulty::Easy);
    assert_eq!(info.max_players, 4);
    assert_eq!(info.room_type, RoomType::Private);
}

#[test]
fn test_redis_hash_round_trip() {
    let opts = RoomOptions {
        max_rounds: Some(5),
        turn_time: Some(90),
        hints_allowed: Some(false),
        difficulty: Some(Difficulty::Hard),
        max_players: Some(12),
        room_type: Some(RoomType::Private),
    };
    let mut info = RoomInfo::new("admin1", &opts);
    info.status = RoomStatus::Active;
    info.current_round = 2;
    info.current_drawer = "u7".to_string();

    let map = info.to_redis_hash();
    let parsed = RoomInfo::from_redis_hash(&map).unwrap();

    assert_eq!(parsed.status, RoomStatus::Active);
    assert_eq!(parsed.max_rounds, 5);
    assert_eq!(parsed.current_round, 2);
    assert_eq!(parsed.current_drawer, "u7");
    assert_eq!(parsed.admin_id, "admin1");
    assert_eq!(parsed.room_type, RoomType::Private);
    assert_eq!(parsed.max_players, 12);
    assert_eq!(parsed.turn_time, 90);
    assert!(!parsed.hints_allowed);
    assert_eq!(parsed.difficulty, Difficulty::Hard);
}

#[test]
fn test_from_hash_tolerates_missing_optional_fields() {
    // Hashes written by older nodes may miss newer settings fields.
    let mut map = HashMap::new();
    map.insert("status".to_string(), "waiting".to_string());
    map.insert("max_rounds".to_string(), "3".to_string());
    map.insert("current_round".to_string(), "0".to_string());

    let info = RoomInfo::from_redis_hash(&map).unwrap();
    assert_eq!(info.current_drawer, "");
    assert_eq!(info.admin_id, "");
    assert_eq!(info.room_type, RoomType::Public);
    assert_eq!(info.turn_time, DEFAULT_TURN_TIME);
    assert!(info.hints_allowed);
    assert_eq!(info.difficulty, Difficulty::Medium);
}

#[test]
fn test_from_hash_rejects_missing_status() {
    let mut map = HashMap::new();
    map.insert("max_rounds".to_string(), "3".to_string());
    map.insert("current_round".to_string(), "0".to_string());
    assert!(RoomInfo::from_redis_hash(&map).is_err());
}

#[test]
fn test_status_parse() {
    assert_eq!("waiting".parse::<RoomStatus>().unwrap(), RoomStatus::Waiting);
    assert_eq!("active".parse::<RoomStatus>().unwrap(), RoomStatus::Active);
    assert_eq!(
        "finished".parse::<RoomStatus>().unwrap(),
        RoomStatus::Finished
    );
    assert!("paused".parse::<RoomStatus>().is_err());
}

#[test]
fn test_kick_quorum_matches_majority_rule() {
    // required = ceil(players / 2), the formula the kick path uses.
    let required = |count: usize| (count + 1) / 2;
    assert_eq!(required(2), 1);
    assert_eq!(required(3), 2);
    assert_eq!(required(4), 2);
    assert_eq!(required(5), 3);
    assert_eq!(required(8), 4);
}
