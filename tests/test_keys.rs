use sketchly_be::models::redis::RedisKey;

#[test]
fn test_room_keys_are_hash_tagged() {
    assert_eq!(RedisKey::room_info("r1"), "room:{r1}:info");
    assert_eq!(RedisKey::room_players("r1"), "room:{r1}:players");
    assert_eq!(RedisKey::current_word("r1"), "room:{r1}:word");
    assert_eq!(RedisKey::revealed_indices("r1"), "room:{r1}:revealed_indices");
    assert_eq!(RedisKey::turn_timer("r1"), "room:{r1}:timer");
    assert_eq!(RedisKey::reveal_timer("r1"), "room:{r1}:reveal_timer");
    assert_eq!(
        RedisKey::word_selection_timer("r1"),
        "room:{r1}:word_selection_timer"
    );
    assert_eq!(
        RedisKey::turn_transition_timer("r1"),
        "room:{r1}:turn_transition_timer"
    );
    assert_eq!(
        RedisKey::eligible_drawers("r1", 2),
        "room:{r1}:round:2:eligible_drawers"
    );
    assert_eq!(
        RedisKey::non_eligible_guessers("r1", 2),
        "room:{r1}:2:non_eligible_guessers"
    );
    assert_eq!(RedisKey::player_score("r1", "u1"), "room:{r1}:player:u1:score");
    assert_eq!(RedisKey::kick_votes("r1", "u1"), "room:{r1}:kick_votes:u1");
}

#[test]
fn test_streak_key_is_per_user() {
    assert_eq!(RedisKey::player_streak("u1"), "player:u1:streak");
}

#[test]
fn test_lock_key_shape() {
    assert_eq!(
        RedisKey::handler_lock("room:{r1}:timer", "apple"),
        "lock:room:{r1}:timer:apple"
    );
}

#[test]
fn test_key_construction_is_deterministic() {
    assert_eq!(RedisKey::room_info("abc"), RedisKey::room_info("abc"));
    assert_eq!(
        RedisKey::player_score("abc", "u9"),
        RedisKey::player_score("abc", "u9")
    );
}

#[test]
fn test_parse_room_key_round_trips() {
    assert_eq!(
        RedisKey::parse_room_key(&RedisKey::turn_timer("r1")),
        Some(("r1", "timer"))
    );
    assert_eq!(
        RedisKey::parse_room_key(&RedisKey::reveal_timer("r1")),
        Some(("r1", "reveal_timer"))
    );
    assert_eq!(
        RedisKey::parse_room_key(&RedisKey::word_selection_timer("r1")),
        Some(("r1", "word_selection_timer"))
    );
    assert_eq!(
        RedisKey::parse_room_key(&RedisKey::turn_transition_timer("r1")),
        Some(("r1", "turn_transition_timer"))
    );
}

#[test]
fn test_parse_room_key_rejects_foreign_keys() {
    assert_eq!(RedisKey::parse_room_key("player:u1:streak"), None);
    assert_eq!(RedisKey::parse_room_key("public_rooms"), None);
    assert_eq!(RedisKey::parse_room_key("room:{r1}"), None);
    assert_eq!(RedisKey::parse_room_key("room:{}:timer"), None);
    assert_eq!(RedisKey::parse_room_key("lock:room:{r1}:timer:apple"), None);
    assert_eq!(RedisKey::parse_room_key(""), None);
}

#[test]
fn test_parse_handles_compound_suffixes() {
    assert_eq!(
        RedisKey::parse_room_key("room:{r1}:round:3:eligible_drawers"),
        Some(("r1", "round:3:eligible_drawers"))
    );
}
