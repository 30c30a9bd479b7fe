use sketchly_be::models::messages::{
    RoomClientMessage, RoomServerMessage, SpecialChar, TurnOverReason,
};

#[test]
fn test_client_join_without_opts() {
    let msg: RoomClientMessage = serde_json::from_str(r#"{"type":"join"}"#).unwrap();
    assert!(matches!(msg, RoomClientMessage::Join { room_opts: None }));
}

#[test]
fn test_client_join_with_opts() {
    let msg: RoomClientMessage = serde_json::from_str(
        r#"{"type":"join","room_opts":{"max_rounds":5,"difficulty":"hard","room_type":"private"}}"#,
    )
    .unwrap();
    match msg {
        RoomClientMessage::Join {
            room_opts: Some(opts),
        } => {
            assert_eq!(opts.max_rounds, Some(5));
            assert!(opts.turn_time.is_none());
        }
        other => panic!("unexpected parse: {:?}", other),
    }
}

#[test]
fn test_client_event_names_are_snake_case() {
    assert!(matches!(
        serde_json::from_str(r#"{"type":"start_game"}"#).unwrap(),
        RoomClientMessage::StartGame
    ));
    assert!(matches!(
        serde_json::from_str(r#"{"type":"select_word","word":"apple"}"#).unwrap(),
        RoomClientMessage::SelectWord { .. }
    ));
    assert!(matches!(
        serde_json::from_str(r#"{"type":"vote_kick","target_user_id":"u2"}"#).unwrap(),
        RoomClientMessage::VoteKick { .. }
    ));
    assert!(matches!(
        serde_json::from_str(r#"{"type":"leave"}"#).unwrap(),
        RoomClientMessage::Leave
    ));
}

#[test]
fn test_client_drawing_payload() {
    let msg: RoomClientMessage = serde_json::from_str(
        r##"{"type":"drawing","drawMode":"pen","strokeColor":"#000","strokeWidth":2.5,"paths":[{"x":1.0,"y":2.0}],"isComplete":true}"##,
    )
    .unwrap();
    match msg {
        RoomClientMessage::Drawing(stroke) => {
            assert_eq!(stroke.draw_mode, "pen");
            assert_eq!(stroke.paths.len(), 1);
            assert!(stroke.is_complete);
        }
        other => panic!("unexpected parse: {:?}", other),
    }
}

#[test]
fn test_turn_over_reason_wire_format() {
    let msg = RoomServerMessage::TurnOver {
        reason: TurnOverReason::AllGuessed,
        word: "apple".into(),
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "turn_over");
    assert_eq!(json["reason"], "all_guessed");
    assert_eq!(json["word"], "apple");

    let json = serde_json::to_value(RoomServerMessage::TurnOver {
        reason: TurnOverReason::DrawerLeft,
        word: "train".into(),
    })
    .unwrap();
    assert_eq!(json["reason"], "drawer_left");
}

#[test]
fn test_turn_started_payload() {
    let msg = RoomServerMessage::TurnStarted {
        word_length: 7,
        time_remaining: 60,
        special_chars: vec![SpecialChar { index: 1, char: '-' }],
        auto_selected: true,
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "turn_started");
    assert_eq!(json["word_length"], 7);
    assert_eq!(json["special_chars"][0]["index"], 1);
    assert_eq!(json["special_chars"][0]["char"], "-");
    assert_eq!(json["auto_selected"], true);
}

#[test]
fn test_score_updated_omits_empty_streak_fields() {
    let msg = RoomServerMessage::ScoreUpdated {
        user_id: "u1".into(),
        score: 136,
        streak: None,
        streak_bonus: None,
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert!(json.get("streak").is_none());
    assert!(json.get("streak_bonus").is_none());

    let msg = RoomServerMessage::ScoreUpdated {
        user_id: "u1".into(),
        score: 136,
        streak: Some(2),
        streak_bonus: Some(20),
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["streak"], 2);
    assert_eq!(json["streak_bonus"], 20);
}

#[test]
fn test_letter_reveal_shape() {
    let msg = RoomServerMessage::LetterReveal {
        revealed_word: vec!["_".into(), "i".into(), "_".into()],
    };
    let json = serde_json::to_value(&msg).unwrap();
    assert_eq!(json["type"], "letter_reveal");
    assert_eq!(json["revealed_word"][1], "i");
}

#[test]
fn test_server_drawing_flattens_stroke() {
    let msg: RoomServerMessage = serde_json::from_str(
        r##"{"type":"drawing","user_id":"u1","drawMode":"pen","strokeColor":"#fff","strokeWidth":1.0,"paths":[],"isComplete":false}"##,
    )
    .unwrap();
    match msg {
        RoomServerMessage::Drawing { user_id, stroke } => {
            assert_eq!(user_id, "u1");
            assert_eq!(stroke.stroke_color, "#fff");
        }
        other => panic!("unexpected parse: {:?}", other),
    }
}

#[test]
fn test_game_over_carries_scores() {
    let mut scores = std::collections::HashMap::new();
    scores.insert("a".to_string(), 122i64);
    scores.insert("b".to_string(), 136i64);

    let json = serde_json::to_value(RoomServerMessage::GameOver { scores }).unwrap();
    assert_eq!(json["type"], "game_over");
    assert_eq!(json["scores"]["b"], 136);
}
