/// Redis key builder for consistent key naming across the application.
///
/// Every per-room key embeds the room id in a `{…}` hash tag so all keys of
/// one room land on the same cluster slot.
pub struct RedisKey;

impl RedisKey {
    pub fn room_info(room_id: &str) -> String {
        format!("room:{{{room_id}}}:info")
    }

    pub fn room_players(room_id: &str) -> String {
        format!("room:{{{room_id}}}:players")
    }

    pub fn eligible_drawers(room_id: &str, round: u32) -> String {
        format!("room:{{{room_id}}}:round:{round}:eligible_drawers")
    }

    pub fn non_eligible_guessers(room_id: &str, round: u32) -> String {
        format!("room:{{{room_id}}}:{round}:non_eligible_guessers")
    }

    pub fn current_word(room_id: &str) -> String {
        format!("room:{{{room_id}}}:word")
    }

    pub fn revealed_indices(room_id: &str) -> String {
        format!("room:{{{room_id}}}:revealed_indices")
    }

    pub fn canvas(room_id: &str) -> String {
        format!("room:{{{room_id}}}:canvas")
    }

    pub fn turn_timer(room_id: &str) -> String {
        format!("room:{{{room_id}}}:timer")
    }

    pub fn reveal_timer(room_id: &str) -> String {
        format!("room:{{{room_id}}}:reveal_timer")
    }

    pub fn word_selection_timer(room_id: &str) -> String {
        format!("room:{{{room_id}}}:word_selection_timer")
    }

    /// Mirror of the candidate list; outlives the selection timer so the
    /// expiry handler can still read the words (expired events carry only
    /// the key name).
    pub fn word_selection_words(room_id: &str) -> String {
        format!("room:{{{room_id}}}:word_selection_words")
    }

    pub fn turn_transition_timer(room_id: &str) -> String {
        format!("room:{{{room_id}}}:turn_transition_timer")
    }

    pub fn player_score(room_id: &str, user_id: &str) -> String {
        format!("room:{{{room_id}}}:player:{user_id}:score")
    }

    pub fn player_score_pattern(room_id: &str) -> String {
        format!("room:{{{room_id}}}:player:*:score")
    }

    /// Streaks are per user, not per room, so no room hash tag.
    pub fn player_streak(user_id: &str) -> String {
        format!("player:{user_id}:streak")
    }

    pub fn kick_votes(room_id: &str, target_user_id: &str) -> String {
        format!("room:{{{room_id}}}:kick_votes:{target_user_id}")
    }

    pub fn kick_votes_pattern(room_id: &str) -> String {
        format!("room:{{{room_id}}}:kick_votes:*")
    }

    pub fn public_rooms() -> String {
        "public_rooms".to_string()
    }

    /// Pattern matching every key of one room (cleanup sweep).
    pub fn room_pattern(room_id: &str) -> String {
        format!("room:{{{room_id}}}:*")
    }

    pub fn handler_lock(timer_key: &str, discriminator: &str) -> String {
        format!("lock:{timer_key}:{discriminator}")
    }

    // Key parsing utilities

    /// Split an expired `room:{R}:<suffix>` key into (room_id, suffix).
    pub fn parse_room_key(key: &str) -> Option<(&str, &str)> {
        let rest = key.strip_prefix("room:{")?;
        let close = rest.find('}')?;
        let room_id = &rest[..close];
        let suffix = rest[close + 1..].strip_prefix(':')?;
        if room_id.is_empty() || suffix.is_empty() {
            return None;
        }
        Some((room_id, suffix))
    }
}
