//! Points for a correct guess as a pure function of time left, guess rank
//! and streak. The drawer earns a rank-indexed fraction of every guesser's
//! points plus a bonus when the whole room solves the word.

pub const BASE_POINTS: i64 = 50;
pub const SPEED_BONUS_MAX: i64 = 50;
pub const ALL_GUESSED_BONUS: i64 = 40;
pub const STREAK_BONUS_PER: i64 = 10;
pub const STREAK_BONUS_CAP: i64 = 30;

/// Extra points for being among the first to solve. `rank` is 1-based.
pub fn rank_bonus(rank: usize) -> i64 {
    match rank {
        1 => 30,
        2 => 20,
        3 => 10,
        4 => 5,
        _ => 0,
    }
}

/// Fraction of the guesser's points credited to the drawer.
pub fn drawer_multiplier(rank: usize) -> f64 {
    match rank {
        1 => 0.60,
        2 => 0.50,
        3 => 0.40,
        4 => 0.30,
        _ => 0.20,
    }
}

pub fn speed_bonus(time_remaining: u64, turn_time: u64) -> i64 {
    if turn_time == 0 {
        return 0;
    }
    ((time_remaining as f64 / turn_time as f64) * SPEED_BONUS_MAX as f64).round() as i64
}

pub fn streak_bonus(streak: i64) -> i64 {
    (streak * STREAK_BONUS_PER).min(STREAK_BONUS_CAP)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessScore {
    pub guesser_points: i64,
    pub drawer_points: i64,
    pub streak_bonus: i64,
}

pub fn score_correct_guess(
    time_remaining: u64,
    turn_time: u64,
    rank: usize,
    streak: i64,
) -> GuessScore {
    let sb = streak_bonus(streak);
    let guesser_points =
        BASE_POINTS + speed_bonus(time_remaining, turn_time) + rank_bonus(rank) + sb;
    let drawer_points =
        ((guesser_points as f64 * drawer_multiplier(rank)).round() as i64).max(0);

    GuessScore {
        guesser_points,
        drawer_points,
        streak_bonus: sb,
    }
}
