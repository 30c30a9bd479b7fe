use sketchly_be::games::sketch::scoring::{
    ALL_GUESSED_BONUS, BASE_POINTS, GuessScore, STREAK_BONUS_CAP, drawer_multiplier, rank_bonus,
    score_correct_guess, speed_bonus, streak_bonus,
};

#[test]
fn test_rank_bonus_table() {
    assert_eq!(rank_bonus(1), 30);
    assert_eq!(rank_bonus(2), 20);
    assert_eq!(rank_bonus(3), 10);
    assert_eq!(rank_bonus(4), 5);
    assert_eq!(rank_bonus(5), 0);
    assert_eq!(rank_bonus(12), 0);
}

#[test]
fn test_drawer_multiplier_table() {
    assert_eq!(drawer_multiplier(1), 0.60);
    assert_eq!(drawer_multiplier(2), 0.50);
    assert_eq!(drawer_multiplier(3), 0.40);
    assert_eq!(drawer_multiplier(4), 0.30);
    assert_eq!(drawer_multiplier(5), 0.20);
    assert_eq!(drawer_multiplier(100), 0.20);
}

#[test]
fn test_speed_bonus_rounds_to_nearest() {
    // 55/60 * 50 = 45.83 -> 46
    assert_eq!(speed_bonus(55, 60), 46);
    assert_eq!(speed_bonus(60, 60), 50);
    assert_eq!(speed_bonus(0, 60), 0);
    // 30/60 * 50 = 25 exactly
    assert_eq!(speed_bonus(30, 60), 25);
}

#[test]
fn test_speed_bonus_zero_turn_time() {
    assert_eq!(speed_bonus(0, 0), 0);
}

#[test]
fn test_streak_bonus_caps_at_30() {
    assert_eq!(streak_bonus(0), 0);
    assert_eq!(streak_bonus(1), 10);
    assert_eq!(streak_bonus(2), 20);
    assert_eq!(streak_bonus(3), 30);
    assert_eq!(streak_bonus(4), 30);
    assert_eq!(streak_bonus(99), 30);
}

#[test]
fn test_two_player_win_scenario() {
    // B guesses "apple" at t=5 with turn_time=60, first rank, streak 1:
    // 50 + 46 + 30 + 10 = 136 for the guesser, round(136 * 0.60) = 82 for
    // the drawer, plus the 40-point all-guessed bonus = 122 total.
    let score = score_correct_guess(55, 60, 1, 1);
    assert_eq!(
        score,
        GuessScore {
            guesser_points: 136,
            drawer_points: 82,
            streak_bonus: 10,
        }
    );
    assert_eq!(score.drawer_points + ALL_GUESSED_BONUS, 122);
}

#[test]
fn test_late_guess_still_earns_base() {
    // No time left, rank outside the bonus table, no streak history.
    let score = score_correct_guess(0, 60, 7, 1);
    assert_eq!(score.guesser_points, BASE_POINTS + 10);
    // round(60 * 0.20)
    assert_eq!(score.drawer_points, 12);
}

#[test]
fn test_guesser_points_monotone_in_streak_until_cap() {
    let base = score_correct_guess(30, 60, 2, 0).guesser_points;
    let s1 = score_correct_guess(30, 60, 2, 1).guesser_points;
    let s3 = score_correct_guess(30, 60, 2, 3).guesser_points;
    let s5 = score_correct_guess(30, 60, 2, 5).guesser_points;
    assert!(s1 > base);
    assert!(s3 > s1);
    assert_eq!(s3, s5);
    assert_eq!(s3 - base, STREAK_BONUS_CAP);
}

#[test]
fn test_drawer_points_never_negative() {
    for rank in 1..=10 {
        for t in [0, 10, 60] {
            let score = score_correct_guess(t, 60, rank, 0);
            assert!(score.drawer_points >= 0);
        }
    }
}
