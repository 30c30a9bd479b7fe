//! "Almost!" detection for near-miss guesses.

/// True when the guess is one edit away from the target. Exact matches are
/// not "similar" (they are correct), very short guesses never match, and a
/// length gap above two letters rules the pair out before the DP runs.
pub fn similar(guess: &str, target: &str) -> bool {
    let guess = guess.trim().to_lowercase();
    let target = target.trim().to_lowercase();

    let guess_len = guess.chars().count();
    let target_len = target.chars().count();

    if guess == target || guess_len < 3 {
        return false;
    }

    if guess_len.abs_diff(target_len) > 2 {
        return false;
    }

    levenshtein(&guess, &target) == 1
}

/// Standard two-row DP edit distance over chars.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
