//! Elo rating math.

/// K-factor used when none is configured
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Probability that a player rated `rating` beats one rated `opponent`
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    let diff = f64::from(opponent) - f64::from(rating);
    1.0 / (1.0 + 10f64.powf(diff / 400.0))
}

/// New `(winner, loser)` ratings after the winner beat the loser
///
/// Both sides move by the same unrounded amount, `k * (1 - E_w)`, and are rounded
/// half away from zero independently.
pub fn calculate(winner: i32, loser: i32, k_factor: f64) -> (i32, i32) {
    let delta = k_factor * (1.0 - expected_score(winner, loser));

    let new_winner = (f64::from(winner) + delta).round() as i32;
    let new_loser = (f64::from(loser) - delta).round() as i32;

    (new_winner, new_loser)
}
