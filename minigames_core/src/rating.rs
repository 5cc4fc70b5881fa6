//! Elo rating arithmetic.
//!
//! Pure functions over a snapshot of both ratings. Reading the snapshot and
//! writing the results back atomically is the caller's job.

use serde::{Deserialize, Serialize};

pub const INITIAL_RATING: f64 = 1000.0;
pub const K_FACTOR: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingPair {
    pub winner: f64,
    pub loser: f64,
}

/// Probability that a rating-`a` player beats a rating-`b` player.
pub fn expected(a: f64, b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((b - a) / 400.0))
}

/// New ratings after a match, both computed from the pre-match values.
/// On a tie both sides score half, so equal ratings stay put.
pub fn update(winner: f64, loser: f64, tie: bool) -> RatingPair {
    let expected_winner = expected(winner, loser);
    let expected_loser = expected(loser, winner);
    let (actual_winner, actual_loser) = if tie { (0.5, 0.5) } else { (1.0, 0.0) };
    RatingPair {
        winner: winner + K_FACTOR * (actual_winner - expected_winner),
        loser: loser + K_FACTOR * (actual_loser - expected_loser),
    }
}
