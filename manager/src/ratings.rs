//! Bridge between finished matches and the rating store.

use dashmap::DashMap;
use minigames_core::rating::{self, INITIAL_RATING};

/// Where ratings live. Implementations are keyed by player, scope (for a
/// chat server or room), and game name.
pub trait RatingStore: Send + Sync {
    /// Current rating, creating the default entry on first sight.
    fn get_or_init(&self, player: &str, scope: &str, game: &str) -> f64;

    /// Persists a rating; `false` when the write was lost.
    fn set_rating(&self, player: &str, scope: &str, game: &str, rating: f64) -> bool;
}

/// Applies one finished match to both ratings.
///
/// Both pre-match ratings are read first, the update is computed once from
/// that snapshot, and both sides are written back. Persistence is best
/// effort: a lost write is logged and the match result stands.
pub fn settle(
    store: &dyn RatingStore,
    scope: &str,
    game: &str,
    winner: &str,
    loser: &str,
    tie: bool,
) {
    let winner_before = store.get_or_init(winner, scope, game);
    let loser_before = store.get_or_init(loser, scope, game);
    let updated = rating::update(winner_before, loser_before, tie);
    let winner_saved = store.set_rating(winner, scope, game, updated.winner);
    let loser_saved = store.set_rating(loser, scope, game, updated.loser);
    if !winner_saved || !loser_saved {
        tracing::warn!(winner = %winner, loser = %loser, game = %game, "rating update not persisted");
    }
}

/// Process-local store, used in tests and by hosts without persistence.
#[derive(Default)]
pub struct MemoryRatingStore {
    ratings: DashMap<(String, String, String), f64>,
}

impl MemoryRatingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RatingStore for MemoryRatingStore {
    fn get_or_init(&self, player: &str, scope: &str, game: &str) -> f64 {
        *self
            .ratings
            .entry((player.to_owned(), scope.to_owned(), game.to_owned()))
            .or_insert(INITIAL_RATING)
    }

    fn set_rating(&self, player: &str, scope: &str, game: &str, rating: f64) -> bool {
        self.ratings.insert(
            (player.to_owned(), scope.to_owned(), game.to_owned()),
            rating,
        );
        true
    }
}
