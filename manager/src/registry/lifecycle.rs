use crate::registry::{LiveGame, Registry, Session};
use minigames_core::games::handcricket::HandCricketMatch;
use minigames_core::games::rps::RpsMatch;
use minigames_core::games::tictactoe::TicTacToeMatch;
use minigames_core::games::Participant;
use shared::{CreationError, GameType, MatchSummary, SessionConfig, UpdateOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

fn validate_pairing(
    game_type: GameType,
    first: &Participant,
    second: &Participant,
) -> Result<(), CreationError> {
    if first.id == second.id {
        return Err(CreationError::SamePlayer);
    }
    match game_type {
        GameType::Rps => Ok(()),
        GameType::TicTacToe => {
            if first.is_bot() && second.is_bot() {
                Err(CreationError::BotPairNotAllowed)
            } else {
                Ok(())
            }
        }
        GameType::HandCricket => {
            if first.is_bot() || second.is_bot() {
                Err(CreationError::HumansRequired)
            } else {
                Ok(())
            }
        }
    }
}

impl Registry {
    /// Validates the pairing, inserts the new match under its key, and arms
    /// the eviction timer. The key comes from the config when the caller
    /// derives it from a chat message, otherwise a fresh UUID.
    pub fn create_session(
        self: &Arc<Self>,
        game_type: GameType,
        first: Participant,
        second: Participant,
        config: SessionConfig,
    ) -> Result<String, CreationError> {
        validate_pairing(game_type, &first, &second)?;

        let key = config.key.unwrap_or_else(|| Uuid::new_v4().to_string());
        let game = match game_type {
            GameType::Rps => LiveGame::Rps(RpsMatch::new(first, second)),
            GameType::TicTacToe => LiveGame::TicTacToe(TicTacToeMatch::new(first, second)),
            GameType::HandCricket => {
                LiveGame::HandCricket(HandCricketMatch::new(first, second))
            }
        };
        let decided_at_birth = game.is_finished();
        let bot_opens =
            matches!(&game, LiveGame::TicTacToe(board) if board.current_player().is_bot());

        match self.sessions.entry(key.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                tracing::error!(session = %key, "session key already registered");
                return Err(CreationError::Conflict);
            }
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(RwLock::new(Session::new(game)));
            }
        }
        tracing::info!(session = %key, game = ?game_type, "session created");
        self.arm_timer(&key, game_type.idle_timeout());

        if decided_at_birth {
            // Both seats were bots, so the round is already decided. Settle
            // on the next scheduling round; the caller sees the session
            // exist before it disappears.
            let registry = Arc::clone(self);
            let settled = key.clone();
            tokio::spawn(async move {
                registry.finish_prefilled(&settled).await;
            });
        } else if bot_opens {
            let registry = Arc::clone(self);
            let opening = key.clone();
            tokio::spawn(async move {
                registry.advance_bot(&opening).await;
            });
        }

        Ok(key)
    }

    /// Arms the eviction timer for a key, replacing and cancelling any
    /// timer armed earlier. One timer per session, always.
    pub(crate) fn arm_timer(self: &Arc<Self>, key: &str, timeout: Duration) {
        let registry = Arc::clone(self);
        let timer_key = key.to_owned();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if registry.remove(&timer_key) {
                tracing::info!(session = %timer_key, "idle session evicted");
            }
        });
        if let Some(previous) = self.timers.insert(key.to_owned(), handle) {
            previous.abort();
        }
    }

    /// Drops a session and cancels its timer. Idempotent: the timer firing
    /// and a terminal move may both land here, and the second caller just
    /// gets `false`.
    pub fn remove(&self, key: &str) -> bool {
        if let Some((_, timer)) = self.timers.remove(key) {
            timer.abort();
        }
        self.sessions.remove(key).is_some()
    }

    /// Cleanup for a round that was decided at creation time.
    pub(crate) async fn finish_prefilled(&self, key: &str) {
        let Some(entry) = self.sessions.get(key) else {
            return;
        };
        let session = entry.read().await;
        if !session.game.is_finished() {
            return;
        }
        let summary = session.game.final_summary();
        drop(session);
        drop(entry);
        self.remove(key);
        if let Some(summary) = summary {
            tracing::info!(session = %key, winner = ?summary.winner, "bot round settled");
        }
    }

    /// Concedes a live match to the opponent and tears the session down.
    pub async fn resign(&self, key: &str, player: &str) -> UpdateOutcome {
        let Some(entry) = self.sessions.get(key) else {
            return UpdateOutcome::NotFound;
        };
        let session = entry.read().await;
        let players = session.game.players();
        let Some(seat) = players.iter().position(|p| p.id == player) else {
            return UpdateOutcome::NotPlayerInGame;
        };
        let winner = players[1 - seat].id.clone();
        let view = session.game.view();
        drop(session);
        drop(entry);
        self.remove(key);
        tracing::info!(session = %key, player = %player, "player resigned");
        UpdateOutcome::GameOver(MatchSummary {
            view,
            winner: Some(winner),
            reason: "Resignation".to_string(),
        })
    }
}
