use crate::registry::{LiveGame, Registry};
use minigames_core::engine;
use minigames_core::games::TurnError;
use shared::{GameType, PlayerAction, UpdateOutcome};
use std::sync::Arc;
use std::time::Instant;

fn rejection(error: TurnError) -> UpdateOutcome {
    match error {
        TurnError::NotInGame => UpdateOutcome::NotPlayerInGame,
        TurnError::NotYourTurn => UpdateOutcome::NotPlayerTurn,
        TurnError::AlreadyChosen => UpdateOutcome::AlreadyChosen,
        TurnError::InvalidMove | TurnError::Finished => UpdateOutcome::InvalidMove,
    }
}

impl Registry {
    /// Routes one player action into its session. The only mutation entry
    /// point: legality lives in the state machines, lifecycle here. A
    /// terminal result removes the session and cancels its timer before
    /// the outcome is returned.
    pub async fn apply_action(
        self: &Arc<Self>,
        key: &str,
        player: &str,
        action: PlayerAction,
    ) -> UpdateOutcome {
        let Some(entry) = self.sessions.get(key) else {
            return UpdateOutcome::NotFound;
        };
        let mut session = entry.write().await;

        let applied = match (&mut session.game, action) {
            (LiveGame::Rps(game), PlayerAction::Choose(choice)) => game.choose(player, choice),
            (LiveGame::TicTacToe(game), PlayerAction::Place { row, col }) => {
                game.place(player, row, col)
            }
            (LiveGame::HandCricket(game), PlayerAction::CallParity(parity)) => {
                game.call_parity(player, parity)
            }
            (LiveGame::HandCricket(game), PlayerAction::TossNumber(number)) => {
                game.toss_number(player, number)
            }
            (LiveGame::HandCricket(game), PlayerAction::PickRole(role)) => {
                game.choose_role(player, role)
            }
            (LiveGame::HandCricket(game), PlayerAction::PlayNumber(number)) => {
                game.play_number(player, number)
            }
            _ => {
                tracing::debug!(session = %key, player = %player, "action does not fit the game");
                return UpdateOutcome::InvalidMove;
            }
        };

        if let Err(error) = applied {
            tracing::debug!(session = %key, player = %player, error = ?error, "action rejected");
            return rejection(error);
        }
        session.last_activity = Instant::now();
        let game_type = session.game.game_type();

        if session.game.is_finished() {
            let Some(summary) = session.game.final_summary() else {
                return UpdateOutcome::Error("finished match produced no summary".to_string());
            };
            drop(session);
            drop(entry);
            self.remove(key);
            tracing::info!(session = %key, winner = ?summary.winner, "match finished");
            return UpdateOutcome::GameOver(summary);
        }

        let bot_to_move =
            matches!(&session.game, LiveGame::TicTacToe(board) if board.current_player().is_bot());
        let view = session.game.view();
        drop(session);
        drop(entry);

        if bot_to_move {
            return self.advance_bot(key).await;
        }
        if game_type == GameType::HandCricket {
            // Idle eviction counts from the last turn, not from creation.
            self.arm_timer(key, game_type.idle_timeout());
        }
        UpdateOutcome::Success(view)
    }

    /// Runs the search for a board where the bot holds the move and plays
    /// the result. The search is CPU work and goes through the blocking
    /// pool; the session is unlocked while it runs and may be gone by the
    /// time the move comes back.
    pub(crate) async fn advance_bot(self: &Arc<Self>, key: &str) -> UpdateOutcome {
        let Some(entry) = self.sessions.get(key) else {
            return UpdateOutcome::NotFound;
        };
        let session = entry.read().await;
        let LiveGame::TicTacToe(game) = &session.game else {
            return UpdateOutcome::Error("bot turn on a non-board game".to_string());
        };
        if game.is_finished() || !game.current_player().is_bot() {
            return UpdateOutcome::Success(session.game.view());
        }
        let grid = game.grid();
        let to_move = game.turn();
        let bot_id = game.current_player().id.clone();
        drop(session);
        drop(entry);

        let searched = tokio::task::spawn_blocking(move || engine::best_move(&grid, to_move)).await;
        let (row, col) = match searched {
            Ok(Some(cell)) => cell,
            Ok(None) => return UpdateOutcome::Error("search returned no move".to_string()),
            Err(error) => {
                tracing::error!(session = %key, error = %error, "search task failed");
                return UpdateOutcome::Error("search task failed".to_string());
            }
        };

        let Some(entry) = self.sessions.get(key) else {
            return UpdateOutcome::NotFound;
        };
        let mut session = entry.write().await;
        if let LiveGame::TicTacToe(game) = &mut session.game {
            if !game.is_finished() && game.current_player().is_bot() {
                if let Err(error) = game.place(&bot_id, row, col) {
                    tracing::warn!(session = %key, error = ?error, "bot move rejected");
                }
            }
        }
        session.last_activity = Instant::now();

        if session.game.is_finished() {
            let Some(summary) = session.game.final_summary() else {
                return UpdateOutcome::Error("finished match produced no summary".to_string());
            };
            drop(session);
            drop(entry);
            self.remove(key);
            tracing::info!(session = %key, winner = ?summary.winner, "match finished");
            return UpdateOutcome::GameOver(summary);
        }
        UpdateOutcome::Success(session.game.view())
    }
}
