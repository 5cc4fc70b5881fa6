//! The vocabulary between the hosting chat layer and the session manager:
//! game tags, player actions, per-action outcomes, and display views.

use minigames_core::games::handcricket::{BatOrBowl, CricketView, Parity};
use minigames_core::games::rps::{Choice, RpsView};
use minigames_core::games::tictactoe::BoardView;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    Rps,
    TicTacToe,
    HandCricket,
}

impl GameType {
    /// How long a session of this game may sit idle before eviction.
    pub fn idle_timeout(self) -> Duration {
        match self {
            GameType::Rps => Duration::from_secs(5 * 60),
            GameType::TicTacToe => Duration::from_secs(10 * 60),
            GameType::HandCricket => Duration::from_secs(15 * 60),
        }
    }

    /// Stable name used as the rating-store key segment.
    pub fn name(self) -> &'static str {
        match self {
            GameType::Rps => "rps",
            GameType::TicTacToe => "tictactoe",
            GameType::HandCricket => "handcricket",
        }
    }
}

/// Everything a player can submit into a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Rock-Paper-Scissors pick.
    Choose(Choice),
    /// Tic-Tac-Toe cell.
    Place { row: usize, col: usize },
    /// Hand Cricket toss call.
    CallParity(Parity),
    /// Hand Cricket toss throw.
    TossNumber(u8),
    /// Hand Cricket bat/bowl pick after winning the toss.
    PickRole(BatOrBowl),
    /// Hand Cricket innings throw.
    PlayNumber(u8),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameView {
    Rps(RpsView),
    TicTacToe(BoardView),
    HandCricket(CricketView),
}

/// End-of-match report handed back with `UpdateOutcome::GameOver`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub view: GameView,
    /// `None` on a tie.
    pub winner: Option<String>,
    pub reason: String,
}

/// Result of routing one action into a session. Rejections carry no state
/// change; `NotFound` is distinct from every protocol rejection so callers
/// can tell a dead session from an illegal move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UpdateOutcome {
    Success(GameView),
    GameOver(MatchSummary),
    NotFound,
    NotPlayerTurn,
    InvalidMove,
    AlreadyChosen,
    NotPlayerInGame,
    Error(String),
}

/// Why a session could not be created. The first three are caller mistakes
/// in the pairing; `Conflict` means the chosen key was already live, which
/// points at a key-generation bug upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreationError {
    SamePlayer,
    BotPairNotAllowed,
    HumansRequired,
    Conflict,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Explicit session key, usually a chat-message id. Generated when absent.
    pub key: Option<String>,
}

impl SessionConfig {
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }
}
