use minigames_core::games::handcricket::{CricketResult, HandCricketMatch};
use minigames_core::games::rps::{RpsMatch, RpsResult};
use minigames_core::games::tictactoe::{BoardOutcome, Mark, TicTacToeMatch};
use minigames_core::games::Participant;
use shared::{GameType, GameView, MatchSummary};
use std::time::Instant;

/// One live match of any game type.
pub enum LiveGame {
    Rps(RpsMatch),
    TicTacToe(TicTacToeMatch),
    HandCricket(HandCricketMatch),
}

impl LiveGame {
    pub fn game_type(&self) -> GameType {
        match self {
            LiveGame::Rps(_) => GameType::Rps,
            LiveGame::TicTacToe(_) => GameType::TicTacToe,
            LiveGame::HandCricket(_) => GameType::HandCricket,
        }
    }

    pub fn players(&self) -> &[Participant; 2] {
        match self {
            LiveGame::Rps(game) => game.players(),
            LiveGame::TicTacToe(game) => game.players(),
            LiveGame::HandCricket(game) => game.players(),
        }
    }

    pub fn is_finished(&self) -> bool {
        match self {
            LiveGame::Rps(game) => game.is_finished(),
            LiveGame::TicTacToe(game) => game.is_finished(),
            LiveGame::HandCricket(game) => game.is_finished(),
        }
    }

    pub fn view(&self) -> GameView {
        match self {
            LiveGame::Rps(game) => GameView::Rps(game.view()),
            LiveGame::TicTacToe(game) => GameView::TicTacToe(game.view()),
            LiveGame::HandCricket(game) => GameView::HandCricket(game.view()),
        }
    }

    /// End-of-match report. `None` while the match is still running.
    pub fn final_summary(&self) -> Option<MatchSummary> {
        if !self.is_finished() {
            return None;
        }
        let (winner, reason) = match self {
            LiveGame::Rps(game) => {
                let winner = match game.result()? {
                    RpsResult::Winner(seat) => Some(game.players()[seat].id.clone()),
                    RpsResult::Tie => None,
                };
                (winner, "Both choices in".to_string())
            }
            LiveGame::TicTacToe(game) => match game.outcome()? {
                BoardOutcome::Won(mark) => {
                    let seat = match mark {
                        Mark::X => 0,
                        Mark::O => 1,
                    };
                    (
                        Some(game.players()[seat].id.clone()),
                        "Three in a row".to_string(),
                    )
                }
                BoardOutcome::Tie => (None, "Board full".to_string()),
            },
            LiveGame::HandCricket(game) => {
                let winner = match game.result()? {
                    CricketResult::Winner(seat) => Some(game.players()[seat].id.clone()),
                    CricketResult::Tie => None,
                };
                (winner, game.status_line().to_string())
            }
        };
        Some(MatchSummary {
            view: self.view(),
            winner,
            reason,
        })
    }
}

pub struct Session {
    pub game: LiveGame,
    pub created_at: Instant,
    pub last_activity: Instant,
}

impl Session {
    pub fn new(game: LiveGame) -> Self {
        let now = Instant::now();
        Self {
            game,
            created_at: now,
            last_activity: now,
        }
    }
}
