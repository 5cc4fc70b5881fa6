use serde::{Deserialize, Serialize};

pub mod handcricket;
pub mod rps;
pub mod tictactoe;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Bot,
}

/// One seat in a match: a chat user id plus whether a human sits behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub kind: PlayerKind,
}

impl Participant {
    pub fn human(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: PlayerKind::Human,
        }
    }

    pub fn bot(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: PlayerKind::Bot,
        }
    }

    pub fn is_bot(&self) -> bool {
        self.kind == PlayerKind::Bot
    }
}

/// Why a submitted action was rejected. The match state is untouched
/// whenever one of these comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    NotInGame,
    NotYourTurn,
    AlreadyChosen,
    InvalidMove,
    Finished,
}
