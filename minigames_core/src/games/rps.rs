use super::{Participant, TurnError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }

    fn random() -> Choice {
        use rand::Rng;
        match rand::thread_rng().gen_range(0..3) {
            0 => Choice::Rock,
            1 => Choice::Paper,
            _ => Choice::Scissors,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpsResult {
    /// Index of the winning seat.
    Winner(usize),
    Tie,
}

/// A single round of Rock-Paper-Scissors. Bot seats choose at construction,
/// so a bot-vs-bot round is already decided when it comes back from `new`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpsMatch {
    players: [Participant; 2],
    choices: [Option<Choice>; 2],
}

impl RpsMatch {
    pub fn new(first: Participant, second: Participant) -> Self {
        let mut game = Self {
            players: [first, second],
            choices: [None, None],
        };
        for seat in 0..2 {
            if game.players[seat].is_bot() {
                game.choices[seat] = Some(Choice::random());
            }
        }
        game
    }

    pub fn players(&self) -> &[Participant; 2] {
        &self.players
    }

    fn seat_of(&self, player: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player)
    }

    /// Records a player's choice. A recorded choice never changes.
    pub fn choose(&mut self, player: &str, choice: Choice) -> Result<(), TurnError> {
        let seat = self.seat_of(player).ok_or(TurnError::NotInGame)?;
        if self.choices[seat].is_some() {
            return Err(TurnError::AlreadyChosen);
        }
        self.choices[seat] = Some(choice);
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.choices.iter().all(Option::is_some)
    }

    pub fn result(&self) -> Option<RpsResult> {
        match (self.choices[0], self.choices[1]) {
            (Some(a), Some(b)) => {
                if a == b {
                    Some(RpsResult::Tie)
                } else if a.beats(b) {
                    Some(RpsResult::Winner(0))
                } else {
                    Some(RpsResult::Winner(1))
                }
            }
            _ => None,
        }
    }

    pub fn view(&self) -> RpsView {
        let revealed = match (self.choices[0], self.choices[1], self.result()) {
            (Some(a), Some(b), Some(result)) => Some(RpsReveal {
                choices: [a, b],
                winner: match result {
                    RpsResult::Winner(seat) => Some(self.players[seat].id.clone()),
                    RpsResult::Tie => None,
                },
            }),
            _ => None,
        };
        RpsView {
            players: [self.players[0].id.clone(), self.players[1].id.clone()],
            chosen: [self.choices[0].is_some(), self.choices[1].is_some()],
            revealed,
        }
    }
}

/// What the rendering layer may show mid-round: who has locked in,
/// never what they picked. Choices appear only once the round is decided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpsView {
    pub players: [String; 2],
    pub chosen: [bool; 2],
    pub revealed: Option<RpsReveal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpsReveal {
    pub choices: [Choice; 2],
    /// `None` on a tie.
    pub winner: Option<String>,
}
