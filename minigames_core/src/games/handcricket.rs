use super::{Participant, TurnError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn opposite(self) -> Parity {
        match self {
            Parity::Even => Parity::Odd,
            Parity::Odd => Parity::Even,
        }
    }

    fn of(n: u32) -> Parity {
        if n % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatOrBowl {
    Bat,
    Bowl,
}

/// Match phases, visited strictly in order. The toss decides who picks
/// a role, the role picker opens the batting, and a dismissal in the
/// second innings or a successful chase ends the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    TossParity,
    TossNumbers,
    RoleChoice,
    FirstInnings,
    SecondInnings,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CricketResult {
    /// Index of the winning seat.
    Winner(usize),
    Tie,
}

/// Both numbers thrown on the previous completed turn, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub batter_number: u8,
    pub bowler_number: u8,
}

/// Hand Cricket for two humans.
///
/// Each innings turn, batter and bowler secretly throw a number 1-6.
/// Equal numbers dismiss the batter, anything else scores the batter's
/// number. The second batter chases the first total plus one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandCricketMatch {
    players: [Participant; 2],
    phase: Phase,
    /// The first seat's parity preference, whoever actually called it.
    opening_call: Option<Parity>,
    toss_numbers: [Option<u8>; 2],
    toss_winner: Option<usize>,
    batter: usize,
    bowler: usize,
    scores: [u32; 2],
    turn_numbers: [Option<u8>; 2],
    last_turn: Option<TurnRecord>,
    innings: u8,
    status_line: String,
}

impl HandCricketMatch {
    pub fn new(first: Participant, second: Participant) -> Self {
        let status_line = format!(
            "{} vs {}: call even or odd for the toss",
            first.id, second.id
        );
        Self {
            players: [first, second],
            phase: Phase::TossParity,
            opening_call: None,
            toss_numbers: [None, None],
            toss_winner: None,
            batter: 0,
            bowler: 1,
            scores: [0, 0],
            turn_numbers: [None, None],
            last_turn: None,
            innings: 0,
            status_line,
        }
    }

    pub fn players(&self) -> &[Participant; 2] {
        &self.players
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    fn seat_of(&self, player: &str) -> Option<usize> {
        self.players.iter().position(|p| p.id == player)
    }

    fn require_seat(&self, player: &str) -> Result<usize, TurnError> {
        self.seat_of(player).ok_or(TurnError::NotInGame)
    }

    fn check_phase(&self, wanted: Phase) -> Result<(), TurnError> {
        if self.phase == Phase::Finished {
            return Err(TurnError::Finished);
        }
        if self.phase != wanted {
            return Err(TurnError::InvalidMove);
        }
        Ok(())
    }

    /// First submission from either player settles the call and moves on.
    /// The preference is kept as the first seat's, so a call by the second
    /// seat is stored inverted.
    pub fn call_parity(&mut self, player: &str, parity: Parity) -> Result<(), TurnError> {
        self.check_phase(Phase::TossParity)?;
        let seat = self.require_seat(player)?;
        let canonical = if seat == 0 { parity } else { parity.opposite() };
        self.opening_call = Some(canonical);
        self.phase = Phase::TossNumbers;
        self.status_line = format!(
            "{player} called {parity:?}; both players throw a number for the toss"
        );
        log::debug!("toss call by {player}: {parity:?}");
        Ok(())
    }

    pub fn toss_number(&mut self, player: &str, number: u8) -> Result<(), TurnError> {
        self.check_phase(Phase::TossNumbers)?;
        let seat = self.require_seat(player)?;
        if !(1..=6).contains(&number) {
            return Err(TurnError::InvalidMove);
        }
        if self.toss_numbers[seat].is_some() {
            return Err(TurnError::AlreadyChosen);
        }
        self.toss_numbers[seat] = Some(number);

        if let (Some(a), Some(b), Some(call)) =
            (self.toss_numbers[0], self.toss_numbers[1], self.opening_call)
        {
            let sum = u32::from(a) + u32::from(b);
            let winner = if Parity::of(sum) == call { 0 } else { 1 };
            self.toss_winner = Some(winner);
            self.phase = Phase::RoleChoice;
            self.status_line = format!(
                "{} + {} = {} ({:?}); {} wins the toss and picks bat or bowl",
                a,
                b,
                sum,
                Parity::of(sum),
                self.players[winner].id
            );
            log::debug!("toss decided: seat {winner} on {a}+{b}");
        }
        Ok(())
    }

    pub fn choose_role(&mut self, player: &str, choice: BatOrBowl) -> Result<(), TurnError> {
        self.check_phase(Phase::RoleChoice)?;
        let seat = self.require_seat(player)?;
        if Some(seat) != self.toss_winner {
            return Err(TurnError::NotYourTurn);
        }
        let other = 1 - seat;
        match choice {
            BatOrBowl::Bat => {
                self.batter = seat;
                self.bowler = other;
            }
            BatOrBowl::Bowl => {
                self.batter = other;
                self.bowler = seat;
            }
        }
        self.innings = 0;
        self.phase = Phase::FirstInnings;
        self.status_line = format!(
            "{} bats first, {} bowls",
            self.players[self.batter].id, self.players[self.bowler].id
        );
        log::debug!("roles set: batter seat {}", self.batter);
        Ok(())
    }

    pub fn play_number(&mut self, player: &str, number: u8) -> Result<(), TurnError> {
        match self.phase {
            Phase::FirstInnings | Phase::SecondInnings => {}
            Phase::Finished => return Err(TurnError::Finished),
            _ => return Err(TurnError::InvalidMove),
        }
        let seat = self.require_seat(player)?;
        if !(1..=6).contains(&number) {
            return Err(TurnError::InvalidMove);
        }
        if self.turn_numbers[seat].is_some() {
            return Err(TurnError::AlreadyChosen);
        }
        self.turn_numbers[seat] = Some(number);
        self.resolve_turn();
        Ok(())
    }

    /// Runs once both numbers of a turn are in. Clears the pair together.
    fn resolve_turn(&mut self) {
        let (bat, bowl) = match (self.turn_numbers[self.batter], self.turn_numbers[self.bowler]) {
            (Some(bat), Some(bowl)) => (bat, bowl),
            _ => return,
        };
        self.last_turn = Some(TurnRecord {
            batter_number: bat,
            bowler_number: bowl,
        });
        self.turn_numbers = [None, None];

        if bat == bowl {
            self.dismiss(bat);
        } else {
            self.scores[self.batter] += u32::from(bat);
            if self.innings == 1 && self.scores[self.batter] > self.scores[self.bowler] {
                self.phase = Phase::Finished;
                self.status_line = format!(
                    "{} chases down the target with {}",
                    self.players[self.batter].id, self.scores[self.batter]
                );
                log::debug!("chase complete at {}", self.scores[self.batter]);
            } else {
                self.status_line = format!(
                    "{} scores {} (total {})",
                    self.players[self.batter].id, bat, self.scores[self.batter]
                );
            }
        }
    }

    fn dismiss(&mut self, number: u8) {
        let out = self.batter;
        if self.innings == 0 {
            std::mem::swap(&mut self.batter, &mut self.bowler);
            self.innings = 1;
            self.phase = Phase::SecondInnings;
            let target = self.scores[out] + 1;
            self.status_line = format!(
                "{} is out on {}! {} needs {} to win",
                self.players[out].id, number, self.players[self.batter].id, target
            );
            log::debug!("innings change, target {target}");
        } else {
            self.phase = Phase::Finished;
            self.status_line = match self.result() {
                Some(CricketResult::Winner(seat)) => format!(
                    "{} is out on {}! {} wins",
                    self.players[out].id, number, self.players[seat].id
                ),
                _ => format!("{} is out on {}! scores level, match tied", self.players[out].id, number),
            };
            log::debug!("second innings closed by dismissal");
        }
    }

    /// Final standing by total runs alone, however the match ended.
    pub fn result(&self) -> Option<CricketResult> {
        if self.phase != Phase::Finished {
            return None;
        }
        Some(match self.scores[0].cmp(&self.scores[1]) {
            std::cmp::Ordering::Greater => CricketResult::Winner(0),
            std::cmp::Ordering::Less => CricketResult::Winner(1),
            std::cmp::Ordering::Equal => CricketResult::Tie,
        })
    }

    /// The score the side batting second has to reach, once known.
    pub fn target(&self) -> Option<u32> {
        match self.phase {
            Phase::SecondInnings | Phase::Finished if self.innings == 1 => {
                Some(self.scores[self.bowler] + 1)
            }
            _ => None,
        }
    }

    pub fn view(&self) -> CricketView {
        let in_play = matches!(
            self.phase,
            Phase::FirstInnings | Phase::SecondInnings | Phase::Finished
        );
        CricketView {
            players: [self.players[0].id.clone(), self.players[1].id.clone()],
            phase: self.phase,
            scores: self.scores,
            toss_winner: self.toss_winner.map(|seat| self.players[seat].id.clone()),
            batter: in_play.then(|| self.players[self.batter].id.clone()),
            bowler: in_play.then(|| self.players[self.bowler].id.clone()),
            pending: [self.turn_numbers[0].is_some(), self.turn_numbers[1].is_some()],
            last_turn: self.last_turn,
            target: self.target(),
            status_line: self.status_line.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CricketView {
    pub players: [String; 2],
    pub phase: Phase,
    pub scores: [u32; 2],
    pub toss_winner: Option<String>,
    pub batter: Option<String>,
    pub bowler: Option<String>,
    /// Which seats have thrown this turn. Numbers stay hidden.
    pub pending: [bool; 2],
    pub last_turn: Option<TurnRecord>,
    pub target: Option<u32>,
    pub status_line: String,
}
