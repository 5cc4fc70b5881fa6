use super::{Participant, TurnError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opposite(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Search value of a finished position won by this mark.
    pub fn score(self) -> i32 {
        match self {
            Mark::X => -1,
            Mark::O => 1,
        }
    }
}

pub type Grid = [[Option<Mark>; 3]; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardOutcome {
    Won(Mark),
    Tie,
}

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Winner of a raw grid, from the cells alone.
pub fn winner_on(grid: &Grid) -> Option<Mark> {
    for line in LINES {
        let [a, b, c] = line.map(|(r, c)| grid[r][c]);
        if let Some(mark) = a {
            if b == Some(mark) && c == Some(mark) {
                return Some(mark);
            }
        }
    }
    None
}

pub fn is_full(grid: &Grid) -> bool {
    grid.iter().flatten().all(Option::is_some)
}

/// A Tic-Tac-Toe match. The X seat always moves first; which participant
/// gets it is decided by coin flip at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicTacToeMatch {
    /// `players[0]` plays X, `players[1]` plays O.
    players: [Participant; 2],
    grid: Grid,
    turn: Mark,
    moves: u8,
    outcome: Option<BoardOutcome>,
}

impl TicTacToeMatch {
    pub fn new(first: Participant, second: Participant) -> Self {
        let players = if rand::random() {
            [first, second]
        } else {
            [second, first]
        };
        Self {
            players,
            grid: [[None; 3]; 3],
            turn: Mark::X,
            moves: 0,
            outcome: None,
        }
    }

    pub fn players(&self) -> &[Participant; 2] {
        &self.players
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn move_count(&self) -> u8 {
        self.moves
    }

    pub fn outcome(&self) -> Option<BoardOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn mark_of(&self, player: &str) -> Option<Mark> {
        if self.players[0].id == player {
            Some(Mark::X)
        } else if self.players[1].id == player {
            Some(Mark::O)
        } else {
            None
        }
    }

    /// The participant holding the mark that moves next.
    pub fn current_player(&self) -> &Participant {
        match self.turn {
            Mark::X => &self.players[0],
            Mark::O => &self.players[1],
        }
    }

    pub fn place(&mut self, player: &str, row: usize, col: usize) -> Result<(), TurnError> {
        if self.outcome.is_some() {
            return Err(TurnError::Finished);
        }
        let mark = self.mark_of(player).ok_or(TurnError::NotInGame)?;
        if mark != self.turn {
            return Err(TurnError::NotYourTurn);
        }
        if row >= 3 || col >= 3 {
            return Err(TurnError::InvalidMove);
        }
        if self.grid[row][col].is_some() {
            return Err(TurnError::InvalidMove);
        }

        self.grid[row][col] = Some(mark);
        self.moves += 1;

        if let Some(winner) = winner_on(&self.grid) {
            self.outcome = Some(BoardOutcome::Won(winner));
        } else if self.moves == 9 {
            self.outcome = Some(BoardOutcome::Tie);
        } else {
            self.turn = self.turn.opposite();
        }
        Ok(())
    }

    pub fn view(&self) -> BoardView {
        BoardView {
            players: [self.players[0].id.clone(), self.players[1].id.clone()],
            grid: self.grid,
            turn: self.turn,
            outcome: self.outcome,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    /// X seat id first, O seat id second.
    pub players: [String; 2],
    pub grid: Grid,
    pub turn: Mark,
    pub outcome: Option<BoardOutcome>,
}
