//! The 3x3 board, role markers, and the win/draw evaluator.
//!
//! The evaluator is deliberately part of the *protocol* crate: the
//! server never runs it during a move. Each client applies its own move
//! locally, evaluates the board, and reports the outcome via the
//! `gameOver` event. Keeping the function here means clients, the demo,
//! and the tests all share a single copy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two fixed role markers assigned to a connection in a room.
///
/// Serializes as `"X"` / `"O"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// The 3x3 board as a flat sequence of 9 cells.
///
/// Index 0–8 reads the grid left-to-right, top-to-bottom. On the wire
/// this is an array of 9 values, each `null`, `"X"`, or `"O"` —
/// `#[serde(transparent)]` keeps the JSON free of any wrapper object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Option<Mark>; 9]);

/// The three rows, three columns, and two diagonals.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

impl Board {
    /// Number of cells on the board.
    pub const CELLS: usize = 9;

    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from explicit cell contents. Mostly for tests.
    pub fn from_cells(cells: [Option<Mark>; 9]) -> Self {
        Self(cells)
    }

    /// Returns the contents of a cell, or `None` if `index` is out of
    /// range.
    pub fn cell(&self, index: usize) -> Option<Option<Mark>> {
        self.0.get(index).copied()
    }

    /// Returns `true` if `index` is in range and the cell is empty.
    pub fn is_playable(&self, index: usize) -> bool {
        self.cell(index) == Some(None)
    }

    /// Writes `mark` at `index` if the index is in range.
    ///
    /// Returns `false` for an out-of-range index, leaving the board
    /// unchanged. Occupied cells are overwritten — callers that care
    /// check [`is_playable`](Self::is_playable) first.
    pub fn set(&mut self, index: usize, mark: Mark) -> bool {
        match self.0.get_mut(index) {
            Some(cell) => {
                *cell = Some(mark);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.0.iter().all(|cell| cell.is_some())
    }

    /// Returns the cells as a flat slice.
    pub fn cells(&self) -> &[Option<Mark>; 9] {
        &self.0
    }

    /// Evaluates the board: checks the 8 winning lines, then fullness.
    ///
    /// Pure and deterministic — this is the function each client runs
    /// after applying its own move, and whose result it reports back via
    /// `gameOver`.
    pub fn verdict(&self) -> Verdict {
        for line in WIN_LINES {
            if let Some(mark) = self.0[line[0]] {
                if self.0[line[1]] == Some(mark) && self.0[line[2]] == Some(mark) {
                    return Verdict::Win(mark);
                }
            }
        }
        if self.is_full() {
            Verdict::Draw
        } else {
            Verdict::InProgress
        }
    }
}

/// The outcome of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// A full line of the given mark exists.
    Win(Mark),
    /// The board is full and no line is matched.
    Draw,
    /// At least one cell is empty and no line is matched.
    InProgress,
}

impl Verdict {
    /// Returns `true` if the game has ended (win or draw).
    pub fn is_over(&self) -> bool {
        !matches!(self, Verdict::InProgress)
    }

    /// The winning mark, if any. `None` covers both draw and in-progress
    /// — callers that report results check [`is_over`](Self::is_over)
    /// first.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Verdict::Win(mark) => Some(*mark),
            _ => None,
        }
    }
}
