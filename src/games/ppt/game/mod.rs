use std::ops::Not;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

use crate::framework::data::UtcDateTime;

use super::{
    puzzle::{Puzzle, GRID_SIZE},
    share::{ShareResult, Tier, TOTAL_CELLS},
};

mod cell;
pub use cell::{CellState, CellStatus};

mod record;
pub use record::{RestoreError, SessionRecord};

/// Attempts per cell, and with it how many share tiers exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AttemptPolicy {
    #[default]
    Two,
    Three,
}

impl AttemptPolicy {
    pub const fn attempts(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub const fn has_orange_tier(self) -> bool {
        matches!(self, Self::Three)
    }
}

impl TryFrom<u8> for AttemptPolicy {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(format!("{other} attempts per cell is unsupported, use 2 or 3")),
        }
    }
}

impl From<AttemptPolicy> for u8 {
    fn from(value: AttemptPolicy) -> Self {
        value.attempts()
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Playing,
    Completed,
}

/// Why a guess changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    WrongPuzzle,
    SessionCompleted,
    OutOfRange,
    CellFinished,
    EmptyGuess,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Ignored(Ignored),
    Correct,
    Wrong { remaining: u8 },
    Exhausted,
}

impl GuessOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Correct | Self::Wrong { .. } | Self::Exhausted)
    }
}

pub type Grid = [[CellState; GRID_SIZE]; GRID_SIZE];

/// One player's progress through one puzzle.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    puzzle: u32,
    cells: Grid,
    status: SessionStatus,
    started: UtcDateTime,
    completed: Option<UtcDateTime>,
    policy: AttemptPolicy,
}

impl GameSession {
    pub fn new(puzzle: u32, policy: AttemptPolicy) -> Self {
        Self::started_at(puzzle, policy, Utc::now())
    }

    pub fn started_at(puzzle: u32, policy: AttemptPolicy, started: UtcDateTime) -> Self {
        let attempts = policy.attempts();

        Self {
            puzzle,
            cells: std::array::from_fn(|_| std::array::from_fn(|_| CellState::new(attempts))),
            status: SessionStatus::Playing,
            started,
            completed: None,
            policy,
        }
    }

    pub fn puzzle_number(&self) -> u32 {
        self.puzzle
    }

    pub fn cells(&self) -> &Grid {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellState> {
        self.cells.get(row)?.get(col)
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    pub fn started(&self) -> UtcDateTime {
        self.started
    }

    pub fn completed(&self) -> Option<UtcDateTime> {
        self.completed
    }

    pub fn policy(&self) -> AttemptPolicy {
        self.policy
    }

    fn all_terminal(&self) -> bool {
        self.cells.iter().flatten().all(CellState::is_terminal)
    }

    pub fn correct_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_correct()).count()
    }

    /// Fresh session for the same puzzle.
    pub fn reset(&mut self) {
        info!(puzzle = self.puzzle, "resetting session");
        *self = Self::new(self.puzzle, self.policy);
    }

    pub fn submit_guess(
        &mut self,
        puzzle: &Puzzle,
        row: usize,
        col: usize,
        guess: &str,
    ) -> GuessOutcome {
        self.submit_guess_at(puzzle, row, col, guess, Utc::now())
    }

    #[instrument(skip(self, puzzle), fields(puzzle = self.puzzle))]
    pub fn submit_guess_at(
        &mut self,
        puzzle: &Puzzle,
        row: usize,
        col: usize,
        guess: &str,
        now: UtcDateTime,
    ) -> GuessOutcome {
        if let Err(reason) = self.check_guess(puzzle, row, col, guess) {
            debug!(?reason, "guess ignored");
            return GuessOutcome::Ignored(reason);
        }

        let (Some(content), Some(state)) = (
            puzzle.cell(row, col),
            self.cells.get_mut(row).and_then(|cells| cells.get_mut(col)),
        ) else {
            return GuessOutcome::Ignored(Ignored::OutOfRange);
        };

        let guess = guess.trim();
        let correct = content.accepts(guess);
        let status = state.record_guess(guess.to_owned(), correct);

        let outcome = match status {
            CellStatus::Correct => GuessOutcome::Correct,
            CellStatus::Incorrect => GuessOutcome::Exhausted,
            CellStatus::Unanswered => GuessOutcome::Wrong {
                remaining: state.remaining(),
            },
        };

        trace!(?outcome);
        self.refresh_status(now);

        outcome
    }

    fn check_guess(
        &self,
        puzzle: &Puzzle,
        row: usize,
        col: usize,
        guess: &str,
    ) -> Result<(), Ignored> {
        if puzzle.number != self.puzzle {
            return Err(Ignored::WrongPuzzle);
        }

        if self.is_completed() {
            return Err(Ignored::SessionCompleted);
        }

        let cell = self.cell(row, col).ok_or(Ignored::OutOfRange)?;

        if cell.accepts_guesses().not() {
            return Err(Ignored::CellFinished);
        }

        if guess.trim().is_empty() {
            return Err(Ignored::EmptyGuess);
        }

        Ok(())
    }

    /// Promotes to completed once every cell is terminal. Never demotes.
    fn refresh_status(&mut self, now: UtcDateTime) {
        if self.status == SessionStatus::Playing && self.all_terminal() {
            self.status = SessionStatus::Completed;
            self.completed = Some(now);

            info!(
                puzzle = self.puzzle,
                correct = self.correct_count(),
                "session completed"
            );
        }
    }

    pub fn share_result(&self) -> ShareResult {
        let grid = self
            .cells
            .each_ref()
            .map(|row| row.each_ref().map(|cell| Tier::for_cell(cell, self.policy)));

        ShareResult {
            puzzle_number: self.puzzle,
            grid,
            correct_count: self.correct_count(),
            total_cells: TOTAL_CELLS,
        }
    }
}
