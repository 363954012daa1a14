use std::ops::Not;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    #[default]
    Unanswered,
    Correct,
    Incorrect,
}

impl CellStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Correct | Self::Incorrect)
    }
}

/// Guess history and remaining attempts for one grid position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellState {
    guesses: Vec<String>,
    status: CellStatus,
    #[serde(rename = "guessesRemaining")]
    remaining: u8,
}

impl CellState {
    pub fn new(attempts: u8) -> Self {
        Self {
            guesses: Vec::with_capacity(attempts.into()),
            status: CellStatus::Unanswered,
            remaining: attempts,
        }
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn guess_count(&self) -> usize {
        self.guesses.len()
    }

    pub fn status(&self) -> CellStatus {
        self.status
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_correct(&self) -> bool {
        self.status == CellStatus::Correct
    }

    pub fn accepts_guesses(&self) -> bool {
        self.is_terminal().not()
    }

    /// The second clue shows once anything has been guessed.
    pub fn second_clue_visible(&self) -> bool {
        self.guesses.is_empty().not() || self.is_terminal()
    }

    pub fn answer_revealed(&self) -> bool {
        self.is_terminal()
    }

    /// Caller checks [`accepts_guesses`](Self::accepts_guesses) first.
    pub(crate) fn record_guess(&mut self, guess: String, correct: bool) -> CellStatus {
        self.guesses.push(guess);
        self.remaining = self.remaining.saturating_sub(1);

        self.status = if correct {
            CellStatus::Correct
        } else if self.remaining == 0 {
            CellStatus::Incorrect
        } else {
            CellStatus::Unanswered
        };

        self.status
    }

    /// Whether a restored cell could have been produced by `attempts`-limited play.
    pub(super) fn is_consistent(&self, attempts: u8) -> bool {
        let used = self.guesses.len();

        if self.remaining > attempts || used + usize::from(self.remaining) != usize::from(attempts)
        {
            return false;
        }

        match self.status {
            CellStatus::Unanswered => self.remaining > 0,
            CellStatus::Correct => used > 0,
            CellStatus::Incorrect => self.remaining == 0,
        }
    }
}
