use std::borrow::Cow;

use super::{
    game::{CellState, CellStatus},
    share::{ShareResult, Tier},
};

pub trait AsEmoji {
    fn as_emoji(&self) -> Cow<'_, str>;
}

impl AsEmoji for Tier {
    fn as_emoji(&self) -> Cow<'_, str> {
        match self {
            Self::Green => "🟩",
            Self::Yellow => "🟨",
            Self::Orange => "🟧",
            Self::Red => "🟥",
        }
        .into()
    }
}

impl AsEmoji for [Tier] {
    fn as_emoji(&self) -> Cow<'_, str> {
        self.iter()
            .map(|tier| tier.as_emoji())
            .collect::<Vec<_>>()
            .join("")
            .into()
    }
}

impl AsEmoji for ShareResult {
    fn as_emoji(&self) -> Cow<'_, str> {
        self.grid
            .iter()
            .map(|row| row.as_emoji())
            .collect::<Vec<_>>()
            .join("\n")
            .into()
    }
}

/// In-progress marker used by the terminal board.
impl AsEmoji for CellState {
    fn as_emoji(&self) -> Cow<'_, str> {
        match self.status() {
            CellStatus::Correct => "✅",
            CellStatus::Incorrect => "❌",
            CellStatus::Unanswered if self.guesses().is_empty() => "⬜",
            CellStatus::Unanswered => "🔸",
        }
        .into()
    }
}
