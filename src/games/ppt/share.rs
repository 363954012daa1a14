use serde::Serialize;

use super::{
    as_emoji::AsEmoji,
    game::{AttemptPolicy, CellState, CellStatus},
    puzzle::GRID_SIZE,
};

pub const TOTAL_CELLS: usize = GRID_SIZE * GRID_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Green,
    Yellow,
    /// Only reachable with three attempts per cell.
    Orange,
    Red,
}

impl Tier {
    pub fn for_cell(cell: &CellState, policy: AttemptPolicy) -> Self {
        match (cell.status(), cell.guess_count()) {
            (CellStatus::Correct, 1) => Self::Green,
            (CellStatus::Correct, 2) => Self::Yellow,
            (CellStatus::Correct, _) if policy.has_orange_tier() => Self::Orange,
            (CellStatus::Correct, _) => Self::Yellow,
            // unanswered cells have no tier of their own
            (CellStatus::Incorrect | CellStatus::Unanswered, _) => Self::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResult {
    pub puzzle_number: u32,
    pub grid: [[Tier; GRID_SIZE]; GRID_SIZE],
    pub correct_count: usize,
    pub total_cells: usize,
}

impl ShareResult {
    pub fn percent_correct(&self) -> f64 {
        self.correct_count as f64 / self.total_cells as f64 * 100.0
    }

    pub fn score_message(&self) -> &'static str {
        match self.percent_correct() {
            p if p >= 100.0 => "Perfect!",
            p if p >= 75.0 => "Great job!",
            p if p >= 50.0 => "Nice work!",
            p if p >= 25.0 => "Good effort!",
            _ => "Better luck next time!",
        }
    }

    /// Text meant for pasting elsewhere.
    pub fn share_text(&self, url: Option<&str>) -> String {
        let mut text = format!(
            "People, Places & Things #{}\n\n{}\n\n{}/{} correct",
            self.puzzle_number,
            self.as_emoji(),
            self.correct_count,
            self.total_cells
        );

        if let Some(url) = url {
            text.push_str(&format!(" — play at {url}"));
        }

        text
    }
}
