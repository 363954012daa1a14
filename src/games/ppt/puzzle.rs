use std::{fmt, fs, path::Path};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use super::matcher;

pub const GRID_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    People,
    Places,
    Things,
}

impl Category {
    /// Column order of the grid.
    pub const COLUMNS: [Self; GRID_SIZE] = [Self::People, Self::Places, Self::Things];

    /// Plural answers are only plausible for things.
    pub const fn allows_plurals(self) -> bool {
        matches!(self, Self::Things)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::People => "People",
            Self::Places => "Places",
            Self::Things => "Things",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub category: Category,
    pub clue: String,
    #[serde(rename = "clue2")]
    pub second_clue: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acceptable_answers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Cell {
    pub fn accepts(&self, guess: &str) -> bool {
        matcher::is_correct_answer(guess, &self.answer, &self.acceptable_answers, self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub constraint: String,
    pub cells: [Cell; GRID_SIZE],
}

/// The nine cells of one puzzle, without an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleContent {
    pub rows: [Row; GRID_SIZE],
}

impl PuzzleContent {
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.cells.get(col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub number: u32,
    content: PuzzleContent,
}

impl Puzzle {
    pub fn new(number: u32, content: PuzzleContent) -> Self {
        Self { number, content }
    }

    pub fn rows(&self) -> &[Row; GRID_SIZE] {
        &self.content.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.content.cell(row, col)
    }

    pub fn title(&self) -> String {
        format!("People, Places & Things #{}", self.number)
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("could not read puzzle file: {0}")]
    Io(#[from] std::io::Error),

    #[error("puzzle file is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("puzzle file contains no puzzles")]
    NoPuzzles,

    #[error("puzzle {puzzle} has {found} rows, expected {}", GRID_SIZE)]
    RowCount { puzzle: usize, found: usize },

    #[error("puzzle {puzzle} row {row} has {found} cells, expected {}", GRID_SIZE)]
    CellCount {
        puzzle: usize,
        row: usize,
        found: usize,
    },

    #[error("puzzle {puzzle} row {row} column {column} should be {expected}, found {found}")]
    ColumnOrder {
        puzzle: usize,
        row: usize,
        column: usize,
        expected: Category,
        found: Category,
    },

    #[error("start date `{0}` is not a valid date")]
    StartDate(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PartialPuzzleData {
    start_date: String,
    puzzles: Vec<PartialPuzzle>,
}

#[derive(Debug, Deserialize)]
struct PartialPuzzle {
    rows: Vec<PartialRow>,
}

#[derive(Debug, Deserialize)]
struct PartialRow {
    constraint: String,
    cells: Vec<Cell>,
}

/// Every puzzle available for daily rotation.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "PartialPuzzleData")]
pub struct PuzzleData {
    start_date: NaiveDate,
    puzzles: Vec<PuzzleContent>,
}

impl PuzzleData {
    pub fn new(start_date: NaiveDate, puzzles: Vec<PuzzleContent>) -> Result<Self, ContentError> {
        if puzzles.is_empty() {
            return Err(ContentError::NoPuzzles);
        }

        Ok(Self {
            start_date,
            puzzles,
        })
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let json = fs::read_to_string(path.as_ref())?;
        let data = Self::from_json(&json)?;

        info!(
            puzzles = data.len(),
            start = %data.start_date,
            "loaded puzzle content"
        );

        Ok(data)
    }

    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let partial: PartialPuzzleData = serde_json::from_str(json)?;
        Self::from_partial(partial)
    }

    fn from_partial(partial: PartialPuzzleData) -> Result<Self, ContentError> {
        let start_date = parse_start_date(&partial.start_date)?;

        let puzzles = partial
            .puzzles
            .into_iter()
            .enumerate()
            .map(|(index, puzzle)| validate_puzzle(index, puzzle))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = puzzles.len(), "validated puzzles");

        Self::new(start_date, puzzles)
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PuzzleContent> {
        self.puzzles.get(index)
    }
}

impl TryFrom<PartialPuzzleData> for PuzzleData {
    type Error = ContentError;

    fn try_from(value: PartialPuzzleData) -> Result<Self, Self::Error> {
        Self::from_partial(value)
    }
}

fn validate_puzzle(index: usize, partial: PartialPuzzle) -> Result<PuzzleContent, ContentError> {
    let found = partial.rows.len();

    let rows = partial
        .rows
        .into_iter()
        .enumerate()
        .map(|(row, partial)| validate_row(index, row, partial))
        .collect::<Result<Vec<_>, _>>()?;

    let rows: [Row; GRID_SIZE] = rows.try_into().map_err(|_| ContentError::RowCount {
        puzzle: index,
        found,
    })?;

    Ok(PuzzleContent { rows })
}

fn validate_row(puzzle: usize, row: usize, partial: PartialRow) -> Result<Row, ContentError> {
    let found = partial.cells.len();

    let cells: [Cell; GRID_SIZE] = partial.cells.try_into().map_err(|_| ContentError::CellCount {
        puzzle,
        row,
        found,
    })?;

    for (column, (cell, expected)) in cells.iter().zip(Category::COLUMNS).enumerate() {
        if cell.category != expected {
            return Err(ContentError::ColumnOrder {
                puzzle,
                row,
                column,
                expected,
                found: cell.category,
            });
        }
    }

    Ok(Row {
        constraint: partial.constraint,
        cells,
    })
}

/// Accepts a bare date or an ISO timestamp; only the date part is kept.
fn parse_start_date(text: &str) -> Result<NaiveDate, ContentError> {
    let text = text.trim();

    text.parse::<NaiveDate>()
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .or_else(|_| text.parse::<NaiveDateTime>().map(|dt| dt.date()))
        .map_err(|_| ContentError::StartDate(text.to_owned()))
}
