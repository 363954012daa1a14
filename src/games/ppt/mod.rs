//! People, Places & Things: a daily 3x3 grid of clues where each column is
//! a category and each row shares a theme.

pub mod as_emoji;
pub mod clue;
pub mod daily;
pub mod game;
pub mod matcher;
pub mod puzzle;
pub mod share;

mod play;
pub use play::Game;

pub use daily::{BeforeStart, DailySelector, SelectError};
pub use game::{AttemptPolicy, GameSession, GuessOutcome, SessionRecord, SessionStatus};
pub use matcher::is_correct_answer;
pub use puzzle::{Category, Puzzle, PuzzleData};
pub use share::{ShareResult, Tier};
