use chrono::Utc;
use tracing::{info, instrument};

use super::{config::Config, store::FileStore};
use crate::{
    errors::Error,
    games::ppt::{DailySelector, Game, Puzzle, PuzzleData},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type UtcDateTime = chrono::DateTime<Utc>;

/// Everything needed to hand out today's puzzle.
#[derive(Debug, Clone)]
pub struct AppData {
    pub(crate) config: Config,
    pub(crate) puzzles: PuzzleData,
    pub(crate) selector: DailySelector,
    pub(crate) started: UtcDateTime,
}

impl AppData {
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Result<Self> {
        let puzzles = PuzzleData::load(&config.puzzles.path)?;
        Self::with_puzzles(config, puzzles)
    }

    pub fn with_puzzles(config: Config, puzzles: PuzzleData) -> Result<Self> {
        let selector = config.selector(puzzles.start_date())?;

        info!(
            puzzles = puzzles.len(),
            start = %puzzles.start_date(),
            "puzzle data ready"
        );

        Ok(Self {
            config,
            puzzles,
            selector,
            started: Utc::now(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn puzzles(&self) -> &PuzzleData {
        &self.puzzles
    }

    pub fn selector(&self) -> &DailySelector {
        &self.selector
    }

    pub fn started(&self) -> UtcDateTime {
        self.started
    }

    pub fn puzzle_number(&self, now: UtcDateTime) -> i64 {
        self.selector.puzzle_number(now)
    }

    pub fn puzzle_for(&self, now: UtcDateTime) -> Result<Puzzle> {
        Ok(self.selector.select(&self.puzzles, now)?)
    }

    /// Today's puzzle with whatever session was saved for it.
    pub fn open_game(&self, now: UtcDateTime) -> Result<Game<FileStore>> {
        let puzzle = self.puzzle_for(now)?;
        let store = FileStore::new(&self.config.store.path);

        Ok(Game::open(
            puzzle,
            self.config.game.attempts,
            store,
            &self.config.store.key,
        ))
    }
}
