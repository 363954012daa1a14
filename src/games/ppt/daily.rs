use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use super::puzzle::{Puzzle, PuzzleData};

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// What to hand out for instants before puzzle #1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeforeStart {
    #[default]
    NotAvailable,
    Clamp,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("no puzzles to choose from")]
    NoPuzzles,

    #[error("puzzle #1 is not available for another {days_until} day(s)")]
    NotYetAvailable { days_until: i64 },

    #[error("puzzle number {0} is out of range")]
    OutOfRange(i64),
}

/// Where a calendar day lands in the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyIndex {
    pub days_elapsed: i64,
    pub index: usize,
}

impl DailyIndex {
    /// One-based day number; zero or negative before the start date.
    pub const fn puzzle_number(&self) -> i64 {
        self.days_elapsed + 1
    }
}

/// Wraparound content index for a day offset, in both directions.
pub fn rotation_index(days_elapsed: i64, total: usize) -> Option<usize> {
    let total = i64::try_from(total).ok().filter(|total| *total > 0)?;
    usize::try_from(days_elapsed.rem_euclid(total)).ok()
}

#[derive(Debug, Clone, Copy)]
pub struct DailySelector {
    start: NaiveDate,
    timezone: Tz,
    before_start: BeforeStart,
}

impl DailySelector {
    pub fn new(start: NaiveDate) -> Self {
        Self {
            start,
            timezone: DEFAULT_TIMEZONE,
            before_start: BeforeStart::default(),
        }
    }

    pub fn timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn before_start(mut self, policy: BeforeStart) -> Self {
        self.before_start = policy;
        self
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// The calendar day `now` falls on in the reference timezone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.timezone).date_naive()
    }

    pub fn days_elapsed_on(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    pub fn days_elapsed(&self, now: DateTime<Utc>) -> i64 {
        self.days_elapsed_on(self.today(now))
    }

    pub fn index_on(&self, date: NaiveDate, total: usize) -> Option<DailyIndex> {
        let days_elapsed = self.days_elapsed_on(date);

        rotation_index(days_elapsed, total).map(|index| DailyIndex {
            days_elapsed,
            index,
        })
    }

    pub fn puzzle_number(&self, now: DateTime<Utc>) -> i64 {
        self.days_elapsed(now) + 1
    }

    #[instrument(skip(self, data))]
    pub fn select(&self, data: &PuzzleData, now: DateTime<Utc>) -> Result<Puzzle, SelectError> {
        self.select_on(data, self.today(now))
    }

    pub fn select_on(&self, data: &PuzzleData, date: NaiveDate) -> Result<Puzzle, SelectError> {
        let daily = self
            .index_on(date, data.len())
            .ok_or(SelectError::NoPuzzles)?;

        let number = daily.puzzle_number();
        debug!(%date, number, index = daily.index);

        let (number, index) = if number >= 1 {
            let number = u32::try_from(number).map_err(|_| SelectError::OutOfRange(number))?;
            (number, daily.index)
        } else {
            match self.before_start {
                BeforeStart::NotAvailable => {
                    return Err(SelectError::NotYetAvailable {
                        days_until: 1 - number,
                    })
                }
                BeforeStart::Clamp => (1, 0),
            }
        };

        let content = data.get(index).ok_or(SelectError::NoPuzzles)?;
        Ok(Puzzle::new(number, content.clone()))
    }
}
