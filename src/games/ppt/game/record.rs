use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::framework::data::UtcDateTime;

use super::{AttemptPolicy, CellState, GameSession, Grid, SessionStatus};

/// Persisted form of a [`GameSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub puzzle_id: u32,
    pub cells: Vec<Vec<CellState>>,
    pub game_status: SessionStatus,
    pub started_at: UtcDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<UtcDateTime>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RestoreError {
    #[error("saved session is for puzzle #{found}, current puzzle is #{expected}")]
    WrongPuzzle { expected: u32, found: u32 },

    #[error("saved session grid is not 3x3")]
    GridShape,

    #[error("saved cell at row {row}, column {col} is inconsistent")]
    InconsistentCell { row: usize, col: usize },

    #[error("saved session is marked completed but has unfinished cells")]
    PrematureCompletion,
}

impl GameSession {
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            puzzle_id: self.puzzle,
            cells: self.cells.iter().map(|row| row.to_vec()).collect(),
            game_status: self.status,
            started_at: self.started,
            completed_at: self.completed,
        }
    }

    /// Rebuilds a session from `record`, which must belong to `puzzle`.
    pub fn restore(
        record: SessionRecord,
        puzzle: u32,
        policy: AttemptPolicy,
    ) -> Result<Self, RestoreError> {
        if record.puzzle_id != puzzle {
            return Err(RestoreError::WrongPuzzle {
                expected: puzzle,
                found: record.puzzle_id,
            });
        }

        let attempts = policy.attempts();

        let rows = record
            .cells
            .into_iter()
            .enumerate()
            .map(|(row, cells)| {
                for (col, cell) in cells.iter().enumerate() {
                    if !cell.is_consistent(attempts) {
                        return Err(RestoreError::InconsistentCell { row, col });
                    }
                }

                cells.try_into().map_err(|_| RestoreError::GridShape)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cells: Grid = rows.try_into().map_err(|_| RestoreError::GridShape)?;

        let mut session = Self {
            puzzle,
            cells,
            status: record.game_status,
            started: record.started_at,
            completed: record.completed_at,
            policy,
        };

        match session.status {
            SessionStatus::Completed if !session.all_terminal() => {
                return Err(RestoreError::PrematureCompletion)
            }
            SessionStatus::Completed => {
                session.completed.get_or_insert_with(Utc::now);
            }
            SessionStatus::Playing => {
                session.completed = None;
                // a save from before the last cell was written may lag behind
                session.refresh_status(Utc::now());
            }
        }

        Ok(session)
    }

    /// Restores `record` when it fits `puzzle`, otherwise starts fresh.
    pub fn restore_or_new(
        record: Option<SessionRecord>,
        puzzle: u32,
        policy: AttemptPolicy,
    ) -> Self {
        let Some(record) = record else {
            info!(puzzle, "no saved session, starting fresh");
            return Self::new(puzzle, policy);
        };

        match Self::restore(record, puzzle, policy) {
            Ok(session) => {
                info!(puzzle, status = ?session.status, "restored saved session");
                session
            }
            Err(err @ RestoreError::WrongPuzzle { .. }) => {
                info!(%err, "discarding stale session");
                Self::new(puzzle, policy)
            }
            Err(err) => {
                warn!(%err, "discarding malformed session");
                Self::new(puzzle, policy)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::{RestoreError, SessionRecord};
    use crate::games::ppt::game::{
        tests::sample_puzzle, AttemptPolicy, CellStatus, GameSession, SessionStatus,
    };

    fn played_session() -> GameSession {
        let puzzle = sample_puzzle(3);
        let mut session = GameSession::new(3, AttemptPolicy::Two);

        session.submit_guess(&puzzle, 0, 0, "Lincon");
        session.submit_guess(&puzzle, 1, 2, "Moths");

        session
    }

    #[test]
    fn record_restores_identically() {
        let session = played_session();

        let restored = GameSession::restore(session.to_record(), 3, AttemptPolicy::Two)
            .expect("record should be valid");

        assert_eq!(restored, session);
    }

    #[test]
    fn record_json_shape() {
        let record = played_session().to_record();
        let value = serde_json::to_value(&record).expect("serializable");

        assert_eq!(value["puzzleId"], 3);
        assert_eq!(value["gameStatus"], "playing");
        assert_eq!(value["cells"][1][2]["guesses"], json!(["Moths"]));
        assert_eq!(value["cells"][1][2]["guessesRemaining"], 1);
        assert!(value.get("completedAt").is_none());

        let back: SessionRecord = serde_json::from_value(value).expect("deserializable");
        assert_eq!(back, record);
    }

    #[test]
    fn wrong_puzzle_is_discarded() {
        let record = played_session().to_record();

        assert_eq!(
            GameSession::restore(record.clone(), 4, AttemptPolicy::Two),
            Err(RestoreError::WrongPuzzle {
                expected: 4,
                found: 3
            })
        );

        let fresh = GameSession::restore_or_new(Some(record), 4, AttemptPolicy::Two);
        assert_eq!(fresh.puzzle_number(), 4);
        assert_eq!(fresh.correct_count(), 0);
        assert!(fresh.cells().iter().flatten().all(|c| c.guesses().is_empty()));
    }

    #[test]
    fn bad_shape_is_discarded() {
        let mut record = played_session().to_record();
        record.cells.pop();

        assert_eq!(
            GameSession::restore(record.clone(), 3, AttemptPolicy::Two),
            Err(RestoreError::GridShape)
        );

        let fresh = GameSession::restore_or_new(Some(record), 3, AttemptPolicy::Two);
        assert_eq!(fresh.status(), SessionStatus::Playing);
        assert!(fresh.cells().iter().flatten().all(|c| c.guesses().is_empty()));
    }

    #[test]
    fn policy_mismatch_is_inconsistent() {
        let record = played_session().to_record();

        assert!(matches!(
            GameSession::restore(record, 3, AttemptPolicy::Three),
            Err(RestoreError::InconsistentCell { .. })
        ));
    }

    #[test]
    fn completion_resynced() {
        let puzzle = sample_puzzle(3);
        let mut session = GameSession::new(3, AttemptPolicy::Two);

        for row in 0..3 {
            for col in 0..3 {
                session.submit_guess(&puzzle, row, col, "zzzzzzzzzzzzzzz");
                session.submit_guess(&puzzle, row, col, "zzzzzzzzzzzzzzz");
            }
        }
        assert!(session.is_completed());

        let mut record = session.to_record();
        record.game_status = SessionStatus::Playing;
        record.completed_at = None;

        let restored = GameSession::restore(record, 3, AttemptPolicy::Two).expect("valid");
        assert_eq!(restored.status(), SessionStatus::Completed);
        assert!(restored.completed().is_some());
        assert_eq!(
            restored.cell(2, 2).map(|c| c.status()),
            Some(CellStatus::Incorrect)
        );
    }

    #[test]
    fn premature_completion_rejected() {
        let mut record = played_session().to_record();
        record.game_status = SessionStatus::Completed;

        assert_eq!(
            GameSession::restore(record, 3, AttemptPolicy::Two),
            Err(RestoreError::PrematureCompletion)
        );
    }

    #[test]
    fn missing_fields_fail_to_parse() {
        let parsed = serde_json::from_value::<SessionRecord>(json!({ "puzzleId": 3 }));
        assert!(parsed.is_err());
    }
}
