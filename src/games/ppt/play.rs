use tracing::{error, info, instrument, warn};

use super::{
    game::{AttemptPolicy, GameSession, GuessOutcome},
    puzzle::Puzzle,
    share::ShareResult,
};
use crate::framework::store::SessionStore;

/// Today's puzzle together with the player's session and where it is saved.
///
/// Saving happens after every change. A failed save is logged and play
/// carries on with the in-memory session.
#[derive(Debug)]
pub struct Game<S> {
    puzzle: Puzzle,
    session: GameSession,
    store: S,
    key: String,
}

impl<S: SessionStore> Game<S> {
    #[instrument(skip(puzzle, store), fields(puzzle = puzzle.number))]
    pub fn open(puzzle: Puzzle, policy: AttemptPolicy, store: S, key: &str) -> Self {
        let record = store.load(key).unwrap_or_else(|err| {
            warn!(%err, "couldn't load saved session");
            None
        });

        let session = GameSession::restore_or_new(record, puzzle.number, policy);

        Self {
            puzzle,
            session,
            store,
            key: key.to_owned(),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn guess(&mut self, row: usize, col: usize, text: &str) -> GuessOutcome {
        let outcome = self.session.submit_guess(&self.puzzle, row, col, text);

        if outcome.has_update() {
            self.persist();
        }

        outcome
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.persist();
    }

    pub fn share_result(&self) -> ShareResult {
        self.session.share_result()
    }

    fn persist(&mut self) {
        match self.store.save(&self.key, &self.session.to_record()) {
            Ok(()) => info!(key = self.key, "session saved"),
            Err(err) => error!(%err, key = self.key, "couldn't save session"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use super::Game;
    use crate::{
        framework::store::{MemoryStore, SessionStore, StoreError},
        games::ppt::{
            game::{tests::sample_puzzle, CellStatus},
            AttemptPolicy, GuessOutcome, SessionRecord,
        },
    };

    const KEY: &str = "ppt-game-state";

    struct BrokenStore;

    impl SessionStore for BrokenStore {
        fn load(&self, _key: &str) -> Result<Option<SessionRecord>, StoreError> {
            Err(broken())
        }

        fn save(&mut self, _key: &str, _record: &SessionRecord) -> Result<(), StoreError> {
            Err(broken())
        }

        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(broken())
        }
    }

    fn broken() -> StoreError {
        StoreError::Io {
            path: PathBuf::from("/dev/null/ppt"),
            source: std::io::ErrorKind::PermissionDenied.into(),
        }
    }

    #[test]
    fn guesses_are_saved() {
        let mut game = Game::open(sample_puzzle(5), AttemptPolicy::Two, MemoryStore::new(), KEY);

        assert_eq!(game.guess(0, 1, "paris"), GuessOutcome::Correct);

        let saved = game
            .store()
            .load(KEY)
            .expect("memory store never fails")
            .expect("saved after guess");
        assert_eq!(saved, game.session().to_record());
    }

    #[test]
    fn ignored_guess_not_saved() {
        let mut game = Game::open(sample_puzzle(5), AttemptPolicy::Two, MemoryStore::new(), KEY);

        assert!(!game.guess(0, 0, "   ").has_update());
        assert!(game.store().is_empty());
    }

    #[test]
    fn reopening_resumes() {
        let mut game = Game::open(sample_puzzle(5), AttemptPolicy::Two, MemoryStore::new(), KEY);
        game.guess(2, 2, "Spectacles");
        let store = game.into_store();

        let resumed = Game::open(sample_puzzle(5), AttemptPolicy::Two, store, KEY);
        let cell = resumed.session().cell(2, 2).expect("in range");
        assert_eq!(cell.guesses(), ["Spectacles"]);
        assert_eq!(cell.status(), CellStatus::Unanswered);
    }

    #[test]
    fn yesterdays_session_replaced() {
        let mut game = Game::open(sample_puzzle(5), AttemptPolicy::Two, MemoryStore::new(), KEY);
        game.guess(0, 0, "Abraham Lincoln");
        let store = game.into_store();

        let today = Game::open(sample_puzzle(6), AttemptPolicy::Two, store, KEY);
        assert_eq!(today.session().puzzle_number(), 6);
        assert_eq!(today.session().correct_count(), 0);
    }

    #[test]
    #[traced_test]
    fn save_failures_do_not_stop_play() {
        let mut game = Game::open(sample_puzzle(5), AttemptPolicy::Two, BrokenStore, KEY);
        assert!(logs_contain("couldn't load saved session"));

        assert_eq!(game.guess(1, 0, "Marie Curie"), GuessOutcome::Correct);
        assert!(logs_contain("couldn't save session"));
        assert_eq!(game.session().correct_count(), 1);
    }

    #[test]
    fn reset_is_saved() {
        let mut game = Game::open(sample_puzzle(5), AttemptPolicy::Two, MemoryStore::new(), KEY);
        game.guess(0, 0, "Abraham Lincoln");
        game.reset();

        let saved = game.store().load(KEY).expect("ok").expect("saved");
        assert!(saved.cells.iter().flatten().all(|cell| cell.guesses().is_empty()));
    }
}
