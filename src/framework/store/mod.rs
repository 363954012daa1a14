use std::path::PathBuf;

use crate::games::ppt::SessionRecord;

mod file;
pub use file::FileStore;

mod memory;
pub use memory::MemoryStore;

pub const DEFAULT_KEY: &str = "ppt-game-state";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("couldn't access session file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("session data is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Somewhere a [`SessionRecord`] can be kept between runs.
pub trait SessionStore {
    fn load(&self, key: &str) -> Result<Option<SessionRecord>, StoreError>;

    fn save(&mut self, key: &str, record: &SessionRecord) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn load(&self, key: &str) -> Result<Option<SessionRecord>, StoreError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, record: &SessionRecord) -> Result<(), StoreError> {
        (**self).save(key, record)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}
