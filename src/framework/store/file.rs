use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{instrument, trace, warn};

use super::{SessionStore, StoreError};
use crate::games::ppt::SessionRecord;

/// A JSON object on disk, one slot per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

type Slots = BTreeMap<String, Value>;

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_slots(&self) -> Result<Slots, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                trace!("no session file yet");
                Ok(Slots::new())
            }
            Err(err) => Err(self.io_error(err)),
        }
    }

    /// Other keys survive a rewrite; an unreadable file does not.
    fn slots_for_write(&self) -> Result<Slots, StoreError> {
        match self.read_slots() {
            Err(StoreError::Json(err)) => {
                warn!(%err, path = %self.path.display(), "overwriting malformed session file");
                Ok(Slots::new())
            }
            other => other,
        }
    }

    fn write_slots(&self, slots: &Slots) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(slots)?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        std::fs::write(&temp, json).map_err(|err| self.io_error(err))?;
        std::fs::rename(&temp, &self.path).map_err(|err| self.io_error(err))
    }
}

impl SessionStore for FileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self, key: &str) -> Result<Option<SessionRecord>, StoreError> {
        self.read_slots()?
            .remove(key)
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    fn save(&mut self, key: &str, record: &SessionRecord) -> Result<(), StoreError> {
        let mut slots = self.slots_for_write()?;
        slots.insert(key.to_owned(), serde_json::to_value(record)?);

        self.write_slots(&slots)?;
        trace!("saved");

        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut slots = self.slots_for_write()?;

        if slots.remove(key).is_some() {
            self.write_slots(&slots)?;
        }

        Ok(())
    }
}
