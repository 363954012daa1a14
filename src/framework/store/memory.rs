use std::collections::HashMap;

use super::{SessionStore, StoreError};
use crate::games::ppt::SessionRecord;

/// Keeps records for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, SessionRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<SessionRecord>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn save(&mut self, key: &str, record: &SessionRecord) -> Result<(), StoreError> {
        self.records.insert(key.to_owned(), record.clone());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }
}
