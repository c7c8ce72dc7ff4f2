//! Key/value persistence for the saved question set.
//!
//! The core does not pick a storage technology. Hosts implement
//! [`KeyValueStore`] (the terminal app uses a JSON file) and go through
//! [`QuestionStore`] to save, rehydrate and clear questions.

use crate::error::StorageError;
use crate::session::QuizSession;
use crate::settings::DEFAULT_STORAGE_KEY;
use crate::types::Question;
use std::collections::HashMap;
use tracing::warn;

/// Minimal string key/value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Saved questions under a fixed key, stored as a JSON array.
pub struct QuestionStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> QuestionStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn save(&mut self, questions: &[Question]) -> Result<(), StorageError> {
        let json = serde_json::to_string(questions)?;
        self.store.set(&self.key, &json)
    }

    /// Saved questions, or an empty vector when nothing usable is stored.
    ///
    /// A corrupt entry is removed so it is not read again.
    pub fn load(&mut self) -> Result<Vec<Question>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Question>>(&raw) {
            Ok(questions) if questions.iter().all(Question::is_well_formed) => Ok(questions),
            Ok(_) => {
                warn!(key = %self.key, "discarding saved questions with invalid entries");
                self.store.remove(&self.key)?;
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable saved questions");
                self.store.remove(&self.key)?;
                Ok(Vec::new())
            }
        }
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }

    /// Session built from the saved questions (`Ready`, or `Empty` when none).
    pub fn rehydrate(&mut self) -> Result<QuizSession, StorageError> {
        Ok(QuizSession::from_saved(self.load()?))
    }
}
