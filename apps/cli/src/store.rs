//! Key/value store backed by a single JSON object on disk.

use quiz_core::{KeyValueStore, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

type Entries = BTreeMap<String, String>;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Entries, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(backend(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Like `read`, but a file that fails to deserialize is replaced.
    fn read_for_write(&self) -> Result<Entries, StorageError> {
        match self.read() {
            Ok(entries) => Ok(entries),
            Err(StorageError::Serialize(_)) => Ok(Entries::new()),
            Err(e) => Err(e),
        }
    }

    fn write(&self, entries: &Entries) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| backend(parent, e))?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).map_err(|e| backend(&self.path, e))
    }
}

fn backend(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Backend(format!("{}: {}", path.display(), e))
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_for_write()?;
        if entries.remove(key).is_some() || self.path.exists() {
            self.write(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{AnswerOption, Phase, Question, QuestionStore};

    fn temp_store() -> JsonFileStore {
        let dir = std::env::temp_dir().join(format!("termquiz-test-{}", uuid::Uuid::new_v4()));
        JsonFileStore::new(dir.join("store.json"))
    }

    fn cleanup(store: &JsonFileStore) {
        if let Some(dir) = store.path().parent() {
            fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = temp_store();
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn set_get_remove() {
        let mut store = temp_store();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        cleanup(&store);
    }

    #[test]
    fn corrupt_file_is_reported_then_overwritten() {
        let mut store = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.get("a"), Err(StorageError::Serialize(_))));

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        cleanup(&store);
    }

    #[test]
    fn io_errors_are_not_overwritten() {
        let mut store = temp_store();
        fs::create_dir_all(store.path()).unwrap();

        assert!(matches!(store.set("a", "1"), Err(StorageError::Backend(_))));
        assert!(matches!(store.remove("a"), Err(StorageError::Backend(_))));
        assert!(store.path().is_dir());
        cleanup(&store);
    }

    #[test]
    fn question_store_over_file() {
        let questions = vec![Question {
            question: "Capital of Italy?".to_string(),
            options: vec![AnswerOption::new('a', "Paris"), AnswerOption::new('b', "Rome")],
            correct: 'b',
        }];

        let mut saved = QuestionStore::new(temp_store());
        saved.save(&questions).unwrap();
        let file = saved.into_inner();

        let mut reopened = QuestionStore::new(JsonFileStore::new(file.path()));
        let session = reopened.rehydrate().unwrap();
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.questions(), questions.as_slice());
        cleanup(&file);
    }
}
