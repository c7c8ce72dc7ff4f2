//! Configuration from the environment (and an optional `.env` file).
//!
//! Variables:
//! - TERMQUIZ_DATA_DIR: where saved questions live (default: local data dir)
//! - TERMQUIZ_REVEAL_CORRECT_MS: reveal time after a correct answer
//! - TERMQUIZ_REVEAL_WRONG_MS: reveal time after a wrong answer
//! - TERMQUIZ_STORAGE_KEY: key the question set is saved under

use crate::error::ConfigError;
use quiz_core::QuizSettings;
use std::path::PathBuf;

const STORE_FILE: &str = "store.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub settings: QuizSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = match lookup("TERMQUIZ_DATA_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .ok_or(ConfigError::NoDataDir)?
                .join("termquiz"),
        };

        let mut settings = QuizSettings::default();
        if let Some(ms) = parse_delay(&lookup, "TERMQUIZ_REVEAL_CORRECT_MS")? {
            settings.reveal_correct_ms = ms;
        }
        if let Some(ms) = parse_delay(&lookup, "TERMQUIZ_REVEAL_WRONG_MS")? {
            settings.reveal_wrong_ms = ms;
        }
        if let Some(key) = lookup("TERMQUIZ_STORAGE_KEY") {
            settings.storage_key = key;
        }

        Ok(Self { data_dir, settings })
    }

    /// File backing the key/value store.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }
}

fn parse_delay(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u64>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidDelay { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn explicit_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("TERMQUIZ_DATA_DIR", "/tmp/quiz"),
            ("TERMQUIZ_REVEAL_CORRECT_MS", "10"),
            ("TERMQUIZ_REVEAL_WRONG_MS", " 20 "),
            ("TERMQUIZ_STORAGE_KEY", "mine"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/quiz"));
        assert_eq!(config.store_path(), PathBuf::from("/tmp/quiz/store.json"));
        assert_eq!(config.settings.reveal_correct_ms, 10);
        assert_eq!(config.settings.reveal_wrong_ms, 20);
        assert_eq!(config.settings.storage_key, "mine");
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[("TERMQUIZ_DATA_DIR", "/tmp/quiz")])).unwrap();
        assert_eq!(config.settings, QuizSettings::default());
    }

    #[test]
    fn bad_delay_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("TERMQUIZ_DATA_DIR", "/tmp/quiz"),
            ("TERMQUIZ_REVEAL_WRONG_MS", "soon"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDelay {
                name: "TERMQUIZ_REVEAL_WRONG_MS",
                value: "soon".to_string()
            }
        );
    }
}
