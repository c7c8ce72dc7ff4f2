//! Quiz settings shared by hosts.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Key the question set is saved under.
pub const DEFAULT_STORAGE_KEY: &str = "termquiz-questions";

/// Host-facing settings for running a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizSettings {
    /// How long a correct answer stays revealed before advancing.
    pub reveal_correct_ms: u64,
    /// How long a wrong answer stays revealed before advancing.
    pub reveal_wrong_ms: u64,
    pub storage_key: String,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            reveal_correct_ms: 1500,
            reveal_wrong_ms: 5000,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl QuizSettings {
    /// Delay before auto-advancing after an answer.
    pub fn reveal_delay(&self, correct: bool) -> Duration {
        let ms = if correct {
            self.reveal_correct_ms
        } else {
            self.reveal_wrong_ms
        };
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delays() {
        let settings = QuizSettings::default();
        assert_eq!(settings.reveal_delay(true), Duration::from_millis(1500));
        assert_eq!(settings.reveal_delay(false), Duration::from_millis(5000));
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let settings: QuizSettings = serde_json::from_str(r#"{"reveal_wrong_ms": 250}"#).unwrap();
        assert_eq!(settings.reveal_wrong_ms, 250);
        assert_eq!(settings.reveal_correct_ms, 1500);
        assert_eq!(settings.storage_key, DEFAULT_STORAGE_KEY);
    }
}
