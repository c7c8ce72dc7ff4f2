//! Error types for the terminal app.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of milliseconds, got {value:?}")]
    InvalidDelay { name: &'static str, value: String },

    #[error("no data directory available; set TERMQUIZ_DATA_DIR")]
    NoDataDir,
}
