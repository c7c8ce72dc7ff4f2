//! Shared helpers for quiz-core integration tests.

pub mod fixtures;

use chrono::{DateTime, Utc};

/// Fixed timestamp `secs` seconds after a reference instant.
pub fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000 + secs, 0).expect("valid timestamp")
}
