//! Core quiz library used by the terminal app.
//!
//! Provides:
//! - Parser turning pasted multiple-choice text into questions
//! - Quiz session state machine (load, start, answer, advance, shuffle, reset)
//! - Key/value persistence of the question set
//! - Markdown export of wrong answers
//! - Shared types (Question, Score, Phase, etc.)

pub mod error;
pub mod export;
pub mod parser;
pub mod session;
pub mod settings;
pub mod shuffle;
pub mod storage;
pub mod types;

pub use error::{Result, SessionError, StorageError};
pub use export::{render_markdown, EXPORT_FILE_NAME};
pub use parser::{parse, parse_with_report, ParseReport};
pub use session::{ActiveAttempt, AnswerOutcome, FinishedAttempt, QuizSession, QuizSummary, SessionState};
pub use settings::{QuizSettings, DEFAULT_STORAGE_KEY};
pub use storage::{KeyValueStore, MemoryStore, QuestionStore};
pub use types::{AnswerOption, Phase, Question, Score, WrongAnswerRecord};
