//! Core types for the quiz engine.

use serde::{Deserialize, Serialize};

/// A single selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub key: char,
    pub text: String,
}

impl AnswerOption {
    pub fn new(key: char, text: impl Into<String>) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
            text: text.into(),
        }
    }
}

/// Multiple-choice question recovered from pasted text.
///
/// `correct` always names one of `options`; the parser drops candidate
/// blocks that would break this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<AnswerOption>,
    pub correct: char,
}

impl Question {
    /// Look up an option by its (case-insensitive) key.
    pub fn option(&self, key: char) -> Option<&AnswerOption> {
        let key = key.to_ascii_lowercase();
        self.options.iter().find(|opt| opt.key == key)
    }

    /// The option named by `correct`.
    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.option(self.correct)
    }

    /// Whether a submitted answer is exactly the correct key.
    pub fn is_correct(&self, answer: &str) -> bool {
        single_char(answer) == Some(self.correct)
    }

    /// Whether `answer` names one of this question's options.
    ///
    /// The session does not validate answers; hosts call this before
    /// submitting.
    pub fn has_option(&self, answer: &str) -> bool {
        single_char(answer).is_some_and(|key| self.options.iter().any(|opt| opt.key == key))
    }

    /// Question text non-empty, at least one option, and `correct` among the option keys.
    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && !self.options.is_empty()
            && self.options.iter().any(|opt| opt.key == self.correct)
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// A question the user got wrong, together with what they answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongAnswerRecord {
    #[serde(flatten)]
    pub question: Question,
    pub user_answer: String,
}

impl WrongAnswerRecord {
    /// Option the user picked, if the answer named one.
    pub fn user_option(&self) -> Option<&AnswerOption> {
        single_char(&self.user_answer).and_then(|key| self.question.option(key))
    }
}

/// Running tally for an attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub wrong: u32,
}

impl Score {
    /// Number of answers submitted.
    pub fn answered(&self) -> u32 {
        self.correct + self.wrong
    }

    pub(crate) fn record(&mut self, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.wrong += 1;
        }
    }
}

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Empty,
    Ready,
    Active,
    Finished,
}

impl Default for Phase {
    fn default() -> Self {
        Self::Empty
    }
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Ready => "ready",
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
