//! Parser for pasted multiple-choice questions.
//!
//! # Format
//! ```text
//! 1. What is the capital of France?
//! a) Berlin
//! b) Madrid
//! c) Paris
//! Answer: c
//!
//! 2. Which keyword defines a constant in JavaScript?
//! (A. let
//! (B. const
//! Ans - (B)
//! ```
//!
//! Two or more blank lines always end a question. A single blank line ends a
//! question only once the lines before it hold an answer naming one of their
//! options, so question bodies may span paragraphs. Blocks that do not yield
//! a complete question are skipped.

use crate::types::{AnswerOption, Question};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

// Also matches "correct"/"answer" inside ordinary prose ("the correct
// option" reads as answer `o`). Kept as is; such blocks usually fail the
// option check and get dropped.
static ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:answer|ans|correct|solution)\b[\s:=\-is]*\(?([a-z])\)?")
        .expect("answer pattern is valid")
});

static OPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(?([A-Za-z])[.)-]\s+(.*)$").expect("option pattern is valid"));

static ENUMERATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)-]\s+").expect("enumeration pattern is valid"));

/// Minimum lines for a block: question, one option, answer.
const MIN_BLOCK_LINES: usize = 3;

/// Parse pasted text into questions, in document order.
///
/// Never fails: an empty result means nothing could be recovered.
pub fn parse(raw: &str) -> Vec<Question> {
    parse_with_report(raw).questions
}

/// Outcome of a parse, with counts for host feedback.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub questions: Vec<Question>,
    /// Candidate blocks found in the input.
    pub blocks: usize,
    /// Blocks dropped because they did not form a complete question.
    pub rejected: usize,
}

impl ParseReport {
    /// True when nothing could be parsed ("could not parse" for the user).
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Parse and report how many blocks were seen and dropped.
pub fn parse_with_report(raw: &str) -> ParseReport {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let blocks = split_blocks(normalized.trim());

    let mut report = ParseReport {
        blocks: blocks.len(),
        ..Default::default()
    };

    for (idx, lines) in blocks.iter().enumerate() {
        match parse_block(lines) {
            Ok(question) => report.questions.push(question),
            Err(reason) => {
                debug!(block = idx + 1, reason = reason.as_str(), "skipping block");
                report.rejected += 1;
            }
        }
    }

    report
}

/// Group trimmed, non-blank lines into candidate blocks.
fn split_blocks(text: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            blank_run += 1;
            continue;
        }

        let boundary = blank_run >= 2 || (blank_run == 1 && is_complete(&current));
        if boundary && !current.is_empty() {
            blocks.push(std::mem::take(&mut current));
        }
        blank_run = 0;
        current.push(trimmed);
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Rejection {
    TooShort,
    NoAnswer,
    NoOptions,
    NoQuestionText,
    AnswerNotAnOption,
}

impl Rejection {
    fn as_str(&self) -> &'static str {
        match self {
            Self::TooShort => "too few lines",
            Self::NoAnswer => "no answer line",
            Self::NoOptions => "no options",
            Self::NoQuestionText => "no question text",
            Self::AnswerNotAnOption => "answer key matches no option",
        }
    }
}

enum LineType<'a> {
    Option(char, &'a str),
    Text(&'a str),
}

fn classify(line: &str) -> LineType<'_> {
    match OPTION_RE.captures(line) {
        Some(caps) => {
            let key = caps[1].chars().next().unwrap_or_default();
            let text = caps.get(2).map_or("", |m| m.as_str());
            LineType::Option(key.to_ascii_lowercase(), text.trim())
        }
        None => LineType::Text(line),
    }
}

fn find_answer(lines: &[&str]) -> Option<(usize, char)> {
    lines.iter().enumerate().find_map(|(idx, line)| {
        ANSWER_RE
            .captures(line)
            .and_then(|caps| caps[1].chars().next())
            .map(|key| (idx, key.to_ascii_lowercase()))
    })
}

/// Answer found and its key names one of the options seen so far.
fn is_complete(lines: &[&str]) -> bool {
    let Some((answer_idx, correct)) = find_answer(lines) else {
        return false;
    };
    lines.iter().enumerate().any(|(idx, line)| {
        idx != answer_idx && matches!(classify(line), LineType::Option(key, _) if key == correct)
    })
}

fn strip_enumeration(text: &str) -> &str {
    match ENUMERATION_RE.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

fn parse_block(lines: &[&str]) -> std::result::Result<Question, Rejection> {
    if lines.len() < MIN_BLOCK_LINES {
        return Err(Rejection::TooShort);
    }

    let (answer_idx, correct) = find_answer(lines).ok_or(Rejection::NoAnswer)?;

    let mut options = Vec::new();
    let mut question_lines = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if idx == answer_idx {
            continue;
        }
        match classify(line) {
            LineType::Option(key, text) => options.push(AnswerOption::new(key, text)),
            LineType::Text(text) => question_lines.push(text),
        }
    }

    let joined = question_lines.join("\n");
    let question = strip_enumeration(joined.trim()).to_string();

    if question.is_empty() {
        return Err(Rejection::NoQuestionText);
    }
    if options.is_empty() {
        return Err(Rejection::NoOptions);
    }
    if !options.iter().any(|opt| opt.key == correct) {
        return Err(Rejection::AnswerNotAnOption);
    }

    Ok(Question {
        question,
        options,
        correct,
    })
}
