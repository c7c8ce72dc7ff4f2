//! Terminal commands driving a quiz session.

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use quiz_core::{
    parse_with_report, render_markdown, KeyValueStore, Phase, QuestionStore, QuizSession,
    QuizSettings, EXPORT_FILE_NAME,
};
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{info, warn};

pub const LLM_PROMPT: &str = "I'm studying a document and need some multiple-choice questions. Please generate [X] questions based on the text in the following format. It's crucial that each question block is separated by a single blank line.

1. What is the capital of France?
a) Berlin
b) Madrid
c) Paris
d) Rome
Answer: c

2. Which keyword is used to define a constant in JavaScript?
a) let
b) var
c) const
d) static
Answer: c";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load { file: String },
    Shuffle,
    Play { export: Option<String> },
    Reset,
    Prompt,
}

pub const USAGE: &str = "usage: termquiz <load FILE | shuffle | play [--export [FILE]] | reset | prompt>";

impl Command {
    pub fn parse(args: &[String]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = match args.as_slice() {
            ["load", file] => Self::Load {
                file: file.to_string(),
            },
            ["shuffle"] => Self::Shuffle,
            ["play"] => Self::Play { export: None },
            ["play", "--export"] => Self::Play {
                export: Some(EXPORT_FILE_NAME.to_string()),
            },
            ["play", "--export", file] => Self::Play {
                export: Some(file.to_string()),
            },
            ["reset"] => Self::Reset,
            ["prompt"] => Self::Prompt,
            _ => bail!(USAGE),
        };
        Ok(command)
    }
}

/// Saved session, or an empty one if the store cannot be read.
pub fn open_session<S: KeyValueStore>(store: &mut QuestionStore<S>) -> Result<QuizSession> {
    match store.rehydrate() {
        Ok(session) => Ok(session),
        Err(e) => {
            warn!(error = %e, "saved questions unreadable, starting empty");
            store.clear().context("failed to clear saved questions")?;
            Ok(QuizSession::new())
        }
    }
}

/// Parse `text`, load it and save it. Returns the question count.
pub fn load_text<S: KeyValueStore>(store: &mut QuestionStore<S>, text: &str) -> Result<usize> {
    let report = parse_with_report(text);
    if report.is_empty() {
        bail!("Could not parse. Please check format.");
    }
    info!(
        blocks = report.blocks,
        rejected = report.rejected,
        "parsed question text"
    );

    let mut session = QuizSession::new();
    let count = session.load(report.questions)?;
    store.save(session.questions())?;
    Ok(count)
}

pub fn load_file<S: KeyValueStore>(store: &mut QuestionStore<S>, path: &Path) -> Result<usize> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    load_text(store, &text)
}

/// Shuffle the saved questions in place.
pub fn shuffle<S: KeyValueStore>(store: &mut QuestionStore<S>) -> Result<()> {
    let mut session = open_session(store)?;
    if session.phase() == Phase::Empty {
        bail!("No saved questions. Run `termquiz load FILE` first.");
    }
    session.randomize(&mut rand::thread_rng())?;
    store.save(session.questions())?;
    Ok(())
}

/// Play every question, reading one answer per line from `input`.
///
/// Returns `false` if input ran out before the quiz finished.
pub fn play<R: BufRead, W: Write>(
    session: &mut QuizSession,
    settings: &QuizSettings,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    session.start()?;
    let total = session.question_count();

    while let (Some(index), Some(question)) =
        (session.current_index(), session.current_question().cloned())
    {
        let score = session.score();
        let elapsed = session
            .elapsed_at(Utc::now())
            .unwrap_or_else(Duration::zero);
        writeln!(
            out,
            "\n[{}/{}]  correct {}  wrong {}  {}",
            index + 1,
            total,
            score.correct,
            score.wrong,
            format_clock(elapsed)
        )?;
        writeln!(out, "{}", question.question)?;
        for opt in &question.options {
            writeln!(out, "  {}) {}", opt.key, opt.text)?;
        }

        let Some(answer) = read_answer(input, out, |key| question.has_option(key))? else {
            return Ok(false);
        };

        let outcome = session.submit_answer(&answer)?;
        if outcome.correct {
            writeln!(out, "Correct!")?;
        } else {
            let text = question.correct_option().map_or("", |opt| opt.text.as_str());
            writeln!(out, "Wrong. Answer: {}) {}", outcome.correct_key, text)?;
        }
        out.flush()?;
        std::thread::sleep(settings.reveal_delay(outcome.correct));

        session.advance()?;
    }

    if let Some(summary) = session.summary() {
        writeln!(out, "\nQuiz Complete")?;
        writeln!(out, "Final Score: {} / {}", summary.score.correct, summary.total)?;
        writeln!(out, "Time Taken: {}", format_taken(summary.elapsed_secs))?;
    }
    Ok(true)
}

fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    is_option: impl Fn(&str) -> bool,
) -> Result<Option<String>> {
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let key = line.trim().to_lowercase();
        if is_option(&key) {
            return Ok(Some(key));
        }
        writeln!(out, "Type one of the option letters.")?;
    }
}

/// Write the wrong-answer review. Returns `false` when there were no mistakes.
pub fn export_review(session: &QuizSession, path: &Path) -> Result<bool> {
    let Some(markdown) = render_markdown(session.history()) else {
        return Ok(false);
    };
    std::fs::write(path, markdown).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "exported review");
    Ok(true)
}

/// `mm:ss`, as shown while playing.
fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `Xm Ys`, as shown on the summary.
fn format_taken(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}m {}s", secs / 60, secs % 60)
}
