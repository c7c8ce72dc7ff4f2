//! Markdown review of wrong answers.

use crate::types::WrongAnswerRecord;

/// Suggested file name for the exported review.
pub const EXPORT_FILE_NAME: &str = "termquiz-review.md";

const TITLE: &str = "# TermQuiz Review";
const SEPARATOR: &str = "\n\n---\n\n";

/// Render the wrong-answer history as a markdown document.
///
/// Returns `None` when there is nothing to review. Writing the file is up to
/// the caller.
pub fn render_markdown(history: &[WrongAnswerRecord]) -> Option<String> {
    if history.is_empty() {
        return None;
    }

    let records: Vec<String> = history.iter().map(render_record).collect();
    Some(format!("{TITLE}\n\n{}", records.join(SEPARATOR)))
}

fn render_record(record: &WrongAnswerRecord) -> String {
    let question = &record.question;
    let options = question
        .options
        .iter()
        .map(|opt| format!("- {}) {}", opt.key, opt.text))
        .collect::<Vec<_>>()
        .join("\n");

    let user_text = record.user_option().map_or("", |opt| opt.text.as_str());
    let correct_text = question.correct_option().map_or("", |opt| opt.text.as_str());

    format!(
        "## Question: {}\n\n{}\n\n**Your Answer:** {}) {} (Incorrect)\n**Correct Answer:** {}) {}",
        question.question,
        options,
        record.user_answer.to_uppercase(),
        user_text,
        question.correct.to_ascii_uppercase(),
        correct_text,
    )
}
