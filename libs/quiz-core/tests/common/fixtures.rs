//! Sample question text for integration tests.

/// The two-question example used throughout the docs.
pub const TWO_QUESTIONS: &str = "1. What is 2+2?\na) 3\nb) 4\nc) 5\nAnswer: b\n\n2. Capital of Italy?\na) Paris\nb) Rome\nAnswer: b";

/// Generate `count` questions in the numbered LLM format, one blank line
/// apart. Question `i` has answer `c`.
pub fn numbered_questions(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "{}. Question {}?\na) Alpha {}\nb) Beta {}\nc) Gamma {}\nd) Delta {}\nAnswer: c",
                i + 1,
                i + 1,
                i,
                i,
                i,
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
