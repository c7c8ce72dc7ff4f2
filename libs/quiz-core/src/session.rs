//! Quiz session state machine.
//!
//! A session moves `Empty -> Ready -> Active -> Finished`. `load` may
//! replace the question set from any phase and `reset` returns to `Empty`.
//! Calls made in the wrong phase are rejected with a [`SessionError`] and
//! leave the session as it was.

use crate::error::{Result, SessionError};
use crate::shuffle::fisher_yates;
use crate::types::{Phase, Question, Score, WrongAnswerRecord};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Progress of an attempt that has started but not finished.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAttempt {
    pub current_index: usize,
    pub score: Score,
    pub answers: Vec<String>,
    pub history: Vec<WrongAnswerRecord>,
    /// Set once the current question has an answer; cleared on advance.
    pub answered: bool,
    pub started_at: DateTime<Utc>,
}

/// Outcome of a completed attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishedAttempt {
    pub score: Score,
    pub answers: Vec<String>,
    pub history: Vec<WrongAnswerRecord>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Session state, one variant per phase.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Empty,
    Ready,
    Active(ActiveAttempt),
    Finished(FinishedAttempt),
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Empty => Phase::Empty,
            Self::Ready => Phase::Ready,
            Self::Active(_) => Phase::Active,
            Self::Finished(_) => Phase::Finished,
        }
    }
}

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_key: char,
}

/// Final figures for a finished attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub score: Score,
    pub total: usize,
    pub elapsed_secs: i64,
}

/// A single quiz attempt over an owned set of questions.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: Vec<Question>,
    state: SessionState,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a session from previously saved questions: `Ready` when there
    /// are any, `Empty` otherwise.
    pub fn from_saved(questions: Vec<Question>) -> Self {
        let mut session = Self::new();
        // empty input simply leaves the session Empty
        let _ = session.load(questions);
        session
    }

    /// Replace the question set and drop any attempt in progress.
    pub fn load(&mut self, questions: Vec<Question>) -> Result<usize> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        let count = questions.len();
        self.questions = questions;
        self.state = SessionState::Ready;
        debug!(count, "questions loaded");
        Ok(count)
    }

    pub fn start(&mut self) -> Result<()> {
        self.start_at(Utc::now())
    }

    /// Begin an attempt with an explicit start time.
    pub fn start_at(&mut self, now: DateTime<Utc>) -> Result<()> {
        if !matches!(self.state, SessionState::Ready) || self.questions.is_empty() {
            return Err(self.invalid("start"));
        }
        self.state = SessionState::Active(ActiveAttempt {
            current_index: 0,
            score: Score::default(),
            answers: Vec::new(),
            history: Vec::new(),
            answered: false,
            started_at: now,
        });
        debug!(total = self.questions.len(), "quiz started");
        Ok(())
    }

    /// Answer the current question.
    ///
    /// The key is compared as given; callers validate it against the
    /// question's options first (see [`Question::has_option`]).
    pub fn submit_answer(&mut self, key: &str) -> Result<AnswerOutcome> {
        let phase = self.phase();
        let SessionState::Active(attempt) = &mut self.state else {
            return Err(SessionError::InvalidPhase {
                operation: "submit an answer",
                phase,
            });
        };
        if attempt.answered {
            return Err(SessionError::AlreadyAnswered {
                index: attempt.current_index,
            });
        }

        let question = &self.questions[attempt.current_index];
        let correct = question.is_correct(key);

        attempt.answers.push(key.to_string());
        attempt.score.record(correct);
        attempt.answered = true;
        if !correct {
            attempt.history.push(WrongAnswerRecord {
                question: question.clone(),
                user_answer: key.to_string(),
            });
        }

        debug!(index = attempt.current_index, correct, "answer submitted");
        Ok(AnswerOutcome {
            correct,
            correct_key: question.correct,
        })
    }

    pub fn advance(&mut self) -> Result<Phase> {
        self.advance_at(Utc::now())
    }

    /// Move to the next question, finishing after the last one.
    pub fn advance_at(&mut self, now: DateTime<Utc>) -> Result<Phase> {
        let last_index = self.questions.len().saturating_sub(1);
        let mut attempt = match std::mem::take(&mut self.state) {
            SessionState::Active(attempt) => attempt,
            other => {
                self.state = other;
                return Err(self.invalid("advance"));
            }
        };

        if attempt.current_index < last_index {
            attempt.current_index += 1;
            attempt.answered = false;
            self.state = SessionState::Active(attempt);
        } else {
            debug!(
                correct = attempt.score.correct,
                wrong = attempt.score.wrong,
                "quiz finished"
            );
            self.state = SessionState::Finished(FinishedAttempt {
                score: attempt.score,
                answers: attempt.answers,
                history: attempt.history,
                started_at: attempt.started_at,
                ended_at: now,
            });
        }
        Ok(self.phase())
    }

    /// Shuffle the question order before the attempt starts.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        if !matches!(self.state, SessionState::Ready) {
            return Err(self.invalid("randomize"));
        }
        fisher_yates(&mut self.questions, rng);
        debug!("questions shuffled");
        Ok(())
    }

    /// Drop everything and return to `Empty`.
    pub fn reset(&mut self) {
        self.questions.clear();
        self.state = SessionState::Empty;
        debug!("session reset");
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidPhase {
            operation,
            phase: self.phase(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> Option<usize> {
        match &self.state {
            SessionState::Active(a) => Some(a.current_index),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|idx| self.questions.get(idx))
    }

    /// Answer given to the current question, once submitted.
    pub fn current_answer(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active(a) if a.answered => a.answers.last().map(String::as_str),
            _ => None,
        }
    }

    /// Zero outside an attempt.
    pub fn score(&self) -> Score {
        match &self.state {
            SessionState::Active(a) => a.score,
            SessionState::Finished(f) => f.score,
            _ => Score::default(),
        }
    }

    pub fn answers(&self) -> &[String] {
        match &self.state {
            SessionState::Active(a) => &a.answers,
            SessionState::Finished(f) => &f.answers,
            _ => &[],
        }
    }

    /// Wrong answers in the order they were given.
    pub fn history(&self) -> &[WrongAnswerRecord] {
        match &self.state {
            SessionState::Active(a) => &a.history,
            SessionState::Finished(f) => &f.history,
            _ => &[],
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            SessionState::Active(a) => Some(a.started_at),
            SessionState::Finished(f) => Some(f.started_at),
            _ => None,
        }
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            SessionState::Finished(f) => Some(f.ended_at),
            _ => None,
        }
    }

    /// Time taken by a finished attempt.
    pub fn elapsed(&self) -> Option<Duration> {
        match &self.state {
            SessionState::Finished(f) => Some(f.ended_at - f.started_at),
            _ => None,
        }
    }

    /// Live elapsed time for display. Advisory only.
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Option<Duration> {
        match &self.state {
            SessionState::Active(a) => Some(now - a.started_at),
            _ => self.elapsed(),
        }
    }

    pub fn summary(&self) -> Option<QuizSummary> {
        match &self.state {
            SessionState::Finished(f) => Some(QuizSummary {
                score: f.score,
                total: self.questions.len(),
                elapsed_secs: (f.ended_at - f.started_at).num_seconds(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AnswerOption;
    use pretty_assertions::assert_eq;
    use rand::rngs::mock::StepRng;

    fn question(text: &str, correct: char) -> Question {
        Question {
            question: text.to_string(),
            options: vec![
                AnswerOption::new('a', "first"),
                AnswerOption::new('b', "second"),
                AnswerOption::new('c', "third"),
            ],
            correct,
        }
    }

    fn three_questions() -> Vec<Question> {
        vec![question("Q1", 'a'), question("Q2", 'b'), question("Q3", 'c')]
    }

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn active_session() -> QuizSession {
        let mut session = QuizSession::new();
        session.load(three_questions()).unwrap();
        session.start_at(t(0)).unwrap();
        session
    }

    #[test]
    fn new_session_is_empty() {
        let session = QuizSession::new();
        assert_eq!(session.phase(), Phase::Empty);
        assert_eq!(session.question_count(), 0);
        assert_eq!(session.score(), Score::default());
        assert!(session.current_question().is_none());
    }

    #[test]
    fn load_moves_to_ready() {
        let mut session = QuizSession::new();
        assert_eq!(session.load(three_questions()), Ok(3));
        assert_eq!(session.phase(), Phase::Ready);
    }

    #[test]
    fn load_empty_is_rejected_without_change() {
        let mut session = QuizSession::new();
        assert_eq!(session.load(vec![]), Err(SessionError::NoQuestions));
        assert_eq!(session.phase(), Phase::Empty);

        session.load(three_questions()).unwrap();
        assert_eq!(session.load(vec![]), Err(SessionError::NoQuestions));
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.question_count(), 3);
    }

    #[test]
    fn start_requires_ready() {
        let mut session = QuizSession::new();
        assert_eq!(
            session.start_at(t(0)),
            Err(SessionError::InvalidPhase {
                operation: "start",
                phase: Phase::Empty
            })
        );

        let mut session = active_session();
        assert!(session.start_at(t(5)).is_err());
        assert_eq!(session.started_at(), Some(t(0)));
    }

    #[test]
    fn start_initializes_attempt() {
        let session = active_session();
        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.current_question().map(|q| q.question.as_str()), Some("Q1"));
        assert_eq!(session.score(), Score::default());
        assert!(session.answers().is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.started_at(), Some(t(0)));
        assert_eq!(session.elapsed(), None);
    }

    #[test]
    fn submit_records_score_and_history() {
        let mut session = active_session();
        let outcome = session.submit_answer("b").unwrap();
        assert_eq!(
            outcome,
            AnswerOutcome {
                correct: false,
                correct_key: 'a'
            }
        );
        assert_eq!(session.score(), Score { correct: 0, wrong: 1 });
        assert_eq!(session.current_answer(), Some("b"));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].question.question, "Q1");
        assert_eq!(session.history()[0].user_answer, "b");
    }

    #[test]
    fn second_submit_for_same_question_is_rejected() {
        let mut session = active_session();
        session.submit_answer("a").unwrap();
        assert_eq!(
            session.submit_answer("b"),
            Err(SessionError::AlreadyAnswered { index: 0 })
        );
        assert_eq!(session.score(), Score { correct: 1, wrong: 0 });
        assert_eq!(session.answers(), &["a".to_string()]);
    }

    #[test]
    fn submit_and_advance_outside_active_are_rejected() {
        let mut session = QuizSession::new();
        assert!(session.submit_answer("a").is_err());
        assert!(session.advance_at(t(1)).is_err());

        session.load(three_questions()).unwrap();
        assert!(session.submit_answer("a").is_err());
        assert_eq!(
            session.advance_at(t(1)),
            Err(SessionError::InvalidPhase {
                operation: "advance",
                phase: Phase::Ready
            })
        );
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.question_count(), 3);
    }

    #[test]
    fn advance_finishes_after_last_question() {
        let mut session = active_session();
        assert_eq!(session.advance_at(t(1)), Ok(Phase::Active));
        assert_eq!(session.advance_at(t(2)), Ok(Phase::Active));
        assert_eq!(session.current_index(), Some(2));
        assert_eq!(session.advance_at(t(75)), Ok(Phase::Finished));
        assert_eq!(session.ended_at(), Some(t(75)));
        assert_eq!(session.elapsed(), Some(Duration::seconds(75)));
        assert!(session.advance_at(t(80)).is_err());
        assert_eq!(session.ended_at(), Some(t(75)));
    }

    #[test]
    fn advance_without_answer_skips_question() {
        let mut session = active_session();
        session.advance_at(t(1)).unwrap();
        assert_eq!(session.current_answer(), None);
        session.submit_answer("b").unwrap();
        assert_eq!(session.score(), Score { correct: 1, wrong: 0 });
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn score_tracks_every_submission() {
        let mut session = active_session();
        for (n, key) in ["a", "x", "c"].iter().enumerate() {
            session.submit_answer(key).unwrap();
            assert_eq!(session.score().answered() as usize, n + 1);
            assert_eq!(session.answers().len(), n + 1);
            session.advance_at(t(n as i64 + 1)).unwrap();
        }
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.score(), Score { correct: 2, wrong: 1 });
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].user_answer, "x");
    }

    #[test]
    fn all_correct_leaves_history_empty() {
        let mut session = active_session();
        for key in ["a", "b", "c"] {
            session.submit_answer(key).unwrap();
            session.advance_at(t(10)).unwrap();
        }
        assert!(session.history().is_empty());
        assert_eq!(
            session.summary(),
            Some(QuizSummary {
                score: Score { correct: 3, wrong: 0 },
                total: 3,
                elapsed_secs: 10,
            })
        );
    }

    #[test]
    fn randomize_only_when_ready() {
        let mut session = active_session();
        assert!(session.randomize(&mut StepRng::new(0, 0)).is_err());
        assert_eq!(session.questions()[0].question, "Q1");
    }

    #[test]
    fn randomize_permutes_with_injected_source() {
        let mut session = QuizSession::new();
        session.load(three_questions()).unwrap();
        session.randomize(&mut StepRng::new(0, 0)).unwrap();
        let order: Vec<_> = session.questions().iter().map(|q| q.question.as_str()).collect();
        assert_eq!(order, vec!["Q2", "Q3", "Q1"]);
        assert_eq!(session.phase(), Phase::Ready);
        // each question keeps its own answer key
        assert_eq!(session.questions()[2].correct, 'a');
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = active_session();
        session.submit_answer("c").unwrap();
        session.reset();
        assert_eq!(session.phase(), Phase::Empty);
        assert_eq!(session.question_count(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.started_at(), None);
    }

    #[test]
    fn reload_from_finished_returns_to_ready() {
        let mut session = active_session();
        for _ in 0..3 {
            session.advance_at(t(1)).unwrap();
        }
        assert_eq!(session.phase(), Phase::Finished);
        session.load(vec![question("New", 'b')]).unwrap();
        assert_eq!(session.phase(), Phase::Ready);
        assert_eq!(session.ended_at(), None);
        assert_eq!(session.question_count(), 1);
    }

    #[test]
    fn from_saved_picks_phase() {
        assert_eq!(QuizSession::from_saved(vec![]).phase(), Phase::Empty);
        assert_eq!(QuizSession::from_saved(three_questions()).phase(), Phase::Ready);
    }

    #[test]
    fn elapsed_at_reads_live_time_while_active() {
        let session = active_session();
        assert_eq!(session.elapsed_at(t(42)), Some(Duration::seconds(42)));
        assert_eq!(QuizSession::new().elapsed_at(t(42)), None);
    }
}
