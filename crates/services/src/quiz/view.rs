use std::collections::BTreeMap;

use reading_core::model::{QuestionId, QuizContent, Session, Stage};
use reading_core::{ScoreResult, format_clock, score};

use super::progress::QuizProgress;

/// Snapshot of a session for rendering.
///
/// Presentation-agnostic apart from the `MM:SS` clock label; the score is only
/// computed while reviewing.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizView {
    pub stage: Stage,
    pub answers: BTreeMap<QuestionId, String>,
    pub progress: QuizProgress,
    pub seconds_remaining: u32,
    pub time_label: String,
    pub running: bool,
    pub paused: bool,
    pub expired: bool,
    pub review: Option<ScoreResult>,
}

impl QuizView {
    #[must_use]
    pub fn from_session(session: &Session, content: &QuizContent) -> Self {
        let questions = content.questions();
        let review = (session.stage() == Stage::Reviewing)
            .then(|| score(questions, session.answers()));

        Self {
            stage: session.stage(),
            answers: session.answers().clone(),
            progress: QuizProgress::new(session.attempted(questions), questions.len()),
            seconds_remaining: session.seconds_remaining(),
            time_label: format_clock(session.seconds_remaining()),
            running: session.is_running(),
            paused: session.paused(),
            expired: session.is_expired(),
            review,
        }
    }

    #[must_use]
    pub fn answer(&self, id: &str) -> Option<&str> {
        self.answers.get(id).map(String::as_str)
    }
}
