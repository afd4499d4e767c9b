use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{QuestionId, QuestionSet};
use crate::timer::{Countdown, CountdownStep};

/// Phase of a single attempt.
///
/// Serialized with the wire names of the persisted record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    #[serde(rename = "read")]
    Reading,
    #[serde(rename = "questions")]
    Answering,
    #[serde(rename = "review")]
    Reviewing,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Reading, Stage::Answering, Stage::Reviewing];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reading => "read",
            Self::Answering => "questions",
            Self::Reviewing => "review",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer not running (paused, reviewing, or expired); nothing changed.
    Idle,
    Ticked { remaining: u32 },
    /// This tick reached zero and forced the session into review.
    Expired,
}

/// State of one reading attempt.
///
/// Invariant: once the countdown is exhausted the stage is `Reviewing` and the
/// session is paused. Every constructor and mutation preserves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    answers: BTreeMap<QuestionId, String>,
    countdown: Countdown,
    paused: bool,
    stage: Stage,
}

impl Session {
    /// Fresh attempt: no answers, full timer, running, on the passage.
    #[must_use]
    pub fn new(duration_secs: u32) -> Self {
        Self {
            answers: BTreeMap::new(),
            countdown: Countdown::new(duration_secs),
            paused: false,
            stage: Stage::Reading,
        }
    }

    /// Rehydrate a session from persisted fields, applying per-field defaults.
    ///
    /// Answers for ids outside `questions` are dropped, the remaining time is
    /// capped at `duration_secs`, and an exhausted timer forces review.
    #[must_use]
    pub fn restore<I>(
        duration_secs: u32,
        questions: &QuestionSet,
        answers: I,
        seconds_remaining: Option<u32>,
        paused: Option<bool>,
        stage: Option<Stage>,
    ) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let answers = answers
            .into_iter()
            .filter(|(id, _)| questions.contains(id))
            .filter_map(|(id, value)| QuestionId::new(id).ok().map(|id| (id, value)))
            .collect();
        let remaining = seconds_remaining.map_or(duration_secs, |secs| secs.min(duration_secs));

        let mut session = Self {
            answers,
            countdown: Countdown::new(remaining),
            paused: paused.unwrap_or(false),
            stage: stage.unwrap_or_default(),
        };
        if session.countdown.is_exhausted() {
            session.expire();
        }
        session
    }

    /// Record an answer. Ignored for unknown ids and once time has run out.
    ///
    /// Returns `true` if the stored answers changed.
    pub fn set_answer(&mut self, questions: &QuestionSet, id: &str, value: impl Into<String>) -> bool {
        if self.is_expired() {
            return false;
        }
        let Some(question) = questions.get(id) else {
            return false;
        };
        let value = value.into();
        if self.answers.get(id) == Some(&value) {
            return false;
        }
        self.answers.insert(question.id().clone(), value);
        true
    }

    /// Navigate to any stage, including an early review. Locked once expired.
    ///
    /// Returns `true` if the stage changed.
    pub fn set_stage(&mut self, target: Stage) -> bool {
        if self.is_expired() || self.stage == target {
            return false;
        }
        self.stage = target;
        true
    }

    /// Finish answering and move to review. Only valid from `Answering`.
    pub fn submit(&mut self) -> bool {
        if self.stage != Stage::Answering || self.is_expired() {
            return false;
        }
        self.stage = Stage::Reviewing;
        true
    }

    /// Flip the pause flag. Has no effect while reviewing.
    pub fn toggle_pause(&mut self) -> bool {
        if self.stage == Stage::Reviewing {
            return false;
        }
        self.paused = !self.paused;
        true
    }

    /// Advance the timer by one second if it is running.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        match self.countdown.step() {
            CountdownStep::Running { remaining } => TickOutcome::Ticked { remaining },
            CountdownStep::ReachedZero => {
                self.expire();
                TickOutcome::Expired
            }
            CountdownStep::Exhausted => TickOutcome::Idle,
        }
    }

    /// Discard the attempt and start over.
    pub fn reset(&mut self, duration_secs: u32) {
        *self = Self::new(duration_secs);
    }

    fn expire(&mut self) {
        self.stage = Stage::Reviewing;
        self.paused = true;
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionId, String> {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, id: &str) -> Option<&str> {
        self.answers.get(id).map(String::as_str)
    }

    /// Questions with a non-blank answer.
    #[must_use]
    pub fn attempted(&self, questions: &QuestionSet) -> usize {
        questions
            .iter()
            .filter(|q| self.answer(q.id().as_str()).is_some_and(|a| !a.trim().is_empty()))
            .count()
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    #[must_use]
    pub fn paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.paused && self.stage != Stage::Reviewing && !self.countdown.is_exhausted()
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.countdown.is_exhausted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizContent;
    use crate::model::bees_content;
    use crate::timer::DEFAULT_DURATION_SECS;

    fn questions() -> QuestionSet {
        QuizContent::cambridge_demo().questions().clone()
    }

    #[test]
    fn new_session_starts_on_passage_and_runs() {
        let session = Session::new(DEFAULT_DURATION_SECS);
        assert_eq!(session.stage(), Stage::Reading);
        assert_eq!(session.seconds_remaining(), 3600);
        assert!(!session.paused());
        assert!(session.is_running());
        assert!(session.answers().is_empty());
    }

    #[test]
    fn full_countdown_expires_exactly_once() {
        let mut session = Session::new(DEFAULT_DURATION_SECS);
        let mut expirations = 0;
        for _ in 0..3600 {
            if session.tick() == TickOutcome::Expired {
                expirations += 1;
            }
        }
        assert_eq!(expirations, 1);
        assert_eq!(session.seconds_remaining(), 0);
        assert_eq!(session.stage(), Stage::Reviewing);
        assert!(session.paused());

        let frozen = session.clone();
        for _ in 0..10 {
            assert_eq!(session.tick(), TickOutcome::Idle);
        }
        assert_eq!(session, frozen);
    }

    #[test]
    fn paused_session_does_not_tick() {
        let mut session = Session::new(10);
        assert!(session.toggle_pause());
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert_eq!(session.seconds_remaining(), 10);
        assert!(session.toggle_pause());
        assert_eq!(session.tick(), TickOutcome::Ticked { remaining: 9 });
    }

    #[test]
    fn pause_toggle_ignored_while_reviewing() {
        let mut session = Session::new(10);
        session.set_stage(Stage::Reviewing);
        assert!(!session.toggle_pause());
        assert!(!session.paused());
        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn unknown_question_id_is_ignored() {
        let qs = questions();
        let mut session = Session::new(10);
        assert!(!session.set_answer(&qs, "q99", "anything"));
        assert!(session.answers().is_empty());
    }

    #[test]
    fn set_answer_overwrites() {
        let qs = questions();
        let mut session = Session::new(10);
        assert!(session.set_answer(&qs, "q3", "contrast"));
        assert!(session.set_answer(&qs, "q3", "cause"));
        assert!(!session.set_answer(&qs, "q3", "cause"));
        assert_eq!(session.answer("q3"), Some("cause"));
    }

    #[test]
    fn early_review_is_allowed_and_reversible() {
        let mut session = Session::new(10);
        assert!(session.set_stage(Stage::Reviewing));
        assert!(session.set_stage(Stage::Answering));
        assert_eq!(session.stage(), Stage::Answering);
    }

    #[test]
    fn submit_only_from_answering() {
        let mut session = Session::new(10);
        assert!(!session.submit());
        session.set_stage(Stage::Answering);
        assert!(session.submit());
        assert_eq!(session.stage(), Stage::Reviewing);
    }

    #[test]
    fn expired_session_is_locked() {
        let qs = questions();
        let mut session = Session::new(1);
        session.set_stage(Stage::Answering);
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert!(!session.set_stage(Stage::Answering));
        assert!(!session.set_answer(&qs, "q1", "Read the questions last"));
        assert!(!session.toggle_pause());
        assert_eq!(session.stage(), Stage::Reviewing);
    }

    #[test]
    fn reset_restores_defaults() {
        let qs = questions();
        let mut session = Session::new(DEFAULT_DURATION_SECS);
        session.set_answer(&qs, "q2", "True");
        session.set_stage(Stage::Answering);
        session.toggle_pause();
        session.tick();
        session.reset(DEFAULT_DURATION_SECS);
        assert_eq!(session, Session::new(DEFAULT_DURATION_SECS));
    }

    #[test]
    fn restore_applies_defaults_and_filters_unknown_ids() {
        let qs = questions();
        let session = Session::restore(
            DEFAULT_DURATION_SECS,
            &qs,
            vec![
                ("q1".to_string(), "Read the questions last".to_string()),
                ("zz".to_string(), "stale".to_string()),
            ],
            None,
            Some(true),
            None,
        );
        assert_eq!(session.seconds_remaining(), 3600);
        assert!(session.paused());
        assert_eq!(session.stage(), Stage::Reading);
        assert_eq!(session.answers().len(), 1);
    }

    #[test]
    fn restore_with_zero_seconds_forces_review() {
        let qs = questions();
        let session = Session::restore(
            DEFAULT_DURATION_SECS,
            &qs,
            Vec::new(),
            Some(0),
            Some(false),
            Some(Stage::Answering),
        );
        assert_eq!(session.stage(), Stage::Reviewing);
        assert!(session.paused());
        assert!(!session.is_running());
    }

    #[test]
    fn restore_caps_remaining_time() {
        let qs = questions();
        let session = Session::restore(60, &qs, Vec::new(), Some(9_000), None, None);
        assert_eq!(session.seconds_remaining(), 60);
    }

    #[test]
    fn attempted_ignores_blank_answers() {
        let qs = questions();
        let mut session = Session::new(10);
        session.set_answer(&qs, "q1", "Read the questions last");
        session.set_answer(&qs, "q3", "   ");
        assert_eq!(session.attempted(&qs), 1);
    }

    #[test]
    fn injected_content_drives_duration_and_ids() {
        let content = bees_content();
        let qs = content.questions();
        let mut session = Session::new(content.duration_secs());
        assert_eq!(session.seconds_remaining(), 1200);

        assert!(!session.set_answer(qs, "q1", "Pre-scan headings and topic sentences"));
        assert!(session.set_answer(qs, "b3", "dance"));
        session.set_stage(Stage::Answering);
        assert_eq!(session.tick(), TickOutcome::Ticked { remaining: 1199 });
        assert_eq!(session.attempted(qs), 1);

        session.reset(content.duration_secs());
        assert_eq!(session.seconds_remaining(), 1200);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn restore_against_other_content_drops_foreign_answers() {
        let content = bees_content();
        let session = Session::restore(
            content.duration_secs(),
            content.questions(),
            vec![
                ("q1".to_string(), "Read the questions last".to_string()),
                ("b2".to_string(), "Not Given".to_string()),
            ],
            Some(3000),
            None,
            Some(Stage::Answering),
        );
        assert_eq!(session.seconds_remaining(), 1200);
        assert_eq!(session.answer("q1"), None);
        assert_eq!(session.answer("b2"), Some("Not Given"));
        assert_eq!(session.stage(), Stage::Answering);
    }

    #[test]
    fn stage_wire_names() {
        assert_eq!(serde_json::to_string(&Stage::Answering).unwrap(), "\"questions\"");
        let stage: Stage = serde_json::from_str("\"review\"").unwrap();
        assert_eq!(stage, Stage::Reviewing);
        assert_eq!(Stage::Reading.as_str(), "read");
    }
}
