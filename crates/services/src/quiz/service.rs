use std::sync::Arc;

use reading_core::model::{QuizContent, Session, Stage, TickOutcome};
use storage::{SessionRecord, SessionSlot};
use tokio::sync::Mutex;

use super::view::QuizView;
use crate::error::QuizError;

/// Outcome of one timer tick together with the resulting snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub view: QuizView,
}

/// Handle to the single in-progress attempt.
///
/// Every operation that changes the session writes the full snapshot to the
/// slot before returning (write-through). The lock is held across the write so
/// snapshots land in the same order as the mutations.
pub struct QuizService {
    content: Arc<QuizContent>,
    slot: SessionSlot,
    session: Mutex<Session>,
}

impl QuizService {
    /// Resume the attempt stored in `slot`, or start fresh if there is none.
    pub async fn restore(content: Arc<QuizContent>, slot: SessionSlot) -> Self {
        let session = match slot.load().await {
            Some(record) => {
                let session = record.into_session(&content);
                tracing::debug!(
                    stage = session.stage().as_str(),
                    seconds_remaining = session.seconds_remaining(),
                    "resumed session"
                );
                session
            }
            None => Session::new(content.duration_secs()),
        };

        Self {
            content,
            slot,
            session: Mutex::new(session),
        }
    }

    #[must_use]
    pub fn content(&self) -> &QuizContent {
        &self.content
    }

    #[must_use]
    pub fn slot(&self) -> &SessionSlot {
        &self.slot
    }

    /// Current snapshot without mutating anything.
    pub async fn view(&self) -> QuizView {
        let session = self.session.lock().await;
        QuizView::from_session(&session, &self.content)
    }

    /// Copy of the underlying session.
    pub async fn session(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn is_running(&self) -> bool {
        self.session.lock().await.is_running()
    }

    /// Record an answer; unknown question ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Persist` if the snapshot write fails.
    pub async fn set_answer(&self, question_id: &str, value: &str) -> Result<QuizView, QuizError> {
        let questions = self.content.questions();
        self.apply(|session| session.set_answer(questions, question_id, value))
            .await
    }

    /// Navigate to `stage`; early review is allowed until time runs out.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Persist` if the snapshot write fails.
    pub async fn set_stage(&self, stage: Stage) -> Result<QuizView, QuizError> {
        self.apply(|session| {
            let changed = session.set_stage(stage);
            if changed {
                tracing::debug!(stage = stage.as_str(), "stage changed");
            }
            changed
        })
        .await
    }

    /// Submit answers for review.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Persist` if the snapshot write fails.
    pub async fn submit(&self) -> Result<QuizView, QuizError> {
        self.apply(|session| {
            let changed = session.submit();
            if changed {
                tracing::info!("attempt submitted for review");
            }
            changed
        })
        .await
    }

    /// # Errors
    ///
    /// Returns `QuizError::Persist` if the snapshot write fails.
    pub async fn toggle_pause(&self) -> Result<QuizView, QuizError> {
        self.apply(Session::toggle_pause).await
    }

    /// Advance the timer by one second.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Persist` if the snapshot write fails.
    pub async fn tick(&self) -> Result<TickReport, QuizError> {
        let mut session = self.session.lock().await;
        let outcome = session.tick();
        match outcome {
            TickOutcome::Idle => {}
            TickOutcome::Ticked { .. } => self.persist(&session).await?,
            TickOutcome::Expired => {
                tracing::info!("time is up; session moved to review");
                self.persist(&session).await?;
            }
        }
        Ok(TickReport {
            outcome,
            view: QuizView::from_session(&session, &self.content),
        })
    }

    /// Discard the attempt and clear the persisted slot.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Persist` if the slot cannot be cleared.
    pub async fn reset(&self) -> Result<QuizView, QuizError> {
        let mut session = self.session.lock().await;
        session.reset(self.content.duration_secs());
        tracing::info!(key = self.slot.key(), "session reset");
        self.slot.clear().await?;
        Ok(QuizView::from_session(&session, &self.content))
    }

    async fn apply<F>(&self, mutate: F) -> Result<QuizView, QuizError>
    where
        F: FnOnce(&mut Session) -> bool,
    {
        let mut session = self.session.lock().await;
        if mutate(&mut *session) {
            self.persist(&session).await?;
        }
        Ok(QuizView::from_session(&session, &self.content))
    }

    async fn persist(&self, session: &Session) -> Result<(), QuizError> {
        self.slot
            .save(&SessionRecord::from_session(session))
            .await
            .map_err(|err| {
                tracing::warn!(key = self.slot.key(), error = %err, "snapshot write failed");
                QuizError::from(err)
            })
    }
}
