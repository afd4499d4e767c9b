use std::sync::Arc;

use reading_core::model::QuizContent;
use storage::{SessionSlot, Storage};

use crate::error::AppServicesError;
use crate::quiz::QuizService;

/// Assembles app-facing services around one quiz and its storage slot.
#[derive(Clone)]
pub struct AppServices {
    quiz: Arc<QuizService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the database cannot be opened or migrated.
    pub async fn new_sqlite(
        db_url: &str,
        content: QuizContent,
        slot_key: &str,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, content, slot_key).await)
    }

    /// Build services over volatile in-memory storage.
    pub async fn in_memory(content: QuizContent, slot_key: &str) -> Self {
        Self::from_storage(&Storage::in_memory(), content, slot_key).await
    }

    /// Restore the quiz session from `storage`.
    pub async fn from_storage(storage: &Storage, content: QuizContent, slot_key: &str) -> Self {
        let slot = SessionSlot::new(Arc::clone(&storage.values), slot_key);
        let quiz = QuizService::restore(Arc::new(content), slot).await;
        Self {
            quiz: Arc::new(quiz),
        }
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}
