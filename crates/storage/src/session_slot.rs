use reading_core::model::{QuizContent, Session, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::repository::{KeyValueRepository, StorageError};

/// Key of the single slot holding the in-progress attempt.
pub const DEFAULT_SLOT_KEY: &str = "ielts-reading-c20-demo-v1";

/// Persisted shape of a session.
///
/// Every field is optional so that `{}` or any subset of fields decodes; the
/// missing ones fall back to the session defaults when rehydrated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seconds_left: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paused: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

impl SessionRecord {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self {
            answers: Some(
                session
                    .answers()
                    .iter()
                    .map(|(id, value)| (id.to_string(), value.clone()))
                    .collect(),
            ),
            seconds_left: Some(session.seconds_remaining()),
            paused: Some(session.paused()),
            stage: Some(session.stage()),
        }
    }

    /// Convert the record back into a domain `Session` for `content`.
    #[must_use]
    pub fn into_session(self, content: &QuizContent) -> Session {
        Session::restore(
            content.duration_secs(),
            content.questions(),
            self.answers.unwrap_or_default(),
            self.seconds_left,
            self.paused,
            self.stage,
        )
    }

    /// Decode a stored value. `null` decodes to `None` like a missing key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON or field types.
    pub fn decode(raw: &str) -> Result<Option<Self>, StorageError> {
        serde_json::from_str::<Option<Self>>(raw)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn encode(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}

/// Persistence adapter for the one named slot holding the session snapshot.
#[derive(Clone)]
pub struct SessionSlot {
    repo: Arc<dyn KeyValueRepository>,
    key: String,
}

impl SessionSlot {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored record.
    ///
    /// Never fails: a missing key, unreadable backend, or malformed content all
    /// yield `None` so the caller starts from defaults.
    pub async fn load(&self) -> Option<SessionRecord> {
        let raw = match self.repo.get_value(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "session slot unreadable; using defaults");
                return None;
            }
        };

        match SessionRecord::decode(&raw) {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "session slot malformed; using defaults");
                None
            }
        }
    }

    /// Overwrite the slot with the full record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the backend write fails.
    pub async fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let raw = record.encode()?;
        self.repo.put_value(&self.key, &raw).await
    }

    /// Store an empty record (`{}`), which rehydrates to all defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.save(&SessionRecord::default()).await
    }
}
