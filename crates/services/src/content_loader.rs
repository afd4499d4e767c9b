//! Loading quiz content from JSON.

use std::path::Path;

use reading_core::model::{QuizContent, QuizContentDraft};

use crate::error::ContentLoadError;

/// Parse and validate a JSON content document.
///
/// # Errors
///
/// Returns `ContentLoadError::Json` for malformed documents and
/// `ContentLoadError::Content` when validation fails.
pub fn parse_content(raw: &str) -> Result<QuizContent, ContentLoadError> {
    let draft: QuizContentDraft = serde_json::from_str(raw)?;
    Ok(draft.validate()?)
}

/// Read a content file from disk.
///
/// # Errors
///
/// Returns `ContentLoadError::Io` if the file cannot be read, otherwise the
/// errors of [`parse_content`].
pub fn load_content_file(path: &Path) -> Result<QuizContent, ContentLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let content = parse_content(&raw)?;
    tracing::debug!(
        path = %path.display(),
        questions = content.questions().len(),
        "loaded quiz content"
    );
    Ok(content)
}
