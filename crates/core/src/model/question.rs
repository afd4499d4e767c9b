use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;

use crate::model::QuestionId;

/// Fixed option list shared by every True/False/Not Given question.
pub const TFN_OPTIONS: [&str; 3] = ["True", "False", "Not Given"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalseNotGiven,
    ShortAnswer,
}

impl QuestionKind {
    /// Kinds answered by picking one of a fixed list of options.
    #[must_use]
    pub const fn has_options(self) -> bool {
        matches!(self, Self::MultipleChoice | Self::TrueFalseNotGiven)
    }
}

/// How a raw answer is canonicalized before comparison.
///
/// Applied symmetrically to the user answer and the expected answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    #[default]
    Identity,
    TrimLowercase,
}

impl Normalization {
    #[must_use]
    pub fn apply(self, value: &str) -> Cow<'_, str> {
        match self {
            Self::Identity => Cow::Borrowed(value),
            Self::TrimLowercase => Cow::Owned(value.trim().to_lowercase()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} needs at least two options, got {len}")]
    TooFewOptions { id: QuestionId, len: usize },

    #[error("question {id} lists option {option:?} more than once")]
    DuplicateOption { id: QuestionId, option: String },

    #[error("question {id} expects {answer:?}, which is not one of its options")]
    AnswerNotAnOption { id: QuestionId, answer: String },

    #[error("question {id} has an empty answer key")]
    EmptyAnswer { id: QuestionId },
}

/// A single item of the reading test.
///
/// Immutable once built; all constructors validate the answer key against the
/// question kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    kind: QuestionKind,
    prompt: String,
    options: Vec<String>,
    answer: String,
    normalization: Normalization,
    placeholder: Option<String>,
}

impl Question {
    /// Build a multiple-choice question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is empty, fewer than two options
    /// are given, an option repeats, or `answer` is not one of the options.
    pub fn multiple_choice<I, S>(
        id: QuestionId,
        prompt: impl Into<String>,
        options: I,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        Self::with_options(id, QuestionKind::MultipleChoice, prompt.into(), options, answer.into())
    }

    /// Build a True/False/Not Given question; options are always [`TFN_OPTIONS`].
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is empty or `answer` is not one of
    /// `True`, `False`, `Not Given`.
    pub fn true_false_not_given(
        id: QuestionId,
        prompt: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let options = TFN_OPTIONS.iter().map(|opt| (*opt).to_string()).collect();
        Self::with_options(
            id,
            QuestionKind::TrueFalseNotGiven,
            prompt.into(),
            options,
            answer.into(),
        )
    }

    /// Build a free-text question. Comparison is exact unless a normalization
    /// is attached with [`Question::with_normalization`].
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or answer key is empty.
    pub fn short_answer(
        id: QuestionId,
        prompt: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let answer = answer.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer { id });
        }
        Ok(Self {
            id,
            kind: QuestionKind::ShortAnswer,
            prompt,
            options: Vec::new(),
            answer,
            normalization: Normalization::Identity,
            placeholder: None,
        })
    }

    fn with_options(
        id: QuestionId,
        kind: QuestionKind,
        prompt: String,
        options: Vec<String>,
        answer: String,
    ) -> Result<Self, QuestionError> {
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id,
                len: options.len(),
            });
        }
        for (idx, option) in options.iter().enumerate() {
            if options[..idx].contains(option) {
                return Err(QuestionError::DuplicateOption {
                    id,
                    option: option.clone(),
                });
            }
        }
        if !options.contains(&answer) {
            return Err(QuestionError::AnswerNotAnOption { id, answer });
        }

        Ok(Self {
            id,
            kind,
            prompt,
            options,
            answer,
            normalization: Normalization::Identity,
            placeholder: None,
        })
    }

    #[must_use]
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        let placeholder = placeholder.into();
        self.placeholder = (!placeholder.trim().is_empty()).then_some(placeholder);
        self
    }

    /// Compare a raw user answer against the key after normalization.
    #[must_use]
    pub fn is_correct(&self, raw: &str) -> bool {
        self.normalization.apply(raw) == self.normalization.apply(&self.answer)
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Ordered options; empty for short-answer questions.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }
}
