use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    Normalization, ParseIdError, Question, QuestionError, QuestionId, QuestionKind, TFN_OPTIONS,
};
use crate::timer::DEFAULT_DURATION_SECS;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentError {
    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error(transparent)]
    InvalidId(#[from] ParseIdError),

    #[error("question set is empty")]
    EmptyQuestionSet,

    #[error("question id {id} is used more than once")]
    DuplicateQuestionId { id: QuestionId },

    #[error("question {id} of kind {kind:?} cannot declare these options")]
    UnexpectedOptions { id: QuestionId, kind: QuestionKind },

    #[error("passage has no text")]
    EmptyPassage,

    #[error("attempt duration must be greater than zero")]
    ZeroDuration,
}

//
// ─── PASSAGE ───────────────────────────────────────────────────────────────────
//

/// Reading passage, stored as paragraphs split on blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    title: String,
    paragraphs: Vec<String>,
}

impl Passage {
    /// # Errors
    ///
    /// Returns `ContentError::EmptyPassage` if `body` has no non-blank paragraph.
    pub fn new(title: impl Into<String>, body: &str) -> Result<Self, ContentError> {
        let mut paragraphs: Vec<String> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        for line in body.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    paragraphs.push(current.join("\n"));
                    current.clear();
                }
            } else {
                current.push(line.trim());
            }
        }
        if !current.is_empty() {
            paragraphs.push(current.join("\n"));
        }
        if paragraphs.is_empty() {
            return Err(ContentError::EmptyPassage);
        }
        Ok(Self {
            title: title.into().trim().to_string(),
            paragraphs,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// Ordered, non-empty list of questions with unique ids.
///
/// The order is the scoring and display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// # Errors
    ///
    /// Returns `ContentError::EmptyQuestionSet` for an empty list and
    /// `ContentError::DuplicateQuestionId` if two questions share an id.
    pub fn new(questions: Vec<Question>) -> Result<Self, ContentError> {
        if questions.is_empty() {
            return Err(ContentError::EmptyQuestionSet);
        }
        for (idx, question) in questions.iter().enumerate() {
            if questions[..idx].iter().any(|prev| prev.id() == question.id()) {
                return Err(ContentError::DuplicateQuestionId {
                    id: question.id().clone(),
                });
            }
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id().as_str() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

//
// ─── QUIZ CONTENT ──────────────────────────────────────────────────────────────
//

/// Static configuration of one attempt: passage, questions, and time limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizContent {
    passage: Passage,
    questions: QuestionSet,
    duration_secs: u32,
}

impl QuizContent {
    /// # Errors
    ///
    /// Returns `ContentError::ZeroDuration` if `duration_secs` is zero.
    pub fn new(
        passage: Passage,
        questions: QuestionSet,
        duration_secs: u32,
    ) -> Result<Self, ContentError> {
        if duration_secs == 0 {
            return Err(ContentError::ZeroDuration);
        }
        Ok(Self {
            passage,
            questions,
            duration_secs,
        })
    }

    /// The built-in Cambridge 20 Academic practice passage with five questions.
    ///
    /// # Panics
    ///
    /// Panics if the built-in content fails validation.
    #[must_use]
    pub fn cambridge_demo() -> Self {
        cambridge_demo_draft()
            .validate()
            .expect("built-in content should be valid")
    }

    #[must_use]
    pub fn passage(&self) -> &Passage {
        &self.passage
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }
}

//
// ─── DRAFTS (deserializable input) ─────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub normalize: Option<Normalization>,
}

impl QuestionDraft {
    /// # Errors
    ///
    /// Returns `ContentError` if the id is blank, the question fails
    /// validation, or options are declared for a kind that does not take them.
    pub fn validate(self) -> Result<Question, ContentError> {
        let id = QuestionId::new(self.id)?;
        let question = match self.kind {
            QuestionKind::MultipleChoice => {
                Question::multiple_choice(id, self.prompt, self.options, self.answer)?
            }
            QuestionKind::TrueFalseNotGiven => {
                if !self.options.is_empty() && self.options != TFN_OPTIONS {
                    return Err(ContentError::UnexpectedOptions {
                        id,
                        kind: self.kind,
                    });
                }
                Question::true_false_not_given(id, self.prompt, self.answer)?
            }
            QuestionKind::ShortAnswer => {
                if !self.options.is_empty() {
                    return Err(ContentError::UnexpectedOptions {
                        id,
                        kind: self.kind,
                    });
                }
                Question::short_answer(id, self.prompt, self.answer)?
            }
        };

        let question = match self.placeholder {
            Some(placeholder) => question.with_placeholder(placeholder),
            None => question,
        };
        Ok(question.with_normalization(self.normalize.unwrap_or_default()))
    }
}

fn default_duration_secs() -> u32 {
    DEFAULT_DURATION_SECS
}

/// Deserializable form of [`QuizContent`], e.g. from a JSON fixture file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizContentDraft {
    pub title: String,
    pub passage: String,
    #[serde(default = "default_duration_secs")]
    pub duration_secs: u32,
    pub questions: Vec<QuestionDraft>,
}

impl QuizContentDraft {
    /// Validate and normalize the draft into quiz content.
    ///
    /// # Errors
    ///
    /// Returns the first `ContentError` found.
    pub fn validate(self) -> Result<QuizContent, ContentError> {
        let passage = Passage::new(self.title, &self.passage)?;
        let questions = self
            .questions
            .into_iter()
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        QuizContent::new(passage, QuestionSet::new(questions)?, self.duration_secs)
    }
}

const DEMO_PASSAGE: &str = "The development of test strategies in standardised English assessments has evolved over decades.

In the context of academic reading, candidates must quickly distinguish between facts, opinions, and author claims while negotiating unfamiliar terminology. Research suggests that learners who pre-scan headings and topic sentences can build a mental map of the passage and improve both speed and accuracy.

However, reading speed alone is not a reliable predictor of comprehension. Effective test-takers combine targeted skimming with selective close reading, and they annotate key transitions\u{2014}contrast, cause-effect, concession\u{2014}to track argument structure.

Finally, successful candidates actively paraphrase the question stem and locate synonyms in the passage, rather than hunting for identical words. This reduces the cognitive load created by distractors and allows for more reliable inference-making.";

fn choice(
    id: &str,
    kind: QuestionKind,
    prompt: &str,
    options: &[&str],
    answer: &str,
) -> QuestionDraft {
    QuestionDraft {
        id: id.to_string(),
        kind,
        prompt: prompt.to_string(),
        options: options.iter().map(|opt| (*opt).to_string()).collect(),
        answer: answer.to_string(),
        placeholder: None,
        normalize: None,
    }
}

fn cambridge_demo_draft() -> QuizContentDraft {
    QuizContentDraft {
        title: "Cambridge IELTS 20 Academic: Reading Practice".to_string(),
        passage: DEMO_PASSAGE.to_string(),
        duration_secs: DEFAULT_DURATION_SECS,
        questions: vec![
            choice(
                "q1",
                QuestionKind::MultipleChoice,
                "According to the passage, what do strong readers do before detailed reading?",
                &[
                    "Memorise complex terminology",
                    "Pre-scan headings and topic sentences",
                    "Read the questions last",
                    "Underline every sentence",
                ],
                "Pre-scan headings and topic sentences",
            ),
            choice(
                "q2",
                QuestionKind::TrueFalseNotGiven,
                "Reading speed is the best single predictor of comprehension.",
                &[],
                "False",
            ),
            QuestionDraft {
                id: "q3".to_string(),
                kind: QuestionKind::ShortAnswer,
                prompt: "Name one discourse feature candidates mark to track arguments (one word)."
                    .to_string(),
                options: Vec::new(),
                answer: "contrast".to_string(),
                placeholder: Some("e.g., contrast".to_string()),
                normalize: Some(Normalization::TrimLowercase),
            },
            choice(
                "q4",
                QuestionKind::MultipleChoice,
                "What strategy reduces the cognitive load from distractors?",
                &[
                    "Searching for identical words",
                    "Paraphrasing stems and locating synonyms",
                    "Skipping challenging paragraphs",
                    "Timing each paragraph strictly",
                ],
                "Paraphrasing stems and locating synonyms",
            ),
            choice(
                "q5",
                QuestionKind::TrueFalseNotGiven,
                "The passage recommends combining skimming with selective close reading.",
                &[],
                "True",
            ),
        ],
    }
}

/// Three-question, twenty-minute content used by tests that must not depend
/// on the built-in passage.
#[cfg(test)]
pub(crate) fn bees_content() -> QuizContent {
    QuizContentDraft {
        title: "Bees".to_string(),
        passage: "Bees dance.\r\n\r\nThe dance points to food.".to_string(),
        duration_secs: 1200,
        questions: vec![
            choice(
                "b1",
                QuestionKind::MultipleChoice,
                "What does the dance show?",
                &["Danger", "Food", "Weather"],
                "Food",
            ),
            choice(
                "b2",
                QuestionKind::TrueFalseNotGiven,
                "Bees dance at night.",
                &[],
                "Not Given",
            ),
            QuestionDraft {
                id: "b3".to_string(),
                kind: QuestionKind::ShortAnswer,
                prompt: "What do bees perform? (ONE WORD)".to_string(),
                options: Vec::new(),
                answer: "dance".to_string(),
                placeholder: None,
                normalize: Some(Normalization::TrimLowercase),
            },
        ],
    }
    .validate()
    .expect("bees fixture is valid")
}
