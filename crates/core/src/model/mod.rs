mod content;
mod ids;
mod question;
mod session;

#[cfg(test)]
pub(crate) use content::bees_content;
pub use content::{ContentError, Passage, QuestionDraft, QuestionSet, QuizContent, QuizContentDraft};
pub use ids::{ParseIdError, QuestionId};
pub use question::{Normalization, Question, QuestionError, QuestionKind, TFN_OPTIONS};
pub use session::{Session, Stage, TickOutcome};
