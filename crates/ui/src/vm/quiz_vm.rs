use reading_core::model::{QuestionKind, QuizContent, Stage};
use reading_core::ScoreResult;
use services::{QuizError, QuizService, QuizView};

use crate::views::ViewError;

/// User actions on the practice page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Answer { id: String, value: String },
    GoTo(Stage),
    Submit,
    TogglePause,
    Reset,
}

/// Forward an intent to the quiz service.
///
/// # Errors
///
/// Returns `ViewError::NotSaved` when the change could not be persisted; the
/// service still holds the change in memory.
pub async fn apply_intent(quiz: &QuizService, intent: QuizIntent) -> Result<QuizView, ViewError> {
    let result = match intent {
        QuizIntent::Answer { id, value } => quiz.set_answer(&id, &value).await,
        QuizIntent::GoTo(stage) => quiz.set_stage(stage).await,
        QuizIntent::Submit => quiz.submit().await,
        QuizIntent::TogglePause => quiz.toggle_pause().await,
        QuizIntent::Reset => quiz.reset().await,
    };
    result.map_err(|err: QuizError| {
        tracing::warn!(error = %err, "quiz change not saved");
        ViewError::NotSaved
    })
}

#[must_use]
pub fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Reading => "Passage",
        Stage::Answering => "Questions",
        Stage::Reviewing => "Review",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassageVm {
    pub title: String,
    pub paragraphs: Vec<String>,
}

#[must_use]
pub fn map_passage(content: &QuizContent) -> PassageVm {
    let passage = content.passage();
    PassageVm {
        title: passage.title().to_string(),
        paragraphs: passage.paragraphs().to_vec(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub value: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub id: String,
    pub number: usize,
    pub prompt: String,
    pub kind: QuestionKind,
    pub options: Vec<OptionVm>,
    pub value: String,
    pub placeholder: Option<String>,
}

impl QuestionVm {
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            QuestionKind::MultipleChoice => "Multiple choice",
            QuestionKind::TrueFalseNotGiven => "True / False / Not Given",
            QuestionKind::ShortAnswer => "Short answer",
        }
    }
}

/// Questions in content order with the current answers filled in.
#[must_use]
pub fn map_questions(content: &QuizContent, view: &QuizView) -> Vec<QuestionVm> {
    content
        .questions()
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            let value = view.answer(question.id().as_str()).unwrap_or_default().to_string();
            let options = question
                .options()
                .iter()
                .map(|option| OptionVm {
                    selected: *option == value,
                    value: option.clone(),
                })
                .collect();
            QuestionVm {
                id: question.id().to_string(),
                number: idx + 1,
                prompt: question.prompt().to_string(),
                kind: question.kind(),
                options,
                value,
                placeholder: question.placeholder().map(str::to_string),
            }
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub id: String,
    pub number: usize,
    pub prompt: String,
    pub given: String,
    pub expected: String,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewVm {
    pub score_label: String,
    pub band_label: String,
    pub rows: Vec<ReviewRowVm>,
}

#[must_use]
pub fn map_review(content: &QuizContent, result: &ScoreResult) -> ReviewVm {
    let rows = result
        .outcomes
        .iter()
        .enumerate()
        .map(|(idx, outcome)| ReviewRowVm {
            id: outcome.id.to_string(),
            number: idx + 1,
            prompt: content
                .questions()
                .get(outcome.id.as_str())
                .map(|q| q.prompt().to_string())
                .unwrap_or_default(),
            given: if outcome.given.trim().is_empty() {
                "(no answer)".to_string()
            } else {
                outcome.given.clone()
            },
            expected: outcome.expected.clone(),
            correct: outcome.correct,
        })
        .collect();

    ReviewVm {
        score_label: format!("{} / {}", result.correct, result.total),
        band_label: format!("Band {}", result.band),
        rows,
    }
}
