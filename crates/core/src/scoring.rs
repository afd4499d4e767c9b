use std::collections::BTreeMap;
use std::fmt;

use crate::model::{QuestionId, QuestionSet};

/// Heuristic IELTS band estimate (5.0 to 8.5 in half bands).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Band(f32);

impl Band {
    pub const FLOOR: Band = Band(5.0);

    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Fraction-correct thresholds, highest first.
const BAND_TABLE: [(f64, f32); 7] = [
    (0.88, 8.5),
    (0.80, 8.0),
    (0.72, 7.5),
    (0.64, 7.0),
    (0.56, 6.5),
    (0.48, 6.0),
    (0.40, 5.5),
];

/// Map a correct count to a band using the fixed threshold table.
#[must_use]
pub fn band(correct: usize, total: usize) -> Band {
    if total == 0 {
        return Band::FLOOR;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = correct as f64 / total as f64;
    BAND_TABLE
        .iter()
        .find(|(threshold, _)| pct >= *threshold)
        .map_or(Band::FLOOR, |(_, value)| Band(*value))
}

/// Scoring of one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOutcome {
    pub id: QuestionId,
    pub correct: bool,
    pub expected: String,
    /// Raw user input, empty if the question was not answered.
    pub given: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub outcomes: Vec<QuestionOutcome>,
    pub correct: usize,
    pub total: usize,
    pub band: Band,
}

impl ScoreResult {
    #[must_use]
    pub fn outcome(&self, id: &str) -> Option<&QuestionOutcome> {
        self.outcomes.iter().find(|o| o.id.as_str() == id)
    }
}

/// Score the answers against the question set in its fixed order.
///
/// Missing answers count as incorrect with an empty user answer.
#[must_use]
pub fn score(questions: &QuestionSet, answers: &BTreeMap<QuestionId, String>) -> ScoreResult {
    let mut correct = 0;
    let outcomes: Vec<QuestionOutcome> = questions
        .iter()
        .map(|question| {
            let given = answers
                .get(question.id().as_str())
                .cloned()
                .unwrap_or_default();
            let is_correct = question.is_correct(&given);
            if is_correct {
                correct += 1;
            }
            QuestionOutcome {
                id: question.id().clone(),
                correct: is_correct,
                expected: question.answer().to_string(),
                given,
            }
        })
        .collect();
    let total = outcomes.len();

    ScoreResult {
        outcomes,
        correct,
        total,
        band: band(correct, total),
    }
}
