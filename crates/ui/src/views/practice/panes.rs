use dioxus::prelude::*;
use reading_core::model::{QuestionKind, Stage};

use crate::vm::{OptionVm, PassageVm, QuestionVm, QuizIntent, ReviewRowVm, ReviewVm, stage_label};

#[component]
pub fn StageTabs(current: Stage, locked: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        nav { class: "stage-tabs", role: "tablist",
            for stage in Stage::ALL {
                StageTab { key: "{stage:?}", stage, selected: stage == current, locked, on_intent }
            }
        }
    }
}

#[component]
fn StageTab(stage: Stage, selected: bool, locked: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    let class = if selected { "stage-tab stage-tab--active" } else { "stage-tab" };
    let label = stage_label(stage);
    let id = stage.as_str();
    rsx! {
        button {
            class: "{class}",
            id: "stage-tab-{id}",
            role: "tab",
            r#type: "button",
            aria_selected: "{selected}",
            disabled: locked && !selected,
            onclick: move |_| on_intent.call(QuizIntent::GoTo(stage)),
            "{label}"
        }
    }
}

#[component]
pub fn PassagePane(passage: PassageVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "pane passage-pane",
            h2 { class: "passage-pane__title", "{passage.title}" }
            for (idx, paragraph) in passage.paragraphs.iter().enumerate() {
                p { key: "{idx}", class: "passage-pane__paragraph", "{paragraph}" }
            }
            div { class: "pane__actions",
                button {
                    class: "btn btn-primary",
                    id: "go-to-questions",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::GoTo(Stage::Answering)),
                    "Go to questions"
                }
            }
        }
    }
}

#[component]
pub fn QuestionsPane(
    questions: Vec<QuestionVm>,
    locked: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    rsx! {
        section { class: "pane questions-pane",
            for question in questions.iter() {
                QuestionCard { key: "{question.id}", question: question.clone(), locked, on_intent }
            }
            div { class: "pane__actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::GoTo(Stage::Reading)),
                    "Back to passage"
                }
                button {
                    class: "btn btn-primary",
                    id: "submit-answers",
                    r#type: "button",
                    disabled: locked,
                    onclick: move |_| on_intent.call(QuizIntent::Submit),
                    "Submit answers"
                }
            }
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, locked: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    let kind_label = question.kind_label();
    let id = question.id.clone();

    rsx! {
        article { class: "question-card", id: "question-{question.id}",
            header { class: "question-card__header",
                span { class: "question-card__number", "Q{question.number}" }
                span { class: "question-card__kind", "{kind_label}" }
            }
            p { class: "question-card__prompt", "{question.prompt}" }
            if question.kind == QuestionKind::ShortAnswer {
                input {
                    class: "short-answer",
                    r#type: "text",
                    name: "{question.id}",
                    value: "{question.value}",
                    placeholder: question.placeholder.clone().unwrap_or_default(),
                    disabled: locked,
                    oninput: move |evt: FormEvent| {
                        on_intent.call(QuizIntent::Answer {
                            id: id.clone(),
                            value: evt.value(),
                        });
                    },
                }
            } else {
                div { class: "question-card__options", role: "radiogroup",
                    for option in question.options.iter() {
                        OptionRow {
                            key: "{option.value}",
                            question_id: question.id.clone(),
                            option: option.clone(),
                            locked,
                            on_intent,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn OptionRow(
    question_id: String,
    option: OptionVm,
    locked: bool,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let id = question_id.clone();
    let value = option.value.clone();
    let class = if option.selected { "option option--selected" } else { "option" };
    rsx! {
        label { class: "{class}",
            input {
                r#type: "radio",
                name: "{question_id}",
                value: "{option.value}",
                checked: option.selected,
                disabled: locked,
                onchange: move |_| {
                    on_intent.call(QuizIntent::Answer {
                        id: id.clone(),
                        value: value.clone(),
                    });
                },
            }
            span { class: "option__label", "{option.value}" }
        }
    }
}

#[component]
pub fn ReviewPane(review: ReviewVm, expired: bool, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        section { class: "pane review-pane",
            if expired {
                p { class: "review-pane__notice", role: "status", "Time is up. Your answers have been submitted." }
            }
            div { class: "review-pane__summary",
                span { class: "review-pane__score", "Score: {review.score_label}" }
                span { class: "review-pane__band", "{review.band_label}" }
            }
            p { class: "review-pane__hint", "Band estimates are indicative only." }
            ol { class: "review-pane__rows",
                for row in review.rows.iter() {
                    ReviewRow { key: "{row.id}", row: row.clone() }
                }
            }
            if !expired {
                div { class: "pane__actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_intent.call(QuizIntent::GoTo(Stage::Answering)),
                        "Back to questions"
                    }
                }
            }
        }
    }
}

#[component]
fn ReviewRow(row: ReviewRowVm) -> Element {
    let (class, mark) = if row.correct {
        ("review-row review-row--correct", "Correct")
    } else {
        ("review-row review-row--incorrect", "Incorrect")
    };
    rsx! {
        li { class: "{class}",
            p { class: "review-row__prompt", "Q{row.number}. {row.prompt}" }
            p { class: "review-row__given", "Your answer: {row.given}" }
            p { class: "review-row__expected", "Correct answer: {row.expected}" }
            span { class: "review-row__mark", "{mark}" }
        }
    }
}
