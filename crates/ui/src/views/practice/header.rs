use dioxus::prelude::*;
use reading_core::model::Stage;
use services::QuizView;

use crate::vm::{QuizIntent, timer_class, timer_status};

#[component]
pub fn QuizHeader(title: String, view: QuizView, on_intent: EventHandler<QuizIntent>) -> Element {
    let status = timer_status(&view);
    let badge_class = timer_class(&view);
    let pause_label = if view.paused { "Resume" } else { "Pause" };
    let can_pause = view.stage != Stage::Reviewing;
    let attempted = view.progress.attempted;
    let total = view.progress.total;
    let percent = view.progress.percent.min(100);

    rsx! {
        header { class: "quiz-header",
            div { class: "quiz-header__titles",
                h1 { class: "quiz-header__title", "{title}" }
                p { class: "quiz-header__subtitle", "Academic Reading" }
            }
            div { class: "quiz-header__status",
                span { class: "{badge_class}", id: "quiz-timer",
                    span { class: "quiz-timer__status", "{status}" }
                    span { class: "quiz-timer__clock", "{view.time_label}" }
                }
                button {
                    class: "btn btn-outline",
                    id: "quiz-pause",
                    r#type: "button",
                    disabled: !can_pause,
                    onclick: move |_| on_intent.call(QuizIntent::TogglePause),
                    "{pause_label}"
                }
                button {
                    class: "btn btn-ghost",
                    id: "quiz-reset",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Reset),
                    "Reset"
                }
            }
            div { class: "quiz-progress",
                span { class: "quiz-progress__label", "Answered {attempted} / {total}" }
                div {
                    class: "progress-bar",
                    role: "progressbar",
                    aria_valuenow: "{percent}",
                    aria_valuemin: "0",
                    aria_valuemax: "100",
                    div { class: "progress-bar__fill", style: "width: {percent}%" }
                }
            }
        }
    }
}
