use dioxus::prelude::*;
use reading_core::model::Stage;
use services::{QuizView, TICK_PERIOD, run_countdown};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, apply_intent, map_passage, map_questions, map_review};

use super::header::QuizHeader;
use super::panes::{PassagePane, QuestionsPane, ReviewPane, StageTabs};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();

    let snapshot = use_signal(|| None::<QuizView>);
    let error = use_signal(|| None::<ViewError>);
    let last_intent = use_signal(|| None::<QuizIntent>);

    let quiz_for_resource = quiz.clone();
    let resource = use_resource(move || {
        let quiz = quiz_for_resource.clone();
        let mut snapshot = snapshot;
        async move {
            snapshot.set(Some(quiz.view().await));
            Ok::<_, ViewError>(())
        }
    });
    let state = view_state_from_resource(&resource);

    // Restarting the resource drops the previous countdown future, which is
    // how pausing and leaving the timed stages stop the clock.
    let running = use_memo(move || snapshot.read().as_ref().is_some_and(|view| view.running));
    let quiz_for_timer = quiz.clone();
    let _countdown = use_resource(move || {
        let quiz = quiz_for_timer.clone();
        let active = running();
        let mut snapshot = snapshot;
        async move {
            if !active {
                return;
            }
            let exit = run_countdown(&quiz, TICK_PERIOD, |view| snapshot.set(Some(view.clone()))).await;
            tracing::debug!(?exit, "countdown finished");
        }
    });

    let quiz_for_intents = quiz.clone();
    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let quiz = quiz_for_intents.clone();
        let mut snapshot = snapshot;
        let mut error = error;
        let mut last_intent = last_intent;
        spawn(async move {
            last_intent.set(Some(intent.clone()));
            match apply_intent(&quiz, intent).await {
                Ok(view) => {
                    snapshot.set(Some(view));
                    error.set(None);
                }
                Err(err) => {
                    snapshot.set(Some(quiz.view().await));
                    error.set(Some(err));
                }
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<PracticeTestHandles>() {
                handles.register(dispatch_intent);
            }
        }
    }

    let retry_action = use_callback(move |()| match last_intent() {
        Some(intent) => dispatch_intent.call(intent),
        None => {
            let mut resource = resource;
            resource.restart();
        }
    });

    let current = snapshot.read().clone();
    let current_error = *error.read();

    rsx! {
        div { class: "page quiz-page",
            match (state, current) {
                (ViewState::Idle, _) => rsx! {
                    p { "Idle" }
                },
                (ViewState::Loading, _) | (ViewState::Ready(()), None) => rsx! {
                    p { "Loading..." }
                },
                (ViewState::Error(err), _) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| retry_action.call(()),
                        "Retry"
                    }
                },
                (ViewState::Ready(()), Some(view)) => rsx! {
                    QuizScreen {
                        view,
                        error: current_error,
                        on_intent: dispatch_intent,
                        on_retry: retry_action,
                    }
                },
            }
        }
    }
}

#[component]
fn QuizScreen(
    view: QuizView,
    #[props(!optional)] error: Option<ViewError>,
    on_intent: EventHandler<QuizIntent>,
    on_retry: EventHandler<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = ctx.quiz();
    let content = quiz.content();
    let passage = map_passage(content);
    let title = passage.title.clone();

    let body = match view.stage {
        Stage::Reading => rsx! {
            PassagePane { passage, on_intent }
        },
        Stage::Answering => rsx! {
            QuestionsPane {
                questions: map_questions(content, &view),
                locked: view.expired,
                on_intent,
            }
        },
        Stage::Reviewing => match view.review.as_ref() {
            Some(result) => rsx! {
                ReviewPane {
                    review: map_review(content, result),
                    expired: view.expired,
                    on_intent,
                }
            },
            None => rsx! {
                p { "Loading..." }
            },
        },
    };

    rsx! {
        QuizHeader { title, view: view.clone(), on_intent }
        StageTabs { current: view.stage, locked: view.expired, on_intent }
        if let Some(err) = error {
            div { class: "quiz-error", role: "alert",
                p { "{err.message()}" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
        }
        {body}
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct PracticeTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
}

#[cfg(test)]
impl PracticeTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("practice dispatch registered")
    }
}
