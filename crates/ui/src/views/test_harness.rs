use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use reading_core::model::QuizContent;
use services::QuizService;
use storage::repository::{InMemoryRepository, KeyValueRepository};
use storage::{DEFAULT_SLOT_KEY, SessionSlot};

use crate::context::{UiApp, build_app_context};
use crate::views::PracticeView;
use crate::views::practice::PracticeTestHandles;

#[derive(Clone)]
struct TestApp {
    quiz: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: PracticeTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    rsx! { PracticeView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub quiz: Arc<QuizService>,
    pub handles: PracticeTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness over a fresh in-memory slot.
pub async fn setup_view_harness() -> ViewHarness {
    setup_view_harness_with_repo(Arc::new(InMemoryRepository::new())).await
}

/// Harness whose session is restored from `repo`.
pub async fn setup_view_harness_with_repo(repo: Arc<dyn KeyValueRepository>) -> ViewHarness {
    let slot = SessionSlot::new(repo, DEFAULT_SLOT_KEY);
    let quiz = Arc::new(QuizService::restore(Arc::new(QuizContent::cambridge_demo()), slot).await);
    let handles = PracticeTestHandles::default();

    let app = Arc::new(TestApp {
        quiz: Arc::clone(&quiz),
    });
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, quiz, handles }
}

/// Harness restored from a raw stored value.
pub async fn setup_view_harness_with_record(raw: &str) -> ViewHarness {
    let repo = InMemoryRepository::new();
    repo.put_value(DEFAULT_SLOT_KEY, raw)
        .await
        .expect("seed slot");
    setup_view_harness_with_repo(Arc::new(repo)).await
}
