use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, AttemptHistoryService, Clock, QuizHandler};
use storage::VocabularyTable;
use vocab_core::model::{EntryDraft, SessionToken};
use vocab_core::time::fixed_now;

use crate::context::{AppContext, UiApp};
use crate::views::{HistoryView, QuizView};

#[derive(Clone)]
pub struct TestApp {
    pub quiz_handler: Arc<QuizHandler>,
    pub attempt_history: Arc<AttemptHistoryService>,
}

impl UiApp for TestApp {
    fn quiz_handler(&self) -> Arc<QuizHandler> {
        Arc::clone(&self.quiz_handler)
    }

    fn attempt_history(&self) -> Arc<AttemptHistoryService> {
        Arc::clone(&self.attempt_history)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Quiz,
    History,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    token: SessionToken,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| AppContext::with_session(&app, props.token));
    use_context_provider(|| props.view);
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
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::History => rsx! { HistoryView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
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

/// 90 rows, three per day; row `i` means `word{i}`.
pub fn test_services() -> AppServices {
    let drafts = (0..90)
        .map(|i| EntryDraft::new(format!("definition {i}"), "n.", format!("word{i}")))
        .collect();
    AppServices::in_memory(
        VocabularyTable::from_drafts(drafts),
        Clock::fixed(fixed_now()),
    )
}

pub fn test_app(services: &AppServices) -> Arc<TestApp> {
    Arc::new(TestApp {
        quiz_handler: services.handler(),
        attempt_history: services.history(),
    })
}

pub fn setup_view_harness(view: ViewKind, app: Arc<TestApp>, token: SessionToken) -> ViewHarness {
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view, token });
    ViewHarness { dom }
}
