use std::collections::BTreeMap;
use std::sync::Arc;

use dioxus::prelude::*;
use services::{Notice, QuizHandler, QuizRequest, SessionSnapshot};
use tracing::warn;
use vocab_core::model::{Day, QuestionNumber, SessionToken};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{
    INTRO_MESSAGE, MissedRowVm, QuestionVm, QuizStage, ResultVm, map_quiz_page, notice_message,
    vocabulary_caption,
};

type Answers = BTreeMap<QuestionNumber, String>;

/// Signals shared by every quiz interaction.
///
/// Each interaction becomes one `QuizRequest`; the response replaces the
/// rendered snapshot and the typed answers.
#[derive(Clone, Copy, PartialEq)]
struct QuizChannel {
    handler: Signal<Arc<QuizHandler>>,
    token: SessionToken,
    snapshot: Signal<SessionSnapshot>,
    answers: Signal<Answers>,
    notice: Signal<Option<Notice>>,
    error: Signal<Option<ViewError>>,
}

impl QuizChannel {
    fn send(self, request: QuizRequest) {
        spawn(self.apply(request));
    }

    async fn apply(mut self, request: QuizRequest) {
        let handler = self.handler.cloned();
        match handler.handle(self.token, request).await {
            Ok(response) => {
                self.answers.set(response.snapshot.answers.clone());
                self.snapshot.set(response.snapshot);
                self.notice.set(response.notice);
                self.error.set(None);
            }
            Err(err) => {
                warn!(token = %self.token, error = %err, "quiz request failed");
                self.error.set(Some(ViewError::Unknown));
            }
        }
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let handler = use_signal(|| ctx.quiz_handler());
    let channel = QuizChannel {
        handler,
        token: ctx.session_token(),
        snapshot: use_signal(SessionSnapshot::default),
        answers: use_signal(Answers::new),
        notice: use_signal(|| None::<Notice>),
        error: use_signal(|| None::<ViewError>),
    };

    // Pick up whatever the session already holds, e.g. after visiting History.
    use_hook(move || channel.send(QuizRequest::Refresh));

    let stats = use_resource(move || {
        let service = handler.cloned().service();
        async move { service.vocabulary_stats().await.ok() }
    });
    let caption = stats
        .cloned()
        .flatten()
        .as_ref()
        .map(vocabulary_caption)
        .unwrap_or_default();

    let page = map_quiz_page(&channel.snapshot.read());
    let notice = (channel.notice)().and_then(notice_message);
    let error = (channel.error)();

    rsx! {
        div { class: "page quiz-page",
            QuizSidebar { channel, caption }

            section { class: "quiz-main",
                if let Some(err) = error {
                    p { class: "alert alert-error", "{err.message()}" }
                }
                if let Some(message) = notice {
                    p { class: "alert alert-warning", "{message}" }
                }

                match page.stage {
                    QuizStage::Intro => rsx! {
                        if let Some(message) = page.empty_day.clone() {
                            p { class: "alert alert-warning", "{message}" }
                        }
                        p { class: "alert alert-info", "{INTRO_MESSAGE}" }
                    },
                    QuizStage::Answering => rsx! {
                        h2 { "{page.heading}" }
                        p { "{page.student_line}" }
                        QuizForm {
                            channel,
                            generation: page.generation,
                            questions: page.questions.clone(),
                        }
                    },
                    QuizStage::Results => rsx! {
                        h2 { "{page.heading}" }
                        p { "{page.student_line}" }
                        if let Some(result) = page.result.clone() {
                            QuizResults { channel, result }
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn QuizSidebar(channel: QuizChannel, caption: String) -> Element {
    let mut student = use_signal(String::new);
    let mut day = use_signal(Day::default);

    rsx! {
        aside { class: "quiz-sidebar",
            label { r#for: "student-name", "Enter your name:" }
            input {
                id: "student-name",
                r#type: "text",
                value: "{student}",
                oninput: move |evt: FormEvent| student.set(evt.value()),
            }

            label { r#for: "day-select", "Select day (1-30):" }
            select {
                id: "day-select",
                onchange: move |evt: FormEvent| {
                    if let Ok(parsed) = evt.value().parse::<Day>() {
                        day.set(parsed);
                    }
                },
                for option_day in Day::all() {
                    option {
                        key: "{option_day}",
                        value: "{option_day}",
                        selected: option_day == day(),
                        "{option_day}"
                    }
                }
            }
            if !caption.is_empty() {
                p { class: "quiz-caption", "{caption}" }
            }

            button {
                id: "start-test",
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    channel.send(QuizRequest::Start {
                        student: student(),
                        day: day(),
                    });
                },
                "Start Test"
            }
        }
    }
}

#[component]
fn QuizForm(channel: QuizChannel, generation: u64, questions: Vec<QuestionVm>) -> Element {
    rsx! {
        div { class: "quiz-form",
            for question in questions {
                AnswerField {
                    key: "{question.input_id}",
                    answers: channel.answers,
                    question: question.clone(),
                }
            }
            button {
                id: "submit-answers",
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| {
                    let answers = (channel.answers)();
                    channel.send(QuizRequest::Submit { generation, answers });
                },
                "Submit Answers"
            }
        }
    }
}

#[component]
fn AnswerField(answers: Signal<Answers>, question: QuestionVm) -> Element {
    let number = question.number;
    let value = answers.read().get(&number).cloned().unwrap_or_default();

    rsx! {
        div { class: "quiz-question",
            p {
                strong { "{question.label}" }
                " {question.prompt}"
            }
            input {
                id: "{question.input_id}",
                r#type: "text",
                value: "{value}",
                oninput: move |evt: FormEvent| {
                    answers.write().insert(number, evt.value());
                },
            }
        }
    }
}

#[component]
fn QuizResults(channel: QuizChannel, result: ResultVm) -> Element {
    let can_retake = result.can_retake();

    rsx! {
        div { class: "quiz-results",
            p { class: "alert alert-success", "{result.headline}" }
            if can_retake {
                p { class: "alert alert-warning", "Questions you missed:" }
                table { class: "missed-table",
                    thead {
                        tr {
                            th { "No." }
                            th { "Definition" }
                            th { "POS" }
                            th { "Answer" }
                        }
                    }
                    tbody {
                        for row in result.missed.iter().cloned() {
                            MissedRow { key: "{row.number}", row }
                        }
                    }
                }
                button {
                    id: "retake-missed",
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| channel.send(QuizRequest::Retake),
                    "Retake missed"
                }
            }
        }
    }
}

#[component]
fn MissedRow(row: MissedRowVm) -> Element {
    rsx! {
        tr {
            td { "{row.number}" }
            td { "{row.definition}" }
            td { "{row.part_of_speech}" }
            td { "{row.answer}" }
        }
    }
}
