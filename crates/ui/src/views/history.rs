use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AttemptRowVm, map_attempt_rows};

const HISTORY_LIMIT: u32 = 50;

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let history = ctx.attempt_history();
    let mut filter = use_signal(String::new);

    let resource = use_resource(move || {
        let history = history.clone();
        let student = filter();
        async move {
            let items = history
                .list_recent(Some(&student), HISTORY_LIMIT)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(map_attempt_rows(&items))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page history-page",
            h2 { "History" }
            label { r#for: "history-filter", "Student:" }
            input {
                id: "history-filter",
                r#type: "text",
                placeholder: "Everyone",
                value: "{filter}",
                oninput: move |evt: FormEvent| filter.set(evt.value()),
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { "No attempts yet." }
                    } else {
                        table { class: "history-table",
                            thead {
                                tr {
                                    th { "Student" }
                                    th { "Day" }
                                    th { "Round" }
                                    th { "Score" }
                                    th { "Completed" }
                                }
                            }
                            tbody {
                                for row in rows {
                                    AttemptRow { key: "{row.id}", row }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }
        }
    }
}

#[component]
fn AttemptRow(row: AttemptRowVm) -> Element {
    rsx! {
        tr {
            td { "{row.student}" }
            td { "{row.day_label}" }
            td { "{row.round_label}" }
            td { "{row.score_label}" }
            td { "{row.completed_at_str}" }
        }
    }
}
