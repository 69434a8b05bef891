use api::entity::load_or_sample;
use api::requests::{display_time, resolve_skill, write_status, RequestBoard};
use api::{DataSource, Notice, RequestStatus, SkillListing};
use dioxus::prelude::*;

use super::{PageHeader, SampleNotice};
use crate::{use_backend, use_toasts};

#[component]
pub fn RequestsView() -> Element {
    let backend = use_backend();
    let mut toasts = use_toasts();
    let mut board = use_signal(|| None::<RequestBoard>);
    let mut skills = use_signal(Vec::<SkillListing>::new);

    let fallback = backend.fallback();
    let store = backend.store.clone();
    use_hook(move || {
        spawn(async move {
            board.set(Some(RequestBoard::load(&store, fallback).await));
            skills.set(load_or_sample::<SkillListing>(&store, fallback).await.items);
        });
    });

    let status_store = backend.store.clone();
    let change_status = move |id: String, status: RequestStatus| {
        let store = status_store.clone();
        let mut board = board;
        let applied = match &mut *board.write() {
            Some(current) => current.apply(&id, status),
            None => false,
        };
        if !applied {
            return;
        }
        spawn(async move {
            let result = write_status(&store, &id, status).await;
            let notice = match &mut *board.write() {
                Some(current) => current.record_write(&id, status, result),
                None => return,
            };
            toasts.show(notice);
        });
    };

    let sync_store = backend.store.clone();
    let retry_sync = move |_| {
        let store = sync_store.clone();
        async move {
            let pending = match &*board.read() {
                Some(current) => current.unsynced(),
                None => return,
            };
            for (id, status) in pending {
                let result = write_status(&store, &id, status).await;
                if let Some(current) = &mut *board.write() {
                    current.settle(&id, result);
                }
            }
            let remaining = board
                .read()
                .as_ref()
                .map_or(0, |current| current.unsynced().len());
            if remaining == 0 {
                toasts.show(Notice::success("All changes saved."));
            } else {
                toasts.show(Notice::error(format!("{remaining} change(s) still not saved.")));
            }
        }
    };

    let Some(current) = board() else {
        return rsx! {
            PageHeader { title: "Skill Requests", subtitle: "People who want to learn from you." }
            p { class: "loading", "Loading requests..." }
        };
    };

    let now = chrono::Utc::now();
    let unsynced = current.unsynced().len();
    let rows: Vec<_> = current
        .rows
        .iter()
        .map(|row| {
            let skill = resolve_skill(&row.request, &skills.read())
                .map(|s| s.title.clone())
                .unwrap_or_else(|| row.request.skill.clone());
            (row.clone(), skill)
        })
        .collect();

    rsx! {
        PageHeader { title: "Skill Requests", subtitle: "People who want to learn from you." }
        if current.source == DataSource::Sample {
            SampleNotice {}
        }
        if unsynced > 0 {
            div { class: "sync-banner",
                "{unsynced} status change(s) are only saved on this page."
                button { class: "btn btn-small", r#type: "button", onclick: retry_sync, "Retry" }
            }
        }
        div { class: "request-list",
            for (row, skill) in rows {
                div { key: "{row.request.id}", class: "request-card",
                    div { class: "request-avatar", "{row.request.avatar()}" }
                    div { class: "request-body",
                        p { class: "request-from",
                            strong { "{row.request.from}" }
                            " wants to learn "
                            strong { "{skill}" }
                        }
                        if !row.request.message.is_empty() {
                            p { class: "request-message", "“{row.request.message}”" }
                        }
                        span { class: "request-time",
                            "{display_time(row.request.created_at.as_deref(), now)}"
                        }
                    }
                    div { class: "request-actions",
                        span { class: "badge {row.request.status.tone()}",
                            "{row.request.status.label()}"
                        }
                        if !row.synced {
                            span { class: "badge unsynced", title: "Not saved yet", "⟳" }
                        }
                        if row.request.status == RequestStatus::Pending {
                            button {
                                class: "btn btn-accept",
                                r#type: "button",
                                onclick: {
                                    let id = row.request.id.clone();
                                    let change_status = change_status.clone();
                                    move |_| change_status(id.clone(), RequestStatus::Accepted)
                                },
                                "Accept"
                            }
                            button {
                                class: "btn btn-decline",
                                r#type: "button",
                                onclick: {
                                    let id = row.request.id.clone();
                                    let change_status = change_status.clone();
                                    move |_| change_status(id.clone(), RequestStatus::Declined)
                                },
                                "Decline"
                            }
                        }
                    }
                }
            }
            if current.rows.is_empty() {
                p { class: "empty", "No requests yet." }
            }
        }
    }
}
