use api::admin::{add_club, delete_club, fetch_clubs, AdminBoard, NewClub, GRADIENT_PRESETS};
use api::Notice;
use dioxus::prelude::*;

use super::{ConfirmDialog, PageHeader};
use crate::{use_auth, use_backend, use_toasts};

#[component]
pub fn AdminView() -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut board = use_signal(|| None::<AdminBoard>);
    let mut draft = use_signal(NewClub::default);
    let mut creating = use_signal(|| false);

    let store = backend.store.clone();
    use_hook(move || {
        spawn(async move {
            board.set(Some(AdminBoard::load(&store).await));
        });
    });

    let create_store = backend.store.clone();
    let handle_create = move |evt: FormEvent| {
        evt.prevent_default();
        let store = create_store.clone();
        async move {
            let Some(user) = auth().user else {
                return;
            };
            creating.set(true);
            let form = draft();
            match add_club(&store, &form, &user).await {
                Ok(notice) => {
                    if notice.is_success() {
                        draft.set(NewClub::default());
                        let clubs = fetch_clubs(&store).await;
                        if let Some(current) = &mut *board.write() {
                            current.clubs = clubs;
                        }
                    }
                    toasts.show(notice);
                }
                Err(e) => toasts.show(Notice::error(e.to_string())),
            }
            creating.set(false);
        }
    };

    let delete_store = backend.store.clone();
    let confirm_delete = move |_| {
        let store = delete_store.clone();
        async move {
            let pending = match &mut *board.write() {
                Some(current) => current.take_pending_delete(),
                None => None,
            };
            let Some(id) = pending else {
                return;
            };
            match delete_club(&store, &id).await {
                Ok(notice) => {
                    let clubs = fetch_clubs(&store).await;
                    if let Some(current) = &mut *board.write() {
                        current.clubs = clubs;
                    }
                    toasts.show(notice);
                }
                Err(notice) => toasts.show(notice),
            }
        }
    };

    let Some(current) = board() else {
        return rsx! {
            PageHeader { title: "Admin Panel", subtitle: "Create and manage clubs." }
            p { class: "loading", "Loading clubs..." }
        };
    };
    let pending = current.pending_delete().cloned();
    let selected_gradient = draft.read().gradient;

    rsx! {
        PageHeader { title: "Admin Panel", subtitle: "Create and manage clubs." }
        div { class: "admin-layout",
            form { class: "card form", onsubmit: handle_create,
                h2 { "Create a Club" }
                label { r#for: "club-name", "Club name" }
                input {
                    id: "club-name",
                    value: "{draft.read().name}",
                    placeholder: "e.g. Chess Club",
                    oninput: move |evt: FormEvent| draft.write().name = evt.value(),
                }
                label { r#for: "club-desc", "Description" }
                textarea {
                    id: "club-desc",
                    value: "{draft.read().description}",
                    oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                }
                div { class: "form-row",
                    div {
                        label { r#for: "club-emoji", "Emoji" }
                        input {
                            id: "club-emoji",
                            value: "{draft.read().emoji}",
                            oninput: move |evt: FormEvent| draft.write().emoji = evt.value(),
                        }
                    }
                    div {
                        label { r#for: "club-category", "Category" }
                        input {
                            id: "club-category",
                            value: "{draft.read().category}",
                            placeholder: "Tech, Arts, Games...",
                            oninput: move |evt: FormEvent| draft.write().category = evt.value(),
                        }
                    }
                }
                label { "Banner" }
                div { class: "gradient-picker",
                    for (index, [from, to]) in GRADIENT_PRESETS.into_iter().enumerate() {
                        button {
                            key: "{index}",
                            class: if index == selected_gradient {
                                "swatch selected"
                            } else {
                                "swatch"
                            },
                            r#type: "button",
                            style: "background: linear-gradient(135deg, {from}, {to})",
                            onclick: move |_| draft.write().gradient = index,
                        }
                    }
                }
                button { class: "btn btn-primary", r#type: "submit", disabled: creating(),
                    if creating() { "Creating..." } else { "Create Club" }
                }
            }

            div { class: "card",
                h2 { "Existing Clubs ({current.clubs.len()})" }
                if current.clubs.is_empty() {
                    p { class: "empty", "No clubs yet." }
                }
                ul { class: "admin-club-list",
                    for club in current.clubs.iter() {
                        li { key: "{club.id}",
                            span {
                                class: "club-emoji small",
                                style: "background: {club.background()}",
                                "{club.emoji()}"
                            }
                            div { class: "admin-club-text",
                                strong { "{club.name}" }
                                span { class: "muted", "{club.category} · {club.members} members" }
                            }
                            button {
                                class: "btn btn-danger btn-small",
                                r#type: "button",
                                onclick: {
                                    let id = club.id.clone();
                                    move |_| {
                                        if let Some(current) = &mut *board.write() {
                                            current.request_delete(&id);
                                        }
                                    }
                                },
                                "Delete"
                            }
                        }
                    }
                }
            }
        }

        if let Some(club) = pending {
            ConfirmDialog {
                title: "Delete club?",
                message: format!("\"{}\" will be removed for everyone.", club.name),
                on_confirm: confirm_delete,
                on_cancel: move |_| {
                    if let Some(current) = &mut *board.write() {
                        current.cancel_delete();
                    }
                },
            }
        }
    }
}
