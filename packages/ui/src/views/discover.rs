use api::skills::{all_tags, post_skill, refetch, NewSkill, SkillBoard, SkillFilter};
use api::{Notice, SkillListing};
use dioxus::prelude::*;

use super::{PageHeader, SampleNotice};
use crate::{use_auth, use_backend, use_toasts};

#[component]
pub fn DiscoverView() -> Element {
    let backend = use_backend();
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut board = use_signal(|| None::<SkillBoard>);
    let mut filter = use_signal(SkillFilter::default);
    let mut draft = use_signal(NewSkill::default);
    let mut show_form = use_signal(|| false);
    let mut posting = use_signal(|| false);

    let fallback = backend.fallback();
    let store = backend.store.clone();
    use_hook(move || {
        spawn(async move {
            board.set(Some(SkillBoard::load(&store, fallback).await));
        });
    });

    let post_store = backend.store.clone();
    let handle_post = move |evt: FormEvent| {
        evt.prevent_default();
        let store = post_store.clone();
        async move {
            posting.set(true);
            let user = auth().user;
            let form = draft();
            match post_skill(&store, &form, user.as_ref()).await {
                Ok(notice) => {
                    if notice.is_success() {
                        draft.set(NewSkill::default());
                        show_form.set(false);
                        if let Some(listing) = refetch(&store).await {
                            if let Some(current) = &mut *board.write() {
                                current.listing = listing;
                            }
                        }
                    }
                    toasts.show(notice);
                }
                Err(e) => toasts.show(Notice::error(e.to_string())),
            }
            posting.set(false);
        }
    };

    let request_store = backend.store.clone();
    let request = move |skill: SkillListing| {
        let store = request_store.clone();
        spawn(async move {
            let Some(current) = board() else {
                return;
            };
            let user = auth().user;
            let notice = current.request_exchange(&store, &skill, user.as_ref()).await;
            toasts.show(notice);
        });
    };

    let toggle_form = move |_| {
        if auth().user.is_none() {
            toasts.show(Notice::error("Please sign in to post a skill."));
            return;
        }
        show_form.toggle();
    };

    let Some(current) = board() else {
        return rsx! {
            PageHeader {
                title: "Discover Skills",
                subtitle: "Learn something new from a classmate.",
            }
            p { class: "loading", "Loading skills..." }
        };
    };

    let tags = all_tags(current.skills());
    let visible = filter.read().apply(current.skills());
    let empty = visible.is_empty();

    rsx! {
        PageHeader { title: "Discover Skills", subtitle: "Learn something new from a classmate." }
        if current.listing.is_sample() {
            SampleNotice {}
        }

        div { class: "toolbar",
            input {
                class: "search",
                r#type: "search",
                placeholder: "Search skills...",
                value: "{filter.read().search}",
                oninput: move |evt: FormEvent| filter.write().search = evt.value(),
            }
            button { class: "btn btn-primary", r#type: "button", onclick: toggle_form,
                if show_form() { "Close" } else { "+ Post a Skill" }
            }
        }

        if show_form() {
            form { class: "card form", onsubmit: handle_post,
                label { r#for: "skill-title", "Skill title" }
                input {
                    id: "skill-title",
                    value: "{draft.read().title}",
                    placeholder: "e.g. React Basics",
                    oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                }
                label { r#for: "skill-desc", "Description" }
                textarea {
                    id: "skill-desc",
                    value: "{draft.read().description}",
                    oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                }
                label { r#for: "skill-tags", "Tags (comma separated)" }
                input {
                    id: "skill-tags",
                    value: "{draft.read().tags}",
                    placeholder: "Tech, JavaScript",
                    oninput: move |evt: FormEvent| draft.write().tags = evt.value(),
                }
                button { class: "btn btn-primary", r#type: "submit", disabled: posting(),
                    if posting() { "Posting..." } else { "Post Skill" }
                }
            }
        }

        div { class: "filter-row",
            for tag in tags {
                button {
                    key: "{tag}",
                    class: if filter.read().tag == tag { "chip active" } else { "chip" },
                    r#type: "button",
                    onclick: {
                        let tag = tag.clone();
                        move |_| filter.write().tag = tag.clone()
                    },
                    "{tag}"
                }
            }
        }

        div { class: "skill-grid",
            for skill in visible {
                div { key: "{skill.id}", class: "skill-card",
                    div {
                        class: "skill-glyph",
                        style: "background: {skill.color()}",
                        "{skill.glyph()}"
                    }
                    h3 { "{skill.title}" }
                    p { class: "skill-desc", "{skill.blurb()}" }
                    div { class: "skill-tags",
                        for tag in skill.tags.iter() {
                            span { key: "{tag}", class: "tag", "{tag}" }
                        }
                    }
                    div { class: "skill-footer",
                        span { class: "skill-author", "by {skill.author}" }
                        span { class: "skill-exchanges", "🔄 {skill.exchanges}" }
                        button {
                            class: "btn btn-small",
                            r#type: "button",
                            onclick: {
                                let skill = skill.clone();
                                let request = request.clone();
                                move |_| request(skill.clone())
                            },
                            "Request"
                        }
                    }
                }
            }
            if empty {
                p { class: "empty", "No skills match your search." }
            }
        }
    }
}
