use api::clubs::{self, Memberships};
use api::entity::load_or_sample;
use api::Club;
use dioxus::prelude::*;

use super::{PageHeader, SampleNotice};
use crate::use_backend;

#[component]
pub fn ClubsView() -> Element {
    let backend = use_backend();
    let fallback = backend.fallback();
    let mut category = use_signal(|| clubs::ALL.to_string());
    let mut memberships = use_signal(Memberships::default);

    let listing = use_resource(move || {
        let store = backend.store.clone();
        async move { load_or_sample::<Club>(&store, fallback).await }
    });

    let Some(listing) = listing.read().clone() else {
        return rsx! {
            PageHeader { title: "Clubs", subtitle: "Find your people." }
            p { class: "loading", "Loading clubs..." }
        };
    };

    let categories = clubs::categories(&listing.items);
    let visible = clubs::filter_by_category(&listing.items, &category());
    let empty = visible.is_empty();

    rsx! {
        PageHeader { title: "Clubs", subtitle: "Find your people." }
        if listing.is_sample() {
            SampleNotice {}
        }
        div { class: "filter-row",
            for cat in categories {
                button {
                    key: "{cat}",
                    class: if category() == cat { "chip active" } else { "chip" },
                    r#type: "button",
                    onclick: {
                        let cat = cat.clone();
                        move |_| category.set(cat.clone())
                    },
                    "{cat}"
                }
            }
        }
        div { class: "club-grid",
            for club in visible {
                div { key: "{club.id}", class: "club-card",
                    div { class: "club-banner", style: "background: {club.background()}",
                        span { class: "club-emoji", "{club.emoji()}" }
                    }
                    div { class: "club-body",
                        h3 { "{club.name}" }
                        p { class: "club-desc", "{club.description}" }
                        div { class: "club-meta",
                            span { class: "club-category", "{club.category}" }
                            span { class: "club-members", "👥 {club.members} members" }
                        }
                        button {
                            class: if memberships.read().is_joined(&club.id) {
                                "btn btn-joined"
                            } else {
                                "btn btn-primary"
                            },
                            r#type: "button",
                            onclick: {
                                let id = club.id.clone();
                                move |_| {
                                    memberships.write().toggle(&id);
                                }
                            },
                            "{memberships.read().button_label(&club.id)}"
                        }
                    }
                }
            }
            if empty {
                p { class: "empty", "No clubs in this category yet." }
            }
        }
    }
}
