use api::leaderboard::{load_leaderboard, podium, points_tone, rank_label};
use dioxus::prelude::*;

use super::{PageHeader, SampleNotice};
use crate::use_backend;

#[component]
pub fn LeaderboardView() -> Element {
    let backend = use_backend();
    let fallback = backend.fallback();

    let listing = use_resource(move || {
        let store = backend.store.clone();
        async move { load_leaderboard(&store, fallback).await }
    });

    let Some(listing) = listing.read().clone() else {
        return rsx! {
            PageHeader { title: "Leaderboard", subtitle: "Top skill sharers this semester." }
            p { class: "loading", "Loading leaderboard..." }
        };
    };

    let is_sample = listing.is_sample();
    let entries = listing.items;
    let top: Vec<_> = podium(&entries)
        .into_iter()
        .map(|(rank, entry)| (rank, entry.clone()))
        .collect();

    rsx! {
        PageHeader { title: "Leaderboard", subtitle: "Top skill sharers this semester." }
        if is_sample {
            SampleNotice {}
        }
        div { class: "podium",
            for (rank, entry) in top {
                div { key: "{entry.id}", class: "podium-place place-{rank + 1}",
                    div { class: "podium-medal", "{rank_label(rank)}" }
                    div {
                        class: "avatar",
                        style: "background: {entry.color()}",
                        "{entry.initials()}"
                    }
                    p { class: "podium-name", "{entry.name}" }
                    p { class: "podium-points", "{entry.points} pts" }
                }
            }
        }
        table { class: "leaderboard-table",
            thead {
                tr {
                    th { "Rank" }
                    th { "Student" }
                    th { "Skills" }
                    th { "Exchanges" }
                    th { "Points" }
                }
            }
            tbody {
                for (rank, entry) in entries.iter().enumerate() {
                    tr { key: "{entry.id}",
                        td { class: "rank", "{rank_label(rank)}" }
                        td { class: "student",
                            span {
                                class: "avatar small",
                                style: "background: {entry.color()}",
                                "{entry.initials()}"
                            }
                            "{entry.name}"
                        }
                        td { "{entry.skills}" }
                        td { "{entry.exchanges}" }
                        td { class: "points {points_tone(rank)}", "{entry.points}" }
                    }
                }
            }
        }
    }
}
