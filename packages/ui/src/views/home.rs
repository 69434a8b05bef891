use api::home::{BadgeRotation, FEATURES, STATS};
use api::Page;
use dioxus::prelude::*;

use crate::timer::sleep_ms;
use crate::{use_backend, StatCounter};

#[component]
pub fn HomeView() -> Element {
    let ui = use_backend().config.ui;
    let mut badge = use_signal(BadgeRotation::default);

    use_hook(|| {
        let interval = ui.badge_rotation_ms;
        spawn(async move {
            loop {
                sleep_ms(interval).await;
                badge.write().advance();
            }
        });
    });

    rsx! {
        section { class: "hero",
            div { class: "hero-badge", "✨ {badge.read().current()}" }
            h1 { class: "hero-title",
                "Learn, Teach & "
                span { class: "gradient-text", "Connect" }
                " on Campus"
            }
            p { class: "hero-sub",
                "Exchange skills with fellow students, discover clubs that match your passions, and climb the leaderboard."
            }
            div { class: "hero-actions",
                Link { class: "btn btn-primary", to: Page::Discover.path(), "Explore Skills" }
                Link { class: "btn btn-outline", to: Page::Clubs.path(), "Browse Clubs" }
            }
        }

        section { class: "stats",
            for stat in STATS {
                StatCounter {
                    key: "{stat.label}",
                    target: stat.value,
                    label: stat.label.to_string(),
                    tone: stat.tone.to_string(),
                    duration_ms: ui.counter_duration_ms,
                }
            }
        }

        section { class: "features",
            h2 { class: "section-title", "Everything you need on campus" }
            div { class: "feature-grid",
                for feature in FEATURES {
                    div { key: "{feature.title}", class: "feature-card",
                        div {
                            class: "feature-icon",
                            style: "background: {feature.color}",
                            "{feature.icon}"
                        }
                        h3 { "{feature.title}" }
                        p { "{feature.description}" }
                    }
                }
            }
        }

        section { class: "cta",
            h2 { "Ready to share what you know?" }
            p { "Join your classmates and start exchanging skills today." }
            Link { class: "btn btn-primary", to: Page::Signup.path(), "Get Started" }
        }
    }
}
