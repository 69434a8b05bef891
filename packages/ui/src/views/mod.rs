use dioxus::prelude::*;

mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod home;
pub use home::HomeView;

mod discover;
pub use discover::DiscoverView;

mod clubs;
pub use clubs::ClubsView;

mod requests;
pub use requests::RequestsView;

mod leaderboard;
pub use leaderboard::LeaderboardView;

mod admin;
pub use admin::AdminView;

mod profile;
pub use profile::ProfileView;

mod login;
pub use login::{LoginView, SignupView};

#[component]
fn PageHeader(title: String, subtitle: String) -> Element {
    rsx! {
        header { class: "page-header",
            h1 { "{title}" }
            p { "{subtitle}" }
        }
    }
}

/// Shown when a page fell back to the built-in sample data.
#[component]
fn SampleNotice() -> Element {
    rsx! {
        div { class: "sample-notice", role: "note",
            "Showing demo data: the live data could not be loaded."
        }
    }
}
