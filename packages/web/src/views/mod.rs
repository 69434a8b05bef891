//! Route components. Each wraps the shared view from `ui`; signed-in-only
//! pages go through `RequireAuth`.

use api::Page;
use dioxus::prelude::*;
use ui::views::{
    AdminView, ClubsView, DiscoverView, HomeView, LeaderboardView, LoginView, ProfileView,
    RequestsView, SignupView,
};
use ui::{Navbar, RequireAuth};

use crate::Route;

/// Navigation bar above every page.
#[component]
pub fn Shell() -> Element {
    rsx! {
        Navbar {}
        main {
            Outlet::<Route> {}
        }
        footer { "ClubConnect · learn, teach & connect on campus" }
    }
}

#[component]
pub fn Home() -> Element {
    rsx! { HomeView {} }
}

#[component]
pub fn Discover() -> Element {
    rsx! { DiscoverView {} }
}

#[component]
pub fn Clubs() -> Element {
    rsx! { ClubsView {} }
}

#[component]
pub fn Leaderboard() -> Element {
    rsx! { LeaderboardView {} }
}

#[component]
pub fn Requests() -> Element {
    rsx! {
        RequireAuth { page: Page::Requests, RequestsView {} }
    }
}

#[component]
pub fn Admin() -> Element {
    rsx! {
        RequireAuth { page: Page::Admin, AdminView {} }
    }
}

#[component]
pub fn Profile() -> Element {
    rsx! {
        RequireAuth { page: Page::Profile, ProfileView {} }
    }
}

#[component]
pub fn Login() -> Element {
    rsx! { LoginView {} }
}

#[component]
pub fn Signup() -> Element {
    rsx! { SignupView {} }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "not-found",
            h1 { "Page not found" }
            p { "Nothing lives at /{path}." }
            Link { to: Route::Home {}, "Back to home" }
        }
    }
}
