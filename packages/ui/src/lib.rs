//! This crate contains all shared UI for the workspace.
//!
//! Components read the [`api::Backend`] from context ([`use_backend`]) and
//! the session from [`AuthProvider`]; page logic lives in `api`.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod views;

pub const APP_CSS: Asset = asset!("/assets/clubconnect.css");

mod backend;
pub use backend::use_backend;

mod storage;
mod timer;

mod auth;
pub use auth::{
    use_auth, use_federated_return, AuthProvider, AuthState, GoogleSignInButton, LogoutButton,
};

mod require_auth;
pub use require_auth::RequireAuth;

mod toast;
pub use toast::{use_toasts, ToastHost, Toasts};

mod navbar;
pub use navbar::Navbar;

mod counter;
pub use counter::StatCounter;
