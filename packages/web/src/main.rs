use dioxus::prelude::*;

use api::{Backend, ClubConnectConfig};
use ui::{AuthProvider, ToastHost};
use views::{
    Admin, Clubs, Discover, Home, Leaderboard, Login, NotFound, Profile, Requests, Shell, Signup,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/discover")]
        Discover {},
        #[route("/clubs")]
        Clubs {},
        #[route("/requests")]
        Requests {},
        #[route("/leaderboard")]
        Leaderboard {},
        #[route("/admin")]
        Admin {},
        #[route("/profile")]
        Profile {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Compiled-in configuration.
const CONFIG_TOML: &str = include_str!("../clubconnect.toml");

fn main() {
    dioxus::launch(App);
}

fn load_config() -> ClubConnectConfig {
    let config = ClubConnectConfig::from_toml(CONFIG_TOML).unwrap_or_else(|e| {
        tracing::error!("invalid {}: {e}; using defaults", ClubConnectConfig::filename());
        ClubConnectConfig::default()
    });
    #[cfg(not(target_arch = "wasm32"))]
    let config = config.apply_env();
    config
}

#[component]
fn App() -> Element {
    let backend = use_context_provider(|| Backend::from_config(load_config()));
    let toast_ms = backend.config.ui.toast_ms;

    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: ui::APP_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            ToastHost { duration_ms: toast_ms,
                Router::<Route> {}
            }
        }
    }
}
