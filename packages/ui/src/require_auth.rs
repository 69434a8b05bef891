use api::routes::guard;
use api::{Access, Page};
use dioxus::prelude::*;

use crate::use_auth;

/// Renders `children` only when the session may see `page`. Signed-out
/// viewers are sent to the login page; nothing renders while the session is
/// still resolving.
#[component]
pub fn RequireAuth(page: Page, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let access = guard(page, &auth().snapshot());

    use_effect(move || {
        if let Access::Redirect(target) = guard(page, &auth().snapshot()) {
            tracing::info!("{} requires sign-in, redirecting", page.path());
            nav.replace(target.path());
        }
    });

    match access {
        Access::Render => rsx! {
            {children}
        },
        Access::Pending | Access::Redirect(_) => rsx! {},
    }
}
