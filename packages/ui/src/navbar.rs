use api::routes::NAV_LINKS;
use api::Page;
use dioxus::prelude::*;

use crate::icons::{FaBell, FaBars, FaXmark};
use crate::{use_auth, Icon, LogoutButton};

/// Scroll offset after which the bar gets its `scrolled` style.
const SCROLLED_AFTER_PX: f64 = 20.0;

/// Top navigation bar.
#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut menu_open = use_signal(|| false);
    let mut dropdown_open = use_signal(|| false);
    let scrolled = use_scrolled();

    let user = auth().user;
    let initials = user.as_ref().map(|u| u.initials()).unwrap_or_else(|| "CC".to_string());

    rsx! {
        nav {
            class: if scrolled() { "navbar scrolled" } else { "navbar" },
            Link {
                class: "nav-logo",
                to: Page::Home.path(),
                onclick: move |_| menu_open.set(false),
                span { class: "logo-icon", "🎓" }
                "ClubConnect"
            }
            button {
                class: "hamburger",
                r#type: "button",
                aria_label: "Toggle menu",
                onclick: move |_| menu_open.toggle(),
                if menu_open() {
                    Icon { width: 18, height: 18, fill: "currentColor", icon: FaXmark }
                } else {
                    Icon { width: 18, height: 18, fill: "currentColor", icon: FaBars }
                }
            }
            ul {
                class: if menu_open() { "nav-links open" } else { "nav-links" },
                for page in NAV_LINKS {
                    li { key: "{page.path()}",
                        Link {
                            active_class: "active",
                            to: page.path(),
                            onclick: move |_| menu_open.set(false),
                            "{page.label()}"
                        }
                    }
                }
            }
            div { class: "nav-actions",
                button {
                    class: "nav-bell",
                    r#type: "button",
                    aria_label: "Notifications",
                    onclick: move |_| {
                        nav.push(Page::Requests.path());
                    },
                    Icon { width: 16, height: 16, fill: "currentColor", icon: FaBell }
                }
                div { class: "nav-user",
                    button {
                        class: "nav-avatar",
                        r#type: "button",
                        onclick: move |_| dropdown_open.toggle(),
                        "{initials}"
                    }
                    if dropdown_open() {
                        div {
                            class: "nav-dropdown",
                            onclick: move |_| dropdown_open.set(false),
                            if let Some(user) = user.as_ref() {
                                p { class: "dropdown-name", "{user.label()}" }
                                if let Some(email) = user.email.as_ref() {
                                    p { class: "dropdown-email", "{email}" }
                                }
                                Link { to: Page::Profile.path(), "My Profile" }
                                LogoutButton {
                                    class: "dropdown-signout",
                                    on_signed_out: move |_| {
                                        nav.push(Page::Login.path());
                                    },
                                }
                            } else {
                                Link { to: Page::Login.path(), "Sign In" }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Whether the window has scrolled past [`SCROLLED_AFTER_PX`].
#[cfg(target_arch = "wasm32")]
fn use_scrolled() -> Signal<bool> {
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let mut scrolled = use_signal(|| false);
    let listener = use_hook(|| {
        let listener = Rc::new(Closure::<dyn FnMut()>::new(move || {
            let y = web_sys::window()
                .and_then(|w| w.scroll_y().ok())
                .unwrap_or_default();
            let past = y > SCROLLED_AFTER_PX;
            if *scrolled.peek() != past {
                scrolled.set(past);
            }
        }));
        if let Some(window) = web_sys::window() {
            let callback: &js_sys::Function = (*listener).as_ref().unchecked_ref();
            if let Err(e) = window.add_event_listener_with_callback("scroll", callback) {
                tracing::warn!("could not listen for scroll events: {e:?}");
            }
        }
        listener
    });
    use_drop(move || {
        if let Some(window) = web_sys::window() {
            let callback: &js_sys::Function = (*listener).as_ref().unchecked_ref();
            if let Err(e) = window.remove_event_listener_with_callback("scroll", callback) {
                tracing::warn!("could not remove scroll listener: {e:?}");
            }
        }
    });
    scrolled
}

#[cfg(not(target_arch = "wasm32"))]
fn use_scrolled() -> Signal<bool> {
    use_signal(|| false)
}
