//! Sign-in and sign-up pages.

use api::account::{self, LoginForm, SignupForm};
use api::backend::{DEMO_EMAIL, DEMO_PASSWORD};
use api::Page;
use dioxus::prelude::*;

use crate::{use_auth, use_backend, use_federated_return, GoogleSignInButton};

/// Send viewers who are already signed in to the home page.
fn use_signed_in_redirect() {
    let auth = use_auth();
    let nav = use_navigator();
    use_effect(move || {
        if auth().user.is_some() {
            nav.replace(Page::Home.path());
        }
    });
}

#[component]
pub fn LoginView() -> Element {
    let backend = use_backend();
    let mut draft = use_signal(LoginForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);
    let is_demo = backend.is_demo();

    use_signed_in_redirect();
    use_federated_return(error);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let identity = backend.identity.clone();
        async move {
            error.set(None);
            busy.set(true);
            if let Err(e) = account::sign_in(&identity, &draft()).await {
                tracing::error!("sign in failed: {e}");
                error.set(Some(e.user_message()));
            }
            busy.set(false);
        }
    };

    rsx! {
        div { class: "auth-page",
            div { class: "card auth-card",
                h1 { "Welcome back 👋" }
                p { class: "muted", "Sign in to continue exchanging skills." }
                if is_demo {
                    p { class: "demo-hint",
                        "Demo mode: sign in with {DEMO_EMAIL} / {DEMO_PASSWORD}"
                    }
                }
                if let Some(message) = error() {
                    p { class: "form-error", role: "alert", "{message}" }
                }
                form { class: "form", onsubmit: handle_submit,
                    label { r#for: "login-email", "Email" }
                    input {
                        id: "login-email",
                        r#type: "email",
                        value: "{draft.read().email}",
                        placeholder: "you@college.edu",
                        oninput: move |evt: FormEvent| draft.write().email = evt.value(),
                    }
                    label { r#for: "login-password", "Password" }
                    input {
                        id: "login-password",
                        r#type: "password",
                        value: "{draft.read().password}",
                        oninput: move |evt: FormEvent| draft.write().password = evt.value(),
                    }
                    button { class: "btn btn-primary btn-block", r#type: "submit", disabled: busy(),
                        if busy() { "Signing in..." } else { "Sign In" }
                    }
                }
                div { class: "divider", "or" }
                GoogleSignInButton {
                    class: "btn btn-google btn-block",
                    on_error: move |message| error.set(Some(message)),
                }
                p { class: "auth-switch",
                    "New here? "
                    Link { to: Page::Signup.path(), "Create an account" }
                }
            }
        }
    }
}

#[component]
pub fn SignupView() -> Element {
    let backend = use_backend();
    let mut draft = use_signal(SignupForm::default);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    use_signed_in_redirect();
    use_federated_return(error);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let identity = backend.identity.clone();
        async move {
            error.set(None);
            busy.set(true);
            if let Err(e) = account::sign_up(&identity, &draft()).await {
                tracing::error!("sign up failed: {e}");
                error.set(Some(e.user_message()));
            }
            busy.set(false);
        }
    };

    rsx! {
        div { class: "auth-page",
            div { class: "card auth-card",
                h1 { "Join ClubConnect 🎓" }
                p { class: "muted", "Share what you know, learn what you don't." }
                if let Some(message) = error() {
                    p { class: "form-error", role: "alert", "{message}" }
                }
                form { class: "form", onsubmit: handle_submit,
                    label { r#for: "signup-name", "Full name" }
                    input {
                        id: "signup-name",
                        value: "{draft.read().name}",
                        oninput: move |evt: FormEvent| draft.write().name = evt.value(),
                    }
                    label { r#for: "signup-email", "Email" }
                    input {
                        id: "signup-email",
                        r#type: "email",
                        value: "{draft.read().email}",
                        placeholder: "you@college.edu",
                        oninput: move |evt: FormEvent| draft.write().email = evt.value(),
                    }
                    label { r#for: "signup-password", "Password" }
                    input {
                        id: "signup-password",
                        r#type: "password",
                        value: "{draft.read().password}",
                        placeholder: "At least {account::MIN_PASSWORD_LEN} characters",
                        oninput: move |evt: FormEvent| draft.write().password = evt.value(),
                    }
                    label { r#for: "signup-confirm", "Confirm password" }
                    input {
                        id: "signup-confirm",
                        r#type: "password",
                        value: "{draft.read().confirm}",
                        oninput: move |evt: FormEvent| draft.write().confirm = evt.value(),
                    }
                    button { class: "btn btn-primary btn-block", r#type: "submit", disabled: busy(),
                        if busy() { "Creating account..." } else { "Create Account" }
                    }
                }
                div { class: "divider", "or" }
                GoogleSignInButton {
                    class: "btn btn-google btn-block",
                    label: "Sign up with Google",
                    on_error: move |message| error.set(Some(message)),
                }
                p { class: "auth-switch",
                    "Already have an account? "
                    Link { to: Page::Login.path(), "Sign in" }
                }
            }
        }
    }
}
