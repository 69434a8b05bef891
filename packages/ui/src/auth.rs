//! Authentication context and hooks for the UI.

use api::identity::FederatedProvider;
use api::{AuthUser, IdentityProvider, SessionSnapshot, SessionStore};
use dioxus::prelude::*;

use crate::storage::{self, FEDERATED_SESSION_KEY, REFRESH_TOKEN_KEY};
use crate::timer::sleep_ms;
use crate::use_backend;

/// ID tokens live for an hour; renew well before that.
const TOKEN_REFRESH_MS: u64 = 45 * 60 * 1000;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl From<&SessionSnapshot> for AuthState {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            user: snapshot.current_user.clone(),
            loading: snapshot.is_loading,
        }
    }
}

impl AuthState {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_user: self.user.clone(),
            is_loading: self.loading,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that follows the identity provider's session.
///
/// On mount it restores the session from the refresh token saved in
/// `localStorage`, then mirrors every provider notification into the
/// [`AuthState`] context and back into storage. Children are not rendered
/// until the session has resolved.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let backend = use_backend();
    let mut auth_state = use_signal(AuthState::default);
    use_context_provider(|| auth_state);

    use_hook(|| {
        let identity = backend.identity.clone();
        spawn(async move {
            let mut session = SessionStore::attach(&identity);
            if let Err(e) = identity.restore(storage::load(REFRESH_TOKEN_KEY)).await {
                tracing::error!("restoring session failed: {e}");
            }
            while let Some(snapshot) = session.changed().await {
                if !snapshot.is_loading {
                    storage::save(REFRESH_TOKEN_KEY, identity.refresh_token().as_deref());
                }
                auth_state.set(AuthState::from(snapshot));
            }
        });
    });

    use_hook(|| {
        let identity = backend.identity.clone();
        spawn(async move {
            loop {
                sleep_ms(TOKEN_REFRESH_MS).await;
                if identity.current_user().is_none() {
                    continue;
                }
                if let Err(e) = identity.refresh().await {
                    tracing::warn!("token refresh failed: {e}");
                }
            }
        });
    });

    if auth_state().loading {
        return rsx! {};
    }

    rsx! {
        {children}
    }
}

/// Start Google sign-in. The browser leaves the app and comes back to the
/// login page, which finishes the flow with [`use_federated_return`].
#[component]
pub fn GoogleSignInButton(
    #[props(default = "Continue with Google".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_error: EventHandler<String>,
) -> Element {
    let backend = use_backend();
    let mut loading = use_signal(|| false);

    let onclick = move |_| {
        let identity = backend.identity.clone();
        async move {
            loading.set(true);
            let continue_uri = storage::current_href().unwrap_or_else(|| "/login".to_string());
            match identity
                .begin_federated_sign_in(FederatedProvider::Google, &continue_uri)
                .await
            {
                Ok(redirect) => {
                    storage::save(FEDERATED_SESSION_KEY, Some(&redirect.session_id));
                    storage::redirect_to(&redirect.auth_uri);
                }
                Err(e) => {
                    tracing::error!("starting Google sign-in failed: {e}");
                    on_error.call(e.user_message());
                    loading.set(false);
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            disabled: loading(),
            onclick: onclick,
            if loading() {
                "Redirecting..."
            } else {
                "{label}"
            }
        }
    }
}

/// Finish a federated sign-in if the page was opened by the provider's
/// redirect. A failure message lands in `error`.
pub fn use_federated_return(mut error: Signal<Option<String>>) {
    let backend = use_backend();
    use_hook(move || {
        let Some(session_id) = storage::load(FEDERATED_SESSION_KEY) else {
            return;
        };
        let Some(request_uri) = storage::current_href() else {
            return;
        };
        storage::save(FEDERATED_SESSION_KEY, None);
        let identity = backend.identity.clone();
        spawn(async move {
            if let Err(e) = identity.complete_federated_sign_in(&request_uri, &session_id).await {
                tracing::error!("finishing Google sign-in failed: {e}");
                error.set(Some(e.user_message()));
            }
        });
    });
}

/// Button to sign out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign Out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    #[props(default)] on_signed_out: EventHandler<()>,
) -> Element {
    let backend = use_backend();

    let onclick = move |_| {
        let identity = backend.identity.clone();
        async move {
            match identity.sign_out().await {
                Ok(()) => on_signed_out.call(()),
                Err(e) => tracing::error!("sign out failed: {e}"),
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: onclick,
            "{label}"
        }
    }
}
