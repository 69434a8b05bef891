//! # Identity provider boundary
//!
//! The external identity provider owns accounts, passwords and tokens. The app
//! only needs a handful of operations from it, captured by [`IdentityProvider`]:
//!
//! | Method | Effect |
//! |--------|--------|
//! | [`subscribe`](IdentityProvider::subscribe) | Push-based session notifications ([`ProviderState`]). |
//! | [`restore`](IdentityProvider::restore) | Resume a session from a persisted refresh token, or resolve as signed out. |
//! | [`sign_in_with_password`](IdentityProvider::sign_in_with_password) | Email + password sign-in. |
//! | [`sign_up`](IdentityProvider::sign_up) | Create an account and set its display name. |
//! | [`begin_federated_sign_in`](IdentityProvider::begin_federated_sign_in) / [`complete_federated_sign_in`](IdentityProvider::complete_federated_sign_in) | Third-party sign-in as a redirect round trip. |
//! | [`update_display_name`](IdentityProvider::update_display_name) | Change the signed-in user's display name. |
//! | [`refresh`](IdentityProvider::refresh) | Renew the short-lived ID token. |
//! | [`sign_out`](IdentityProvider::sign_out) | End the session. |
//!
//! Every successful call that changes who is signed in publishes a new
//! [`ProviderState::Resolved`] to all subscribers. Until the first resolution
//! the state is [`ProviderState::Initializing`].
//!
//! Two implementations exist: [`FirebaseAuth`] (Identity Toolkit REST) and
//! [`MemoryIdentity`] (demo mode and tests). [`AnyIdentity`] picks one at
//! startup.

use std::future::Future;

use tokio::sync::watch;

use crate::models::AuthUser;

mod error;
pub use error::{parse_error, AuthError, AuthErrorCode};

mod memory;
pub use memory::MemoryIdentity;

#[cfg(feature = "firebase")]
mod firebase;
#[cfg(feature = "firebase")]
pub use firebase::FirebaseAuth;

/// What subscribers know about the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProviderState {
    /// No answer from the provider yet.
    #[default]
    Initializing,
    Resolved(Option<AuthUser>),
}

impl ProviderState {
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            ProviderState::Resolved(user) => user.as_ref(),
            ProviderState::Initializing => None,
        }
    }
}

/// Third-party identity providers offered on the sign-in page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
}

impl FederatedProvider {
    pub fn provider_id(&self) -> &'static str {
        match self {
            FederatedProvider::Google => "google.com",
        }
    }
}

/// Where to send the browser for a federated sign-in, plus the session id
/// needed to finish it when the provider redirects back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedRedirect {
    pub auth_uri: String,
    pub session_id: String,
}

pub trait IdentityProvider {
    fn subscribe(&self) -> watch::Receiver<ProviderState>;

    fn current_user(&self) -> Option<AuthUser>;

    /// Refresh token of the current session, for persisting across reloads.
    fn refresh_token(&self) -> Option<String>;

    fn restore(
        &self,
        refresh_token: Option<String>,
    ) -> impl Future<Output = Result<Option<AuthUser>, AuthError>>;

    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthUser, AuthError>>;

    fn sign_up(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthUser, AuthError>>;

    fn begin_federated_sign_in(
        &self,
        provider: FederatedProvider,
        continue_uri: &str,
    ) -> impl Future<Output = Result<FederatedRedirect, AuthError>>;

    fn complete_federated_sign_in(
        &self,
        request_uri: &str,
        session_id: &str,
    ) -> impl Future<Output = Result<AuthUser, AuthError>>;

    fn update_display_name(
        &self,
        display_name: &str,
    ) -> impl Future<Output = Result<AuthUser, AuthError>>;

    fn refresh(&self) -> impl Future<Output = Result<(), AuthError>>;

    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>>;
}

/// The identity provider chosen at startup.
#[derive(Clone, Debug)]
pub enum AnyIdentity {
    Memory(MemoryIdentity),
    #[cfg(feature = "firebase")]
    Firebase(FirebaseAuth),
}

impl From<MemoryIdentity> for AnyIdentity {
    fn from(identity: MemoryIdentity) -> Self {
        AnyIdentity::Memory(identity)
    }
}

#[cfg(feature = "firebase")]
impl From<FirebaseAuth> for AnyIdentity {
    fn from(identity: FirebaseAuth) -> Self {
        AnyIdentity::Firebase(identity)
    }
}

macro_rules! dispatch {
    ($self:ident, $p:ident => $call:expr) => {
        match $self {
            AnyIdentity::Memory($p) => $call,
            #[cfg(feature = "firebase")]
            AnyIdentity::Firebase($p) => $call,
        }
    };
}

impl IdentityProvider for AnyIdentity {
    fn subscribe(&self) -> watch::Receiver<ProviderState> {
        dispatch!(self, p => p.subscribe())
    }

    fn current_user(&self) -> Option<AuthUser> {
        dispatch!(self, p => p.current_user())
    }

    fn refresh_token(&self) -> Option<String> {
        dispatch!(self, p => p.refresh_token())
    }

    async fn restore(&self, refresh_token: Option<String>) -> Result<Option<AuthUser>, AuthError> {
        dispatch!(self, p => p.restore(refresh_token).await)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        dispatch!(self, p => p.sign_in_with_password(email, password).await)
    }

    async fn sign_up(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        dispatch!(self, p => p.sign_up(display_name, email, password).await)
    }

    async fn begin_federated_sign_in(
        &self,
        provider: FederatedProvider,
        continue_uri: &str,
    ) -> Result<FederatedRedirect, AuthError> {
        dispatch!(self, p => p.begin_federated_sign_in(provider, continue_uri).await)
    }

    async fn complete_federated_sign_in(
        &self,
        request_uri: &str,
        session_id: &str,
    ) -> Result<AuthUser, AuthError> {
        dispatch!(self, p => p.complete_federated_sign_in(request_uri, session_id).await)
    }

    async fn update_display_name(&self, display_name: &str) -> Result<AuthUser, AuthError> {
        dispatch!(self, p => p.update_display_name(display_name).await)
    }

    async fn refresh(&self) -> Result<(), AuthError> {
        dispatch!(self, p => p.refresh().await)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        dispatch!(self, p => p.sign_out().await)
    }
}
