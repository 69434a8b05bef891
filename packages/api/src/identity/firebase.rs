//! # Firebase Authentication over REST
//!
//! [`FirebaseAuth`] drives the Identity Toolkit v1 and Secure Token APIs with
//! `reqwest`:
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | password sign-in | `accounts:signInWithPassword` |
//! | sign-up | `accounts:signUp`, then `accounts:update` for the display name |
//! | profile lookup | `accounts:lookup` |
//! | display-name change | `accounts:update` |
//! | federated start | `accounts:createAuthUri` |
//! | federated finish | `accounts:signInWithIdp` |
//! | token refresh / restore | `securetoken.googleapis.com/v1/token` (form-encoded) |
//!
//! The current ID token is mirrored into the document store's
//! [`AccessToken`] so Firestore requests run as the signed-in user.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use store::{AccessToken, FirebaseConfig};
use tokio::sync::watch;

use super::{
    parse_error, AuthError, FederatedProvider, FederatedRedirect, IdentityProvider, ProviderState,
};
use crate::models::AuthUser;

const IDENTITY_TOOLKIT: &str = "https://identitytoolkit.googleapis.com/v1";
const SECURE_TOKEN: &str = "https://securetoken.googleapis.com/v1/token";

/// Tokens plus the user they belong to.
#[derive(Debug, Clone)]
struct Credentials {
    id_token: String,
    refresh_token: String,
    user: AuthUser,
}

/// Response of `signInWithPassword`, `signUp` and `signInWithIdp`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

impl SignInResponse {
    fn into_credentials(self) -> Credentials {
        Credentials {
            user: AuthUser {
                uid: self.local_id,
                email: self.email.filter(|e| !e.is_empty()),
                display_name: self.display_name.filter(|n| !n.is_empty()),
                photo_url: self.photo_url.filter(|p| !p.is_empty()),
            },
            id_token: self.id_token,
            refresh_token: self.refresh_token,
        }
    }
}

/// Response of the Secure Token endpoint (snake_case, unlike the rest).
#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
    refresh_token: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthUriResponse {
    auth_uri: String,
    session_id: String,
}

#[derive(Debug)]
struct Inner {
    client: Client,
    api_key: String,
    state: watch::Sender<ProviderState>,
    credentials: Mutex<Option<Credentials>>,
    token: AccessToken,
}

/// Firebase Authentication client.
#[derive(Clone, Debug)]
pub struct FirebaseAuth {
    inner: Arc<Inner>,
}

impl FirebaseAuth {
    pub fn new(config: &FirebaseConfig, token: AccessToken) -> Self {
        let (state, _) = watch::channel(ProviderState::Initializing);
        Self {
            inner: Arc::new(Inner {
                client: Client::new(),
                api_key: config.api_key.clone(),
                state,
                credentials: Mutex::new(None),
                token,
            }),
        }
    }

    fn credentials(&self) -> MutexGuard<'_, Option<Credentials>> {
        self.inner.credentials.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn endpoint(method: &str) -> String {
        format!("{IDENTITY_TOOLKIT}/accounts:{method}")
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AuthError> {
        let response = request
            .query(&[("key", self.inner.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_error(&body));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| AuthError::Decode(e.to_string()))
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: Value) -> Result<T, AuthError> {
        self.send(self.inner.client.post(Self::endpoint(method)).json(&body))
            .await
    }

    /// Install a new session and tell subscribers.
    fn establish(&self, credentials: Credentials) -> AuthUser {
        let user = credentials.user.clone();
        self.inner.token.set(Some(credentials.id_token.clone()));
        *self.credentials() = Some(credentials);
        tracing::info!("signed in as {}", user.uid);
        self.inner.state.send_replace(ProviderState::Resolved(Some(user.clone())));
        user
    }

    fn clear(&self) {
        self.inner.token.set(None);
        *self.credentials() = None;
        self.inner.state.send_replace(ProviderState::Resolved(None));
    }

    async fn exchange_refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenResponse, AuthError> {
        let request = self
            .inner
            .client
            .post(SECURE_TOKEN)
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)]);
        self.send(request).await
    }

    async fn lookup(&self, id_token: &str) -> Result<AuthUser, AuthError> {
        let response: LookupResponse = self.call("lookup", json!({ "idToken": id_token })).await?;
        let user = response
            .users
            .into_iter()
            .next()
            .ok_or_else(|| AuthError::Decode("lookup returned no users".to_string()))?;
        Ok(AuthUser {
            uid: user.local_id,
            email: user.email.filter(|e| !e.is_empty()),
            display_name: user.display_name.filter(|n| !n.is_empty()),
            photo_url: user.photo_url.filter(|p| !p.is_empty()),
        })
    }

    async fn set_display_name(
        &self,
        credentials: Credentials,
        display_name: &str,
    ) -> Result<AuthUser, AuthError> {
        let response: UpdateResponse = self
            .call(
                "update",
                json!({
                    "idToken": credentials.id_token,
                    "displayName": display_name,
                    "returnSecureToken": true,
                }),
            )
            .await?;
        let mut user = credentials.user;
        user.display_name = response.display_name.filter(|n| !n.is_empty());
        Ok(self.establish(Credentials {
            id_token: response.id_token.unwrap_or(credentials.id_token),
            refresh_token: response.refresh_token.unwrap_or(credentials.refresh_token),
            user,
        }))
    }
}

impl IdentityProvider for FirebaseAuth {
    fn subscribe(&self) -> watch::Receiver<ProviderState> {
        self.inner.state.subscribe()
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.credentials().as_ref().map(|c| c.user.clone())
    }

    fn refresh_token(&self) -> Option<String> {
        self.credentials().as_ref().map(|c| c.refresh_token.clone())
    }

    async fn restore(&self, refresh_token: Option<String>) -> Result<Option<AuthUser>, AuthError> {
        let Some(refresh_token) = refresh_token else {
            self.clear();
            return Ok(None);
        };

        let result = async {
            let tokens = self.exchange_refresh_token(&refresh_token).await?;
            let mut user = self.lookup(&tokens.id_token).await?;
            user.uid = tokens.user_id;
            Ok::<_, AuthError>(Credentials {
                id_token: tokens.id_token,
                refresh_token: tokens.refresh_token,
                user,
            })
        }
        .await;

        match result {
            Ok(credentials) => Ok(Some(self.establish(credentials))),
            Err(e) => {
                // A stale token resolves as signed out rather than leaving
                // subscribers waiting.
                tracing::warn!("could not restore session: {e}");
                self.clear();
                if e.is_session_expired() {
                    Ok(None)
                } else {
                    Err(e)
                }
            }
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let response: SignInResponse = self
            .call(
                "signInWithPassword",
                json!({ "email": email.trim(), "password": password, "returnSecureToken": true }),
            )
            .await
            .inspect_err(|e| tracing::error!("password sign-in failed: {e}"))?;
        Ok(self.establish(response.into_credentials()))
    }

    async fn sign_up(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let response: SignInResponse = self
            .call(
                "signUp",
                json!({ "email": email.trim(), "password": password, "returnSecureToken": true }),
            )
            .await
            .inspect_err(|e| tracing::error!("sign-up failed: {e}"))?;
        let credentials = response.into_credentials();
        if display_name.trim().is_empty() {
            return Ok(self.establish(credentials));
        }
        self.set_display_name(credentials, display_name.trim()).await
    }

    async fn begin_federated_sign_in(
        &self,
        provider: FederatedProvider,
        continue_uri: &str,
    ) -> Result<FederatedRedirect, AuthError> {
        let response: AuthUriResponse = self
            .call(
                "createAuthUri",
                json!({ "providerId": provider.provider_id(), "continueUri": continue_uri }),
            )
            .await?;
        Ok(FederatedRedirect {
            auth_uri: response.auth_uri,
            session_id: response.session_id,
        })
    }

    async fn complete_federated_sign_in(
        &self,
        request_uri: &str,
        session_id: &str,
    ) -> Result<AuthUser, AuthError> {
        let response: SignInResponse = self
            .call(
                "signInWithIdp",
                json!({
                    "requestUri": request_uri,
                    "sessionId": session_id,
                    "returnSecureToken": true,
                    "returnIdpCredential": true,
                }),
            )
            .await
            .inspect_err(|e| tracing::error!("federated sign-in failed: {e}"))?;
        Ok(self.establish(response.into_credentials()))
    }

    async fn update_display_name(&self, display_name: &str) -> Result<AuthUser, AuthError> {
        let credentials = self
            .credentials()
            .clone()
            .ok_or_else(AuthError::not_signed_in)?;
        self.set_display_name(credentials, display_name).await
    }

    async fn refresh(&self) -> Result<(), AuthError> {
        let Some(current) = self.credentials().clone() else {
            return Err(AuthError::not_signed_in());
        };
        match self.exchange_refresh_token(&current.refresh_token).await {
            Ok(tokens) => {
                self.inner.token.set(Some(tokens.id_token.clone()));
                if let Some(credentials) = self.credentials().as_mut() {
                    credentials.id_token = tokens.id_token;
                    credentials.refresh_token = tokens.refresh_token;
                }
                tracing::debug!("refreshed id token");
                Ok(())
            }
            Err(e) if e.is_session_expired() => {
                tracing::warn!("session expired: {e}");
                self.clear();
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        // ID tokens are bearer tokens; signing out only forgets them.
        self.clear();
        tracing::info!("signed out");
        Ok(())
    }
}
