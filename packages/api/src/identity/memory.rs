use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use store::auto_id;
use tokio::sync::watch;

use super::{
    AuthError, AuthErrorCode, FederatedProvider, FederatedRedirect, IdentityProvider, ProviderState,
};
use crate::models::AuthUser;

const MIN_PASSWORD_LEN: usize = 6;
const TOKEN_PREFIX: &str = "memory:";
const DEMO_SESSION: &str = "memory-federated";

#[derive(Debug, Clone)]
struct Account {
    user: AuthUser,
    password: String,
}

#[derive(Debug)]
struct Inner {
    accounts: Mutex<Vec<Account>>,
    state: watch::Sender<ProviderState>,
}

/// In-process identity provider for demo mode and tests.
///
/// Accounts live only as long as the provider. Refresh tokens are
/// `memory:<uid>`, so a session can be restored within the same process.
#[derive(Clone, Debug)]
pub struct MemoryIdentity {
    inner: Arc<Inner>,
}

impl Default for MemoryIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryIdentity {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ProviderState::Initializing);
        Self {
            inner: Arc::new(Inner {
                accounts: Mutex::new(Vec::new()),
                state,
            }),
        }
    }

    /// Builder method to register an account up front.
    pub fn with_account(self, email: &str, password: &str, display_name: Option<&str>) -> Self {
        self.accounts().push(Account {
            user: AuthUser {
                uid: auto_id(),
                email: Some(email.to_string()),
                display_name: display_name.map(str::to_string),
                photo_url: None,
            },
            password: password.to_string(),
        });
        self
    }

    fn accounts(&self) -> MutexGuard<'_, Vec<Account>> {
        self.inner.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, user: Option<AuthUser>) {
        match &user {
            Some(user) => tracing::info!("signed in as {}", user.uid),
            None => tracing::info!("signed out"),
        }
        self.inner.state.send_replace(ProviderState::Resolved(user));
    }

    fn find_by_email(&self, email: &str) -> Option<Account> {
        self.accounts()
            .iter()
            .find(|a| a.user.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email)))
            .cloned()
    }
}

impl IdentityProvider for MemoryIdentity {
    fn subscribe(&self) -> watch::Receiver<ProviderState> {
        self.inner.state.subscribe()
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.inner.state.borrow().user().cloned()
    }

    fn refresh_token(&self) -> Option<String> {
        self.current_user().map(|u| format!("{TOKEN_PREFIX}{}", u.uid))
    }

    async fn restore(&self, refresh_token: Option<String>) -> Result<Option<AuthUser>, AuthError> {
        let uid = refresh_token.as_deref().and_then(|t| t.strip_prefix(TOKEN_PREFIX));
        let user = uid.and_then(|uid| {
            self.accounts()
                .iter()
                .find(|a| a.user.uid == uid)
                .map(|a| a.user.clone())
        });
        self.publish(user.clone());
        Ok(user)
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        match self.find_by_email(email.trim()) {
            Some(account) if account.password == password => {
                self.publish(Some(account.user.clone()));
                Ok(account.user)
            }
            _ => Err(AuthError::code(AuthErrorCode::InvalidCredential)),
        }
    }

    async fn sign_up(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let email = email.trim();
        if !email.contains('@') {
            return Err(AuthError::code(AuthErrorCode::InvalidEmail));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::code(AuthErrorCode::WeakPassword));
        }
        if self.find_by_email(email).is_some() {
            return Err(AuthError::code(AuthErrorCode::EmailExists));
        }

        let user = AuthUser {
            uid: auto_id(),
            email: Some(email.to_string()),
            display_name: Some(display_name.to_string()).filter(|n| !n.is_empty()),
            photo_url: None,
        };
        self.accounts().push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn begin_federated_sign_in(
        &self,
        provider: FederatedProvider,
        continue_uri: &str,
    ) -> Result<FederatedRedirect, AuthError> {
        let separator = if continue_uri.contains('?') { '&' } else { '?' };
        Ok(FederatedRedirect {
            auth_uri: format!("{continue_uri}{separator}provider={}", provider.provider_id()),
            session_id: DEMO_SESSION.to_string(),
        })
    }

    async fn complete_federated_sign_in(
        &self,
        _request_uri: &str,
        session_id: &str,
    ) -> Result<AuthUser, AuthError> {
        if session_id != DEMO_SESSION {
            return Err(AuthError::code(AuthErrorCode::Other("INVALID_SESSION_ID".to_string())));
        }
        let email = "google.user@example.com";
        let account = match self.find_by_email(email) {
            Some(account) => account,
            None => {
                let account = Account {
                    user: AuthUser {
                        uid: auto_id(),
                        email: Some(email.to_string()),
                        display_name: Some("Google User".to_string()),
                        photo_url: None,
                    },
                    password: String::new(),
                };
                self.accounts().push(account.clone());
                account
            }
        };
        self.publish(Some(account.user.clone()));
        Ok(account.user)
    }

    async fn update_display_name(&self, display_name: &str) -> Result<AuthUser, AuthError> {
        let current = self.current_user().ok_or_else(AuthError::not_signed_in)?;
        let updated = {
            let mut accounts = self.accounts();
            let account = accounts
                .iter_mut()
                .find(|a| a.user.uid == current.uid)
                .ok_or_else(|| AuthError::code(AuthErrorCode::SessionExpired))?;
            account.user.display_name = Some(display_name.to_string());
            account.user.clone()
        };
        self.publish(Some(updated.clone()));
        Ok(updated)
    }

    async fn refresh(&self) -> Result<(), AuthError> {
        self.current_user().map(|_| ()).ok_or_else(AuthError::not_signed_in)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.publish(None);
        Ok(())
    }
}
