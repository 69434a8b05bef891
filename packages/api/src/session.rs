//! Session state as seen by the rest of the app.
//!
//! A [`SessionStore`] is attached to one identity provider. It holds the last
//! [`SessionSnapshot`] and refreshes it on every provider notification. The
//! store is an ordinary value owned by whoever attached it (the UI keeps one
//! inside `AuthProvider`); dropping it unsubscribes.

use tokio::sync::watch;

use crate::identity::{IdentityProvider, ProviderState};
use crate::models::AuthUser;

/// Read-only view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_user: Option<AuthUser>,
    /// True until the provider has resolved the session for the first time.
    pub is_loading: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            current_user: None,
            is_loading: true,
        }
    }
}

impl SessionSnapshot {
    pub fn signed_in(user: AuthUser) -> Self {
        Self {
            current_user: Some(user),
            is_loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            current_user: None,
            is_loading: false,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }
}

impl From<&ProviderState> for SessionSnapshot {
    fn from(state: &ProviderState) -> Self {
        match state {
            ProviderState::Initializing => SessionSnapshot::default(),
            ProviderState::Resolved(user) => Self {
                current_user: user.clone(),
                is_loading: false,
            },
        }
    }
}

pub struct SessionStore {
    receiver: watch::Receiver<ProviderState>,
    snapshot: SessionSnapshot,
}

impl SessionStore {
    /// Subscribe to `provider`, starting from its current state.
    pub fn attach(provider: &impl IdentityProvider) -> Self {
        let mut receiver = provider.subscribe();
        let snapshot = SessionSnapshot::from(&*receiver.borrow_and_update());
        Self { receiver, snapshot }
    }

    pub fn snapshot(&self) -> &SessionSnapshot {
        &self.snapshot
    }

    /// Wait for the next provider notification and return the refreshed
    /// snapshot. Returns `None` once the provider is gone.
    pub async fn changed(&mut self) -> Option<&SessionSnapshot> {
        self.receiver.changed().await.ok()?;
        self.snapshot = SessionSnapshot::from(&*self.receiver.borrow_and_update());
        Some(&self.snapshot)
    }

    /// Stop listening to the provider.
    pub fn detach(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MemoryIdentity;

    #[tokio::test]
    async fn test_loading_until_first_resolution() {
        let identity =
            MemoryIdentity::new().with_account("ann@college.edu", "secret1", Some("Ann"));
        let mut session = SessionStore::attach(&identity);
        assert!(session.snapshot().is_loading);
        assert!(session.snapshot().current_user.is_none());

        identity.restore(None).await.unwrap();
        let snapshot = session.changed().await.unwrap().clone();
        assert_eq!(snapshot, SessionSnapshot::signed_out());

        identity.sign_in_with_password("ann@college.edu", "secret1").await.unwrap();
        let snapshot = session.changed().await.unwrap();
        assert!(!snapshot.is_loading);
        assert_eq!(
            snapshot.current_user.as_ref().and_then(|u| u.display_name.as_deref()),
            Some("Ann")
        );
    }

    #[tokio::test]
    async fn test_attach_after_resolution_is_not_loading() {
        let identity = MemoryIdentity::new();
        identity.restore(None).await.unwrap();
        let session = SessionStore::attach(&identity);
        assert_eq!(*session.snapshot(), SessionSnapshot::signed_out());
    }

    #[tokio::test]
    async fn test_sign_out_clears_user() {
        let identity = MemoryIdentity::new().with_account("ann@college.edu", "secret1", None);
        identity.sign_in_with_password("ann@college.edu", "secret1").await.unwrap();
        let mut session = SessionStore::attach(&identity);
        assert!(session.snapshot().is_signed_in());

        identity.sign_out().await.unwrap();
        assert!(!session.changed().await.unwrap().is_signed_in());
    }

    #[tokio::test]
    async fn test_provider_gone_ends_changes() {
        let identity = MemoryIdentity::new();
        let mut session = SessionStore::attach(&identity);
        drop(identity);
        assert!(session.changed().await.is_none());
        // Never resolved: still loading.
        assert!(session.snapshot().is_loading);
        session.detach();
    }
}
