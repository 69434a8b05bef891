//! The store and identity provider the app runs against, chosen once at
//! startup from [`ClubConnectConfig`].

use store::{AnyStore, ClubConnectConfig, MemoryStore};

use crate::entity::Fallback;
use crate::identity::{AnyIdentity, MemoryIdentity};

/// Account registered in demo mode so the signed-in pages can be tried
/// without a Firebase project.
pub const DEMO_EMAIL: &str = "demo@clubconnect.app";
pub const DEMO_PASSWORD: &str = "demo123";

#[derive(Clone, Debug)]
pub struct Backend {
    pub store: AnyStore,
    pub identity: AnyIdentity,
    pub config: ClubConnectConfig,
}

impl Backend {
    /// Firebase when the config names a project, demo mode otherwise.
    pub fn from_config(config: ClubConnectConfig) -> Self {
        #[cfg(feature = "firebase")]
        if config.firebase.is_configured() {
            use crate::identity::FirebaseAuth;
            use store::{AccessToken, FirestoreStore};

            // Both halves share the token so Firestore calls carry the
            // signed-in user's credentials.
            let token = AccessToken::new();
            let store = FirestoreStore::new(&config.firebase, token.clone());
            let identity = FirebaseAuth::new(&config.firebase, token);
            tracing::info!("using Firebase project {}", config.firebase.project_id);
            return Self {
                store: store.into(),
                identity: identity.into(),
                config,
            };
        }

        tracing::warn!("no Firebase project configured, running in demo mode");
        Self::demo(config)
    }

    /// In-memory store and identity provider.
    pub fn demo(config: ClubConnectConfig) -> Self {
        let identity =
            MemoryIdentity::new().with_account(DEMO_EMAIL, DEMO_PASSWORD, Some("Demo Student"));
        Self {
            store: MemoryStore::new().into(),
            identity: identity.into(),
            config,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self.store, AnyStore::Memory(_))
    }

    pub fn fallback(&self) -> Fallback {
        Fallback::from_config(&self.config.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::IdentityProvider;

    #[test]
    fn test_unconfigured_runs_demo() {
        let backend = Backend::from_config(ClubConnectConfig::default());
        assert!(backend.is_demo());
        assert_eq!(backend.store.kind(), "memory");
        assert_eq!(backend.fallback(), Fallback::Samples);
    }

    #[cfg(feature = "firebase")]
    #[test]
    fn test_configured_uses_firestore() {
        let mut config = ClubConnectConfig::default();
        config.firebase.api_key = "AIzaTest".into();
        config.firebase.project_id = "clubconnect-test".into();
        let backend = Backend::from_config(config);
        assert!(!backend.is_demo());
        assert_eq!(backend.store.kind(), "firestore");
    }

    #[tokio::test]
    async fn test_demo_account_signs_in() {
        let backend = Backend::demo(ClubConnectConfig::default());
        let user = backend
            .identity
            .sign_in_with_password(DEMO_EMAIL, DEMO_PASSWORD)
            .await
            .unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Demo Student"));
    }
}
