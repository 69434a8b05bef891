//! The signed-in user's own profile.

use store::{Collection, DocumentStore, Write};

use crate::identity::IdentityProvider;
use crate::models::{initials, AuthUser, UserProfile};
use crate::toast::Notice;
use crate::validation::split_list;

/// How long the save button reads "Saved!" after a successful save.
pub const SAVED_BADGE_MS: u64 = 2000;

/// Edit-profile form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub display_name: String,
    pub bio: String,
    /// Comma-separated.
    pub skills: String,
}

impl ProfileForm {
    /// Fill the form from the stored profile, defaulting from the session.
    pub fn from_profile(profile: Option<&UserProfile>, user: &AuthUser) -> Self {
        let session_name = user.display_name.clone().unwrap_or_default();
        match profile {
            Some(profile) => Self {
                display_name: if profile.display_name.is_empty() {
                    session_name
                } else {
                    profile.display_name.clone()
                },
                bio: profile.bio.clone(),
                skills: profile.skills.join(", "),
            },
            None => Self {
                display_name: session_name,
                ..Default::default()
            },
        }
    }

    pub fn skill_tags(&self) -> Vec<String> {
        split_list(&self.skills)
    }

    /// Avatar text for the profile card.
    pub fn initials(&self, user: &AuthUser) -> String {
        let source = if self.display_name.trim().is_empty() {
            user.email.clone().unwrap_or_else(|| "CC".to_string())
        } else {
            self.display_name.clone()
        };
        initials(&source)
    }

    pub fn to_write(&self, user: &AuthUser) -> Write {
        Write::default()
            .field("displayName", self.display_name.trim())
            .field("bio", self.bio.trim())
            .field("email", user.email.clone().unwrap_or_default())
            .field("skills", self.skill_tags())
            .with_server_timestamp("updatedAt")
    }
}

/// Read `users/<uid>`. A missing document or a failed read yields the
/// session defaults.
pub async fn load_profile(store: &impl DocumentStore, user: &AuthUser) -> ProfileForm {
    match store.get(Collection::Users, &user.uid).await {
        Ok(Some(doc)) => match doc.decode::<UserProfile>() {
            Ok(profile) => ProfileForm::from_profile(Some(&profile), user),
            Err(e) => {
                tracing::warn!("unreadable profile {}: {e}", user.uid);
                ProfileForm::from_profile(None, user)
            }
        },
        Ok(None) => ProfileForm::from_profile(None, user),
        Err(e) => {
            tracing::warn!("could not load profile {}: {e}", user.uid);
            ProfileForm::from_profile(None, user)
        }
    }
}

/// Update the provider's display name, then merge the profile document.
pub async fn save_profile(
    store: &impl DocumentStore,
    identity: &impl IdentityProvider,
    user: &AuthUser,
    form: &ProfileForm,
) -> Notice {
    let display_name = form.display_name.trim();
    if user.display_name.as_deref() != Some(display_name) {
        if let Err(e) = identity.update_display_name(display_name).await {
            tracing::error!("updating display name failed: {e}");
            return Notice::error("Error saving profile.");
        }
    }
    match store.set(Collection::Users, &user.uid, form.to_write(user), true).await {
        Ok(()) => {
            tracing::info!("saved profile {}", user.uid);
            Notice::success("Profile saved! ✅")
        }
        Err(e) => {
            tracing::error!("saving profile failed: {e}");
            Notice::error("Error saving profile.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MemoryIdentity;
    use serde_json::json;
    use store::MemoryStore;

    async fn signed_in() -> (MemoryIdentity, AuthUser) {
        let identity =
            MemoryIdentity::new().with_account("ann@college.edu", "secret1", Some("Ann Lee"));
        let user = identity.sign_in_with_password("ann@college.edu", "secret1").await.unwrap();
        (identity, user)
    }

    #[tokio::test]
    async fn test_missing_profile_defaults_from_session() {
        let store = MemoryStore::new();
        let (_, user) = signed_in().await;
        let form = load_profile(&store, &user).await;
        assert_eq!(form.display_name, "Ann Lee");
        assert!(form.bio.is_empty());
        assert!(form.skills.is_empty());

        store.set_offline(true);
        assert_eq!(load_profile(&store, &user).await, form);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        let (identity, user) = signed_in().await;
        // Fields the form does not manage survive the merge.
        store
            .set(Collection::Users, &user.uid, Write::default().field("points", 40), false)
            .await
            .unwrap();

        let form = ProfileForm {
            display_name: "Ann L.".into(),
            bio: "Designer".into(),
            skills: "Figma, , Sketch ".into(),
        };
        let notice = save_profile(&store, &identity, &user, &form).await;
        assert_eq!(notice, Notice::success("Profile saved! ✅"));
        assert_eq!(
            identity.current_user().and_then(|u| u.display_name).as_deref(),
            Some("Ann L.")
        );

        let doc = store.get(Collection::Users, &user.uid).await.unwrap().unwrap();
        assert_eq!(doc.fields["skills"], json!(["Figma", "Sketch"]));
        assert_eq!(doc.fields["email"], json!("ann@college.edu"));
        assert_eq!(doc.fields["points"], json!(40));
        assert!(doc.fields["updatedAt"].is_string());

        let reloaded = load_profile(&store, &user).await;
        assert_eq!(reloaded.skills, "Figma, Sketch");
        assert_eq!(reloaded.bio, "Designer");
    }

    #[tokio::test]
    async fn test_save_failure() {
        let store = MemoryStore::new();
        let (identity, user) = signed_in().await;
        store.set_offline(true);
        let form = ProfileForm::from_profile(None, &user);
        let notice = save_profile(&store, &identity, &user, &form).await;
        assert_eq!(notice, Notice::error("Error saving profile."));
    }

    #[test]
    fn test_initials() {
        let user = AuthUser {
            uid: "u".into(),
            email: Some("kay@college.edu".into()),
            display_name: None,
            photo_url: None,
        };
        let mut form = ProfileForm::default();
        assert_eq!(form.initials(&user), "K");
        form.display_name = "Kay Patel".into();
        assert_eq!(form.initials(&user), "KP");
    }
}
