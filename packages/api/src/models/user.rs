use serde::{Deserialize, Serialize};

use super::initials;

/// The signed-in account as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl AuthUser {
    fn name(&self) -> Option<&str> {
        self.display_name.as_deref().filter(|n| !n.trim().is_empty())
    }

    fn mail(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }

    /// Avatar text: initials of the display name, else the first two letters
    /// of the email, else "CC".
    pub fn initials(&self) -> String {
        if let Some(name) = self.name() {
            return initials(name);
        }
        match self.mail() {
            Some(email) => email.chars().take(2).flat_map(char::to_uppercase).collect(),
            None => "CC".to_string(),
        }
    }

    /// Name shown as the author of things this user posts.
    pub fn author_name(&self) -> String {
        self.name().or(self.mail()).unwrap_or_default().to_string()
    }

    /// Name shown in the account dropdown.
    pub fn label(&self) -> String {
        self.name().or(self.mail()).unwrap_or("Guest").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>, email: Option<&str>) -> AuthUser {
        AuthUser {
            uid: "u1".into(),
            email: email.map(Into::into),
            display_name: name.map(Into::into),
            photo_url: None,
        }
    }

    #[test]
    fn test_initials_fallbacks() {
        assert_eq!(user(Some("Arjun Kumar"), Some("a@x.edu")).initials(), "AK");
        assert_eq!(user(None, Some("dev@x.edu")).initials(), "DE");
        assert_eq!(user(Some(" "), None).initials(), "CC");
    }

    #[test]
    fn test_author_name_prefers_display_name() {
        assert_eq!(user(Some("Kay"), Some("k@x.edu")).author_name(), "Kay");
        assert_eq!(user(None, Some("k@x.edu")).author_name(), "k@x.edu");
        assert_eq!(user(None, None).label(), "Guest");
    }
}
