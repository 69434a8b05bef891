//! Sign-in and sign-up forms.

use crate::error::ActionError;
use crate::identity::IdentityProvider;
use crate::models::AuthUser;
use crate::validation::{require, require_email, ValidationError};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_email(&self.email)?;
        require("Password", &self.password)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("Full name", &self.name)?;
        require_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if self.password != self.confirm {
            return Err(ValidationError::Mismatch);
        }
        Ok(())
    }
}

pub async fn sign_in(
    identity: &impl IdentityProvider,
    form: &LoginForm,
) -> Result<AuthUser, ActionError> {
    form.validate()?;
    let user = identity
        .sign_in_with_password(form.email.trim(), &form.password)
        .await?;
    Ok(user)
}

/// Create the account and set its display name.
pub async fn sign_up(
    identity: &impl IdentityProvider,
    form: &SignupForm,
) -> Result<AuthUser, ActionError> {
    form.validate()?;
    let user = identity
        .sign_up(form.name.trim(), form.email.trim(), &form.password)
        .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::MemoryIdentity;

    fn signup(name: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: name.into(),
            email: "new@college.edu".into(),
            password: password.into(),
            confirm: confirm.into(),
        }
    }

    #[test]
    fn test_signup_validation_order() {
        assert_eq!(
            signup(" ", "secret1", "secret1").validate(),
            Err(ValidationError::Required("Full name"))
        );
        assert_eq!(
            signup("Ann", "12345", "12345").validate(),
            Err(ValidationError::PasswordTooShort(6))
        );
        assert_eq!(signup("Ann", "secret1", "secret2").validate(), Err(ValidationError::Mismatch));
        assert!(signup("Ann", "secret1", "secret1").validate().is_ok());
    }

    #[tokio::test]
    async fn test_sign_up_then_sign_in() {
        let identity = MemoryIdentity::new();
        let user = sign_up(&identity, &signup("Ann Lee", "secret1", "secret1")).await.unwrap();
        assert_eq!(user.display_name.as_deref(), Some("Ann Lee"));

        identity.sign_out().await.unwrap();
        let form = LoginForm {
            email: " new@college.edu ".into(),
            password: "secret1".into(),
        };
        let again = sign_in(&identity, &form).await.unwrap();
        assert_eq!(again.uid, user.uid);
    }

    #[tokio::test]
    async fn test_wrong_password_message() {
        let identity = MemoryIdentity::new().with_account("ann@college.edu", "secret1", None);
        let form = LoginForm {
            email: "ann@college.edu".into(),
            password: "nope".into(),
        };
        let err = sign_in(&identity, &form).await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid email or password.");
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_provider() {
        let identity = MemoryIdentity::new();
        let err = sign_in(&identity, &LoginForm::default()).await.unwrap_err();
        assert_eq!(err, ActionError::Validation(ValidationError::Required("Email")));
        assert!(identity.current_user().is_none());
    }
}
