use thiserror::Error;

/// Provider error codes the app distinguishes. Identity Toolkit reports them
/// as upper-case strings (`EMAIL_EXISTS`, `INVALID_LOGIN_CREDENTIALS`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    InvalidCredential,
    InvalidEmail,
    EmailExists,
    WeakPassword,
    TooManyAttempts,
    UserDisabled,
    /// The stored session can no longer be used; sign in again.
    SessionExpired,
    NotSignedIn,
    Other(String),
}

impl AuthErrorCode {
    pub fn parse(code: &str) -> Self {
        match code.trim() {
            "INVALID_LOGIN_CREDENTIALS" | "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" => {
                AuthErrorCode::InvalidCredential
            }
            "INVALID_EMAIL" | "MISSING_EMAIL" => AuthErrorCode::InvalidEmail,
            "EMAIL_EXISTS" => AuthErrorCode::EmailExists,
            "WEAK_PASSWORD" => AuthErrorCode::WeakPassword,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthErrorCode::TooManyAttempts,
            "USER_DISABLED" => AuthErrorCode::UserDisabled,
            "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "INVALID_ID_TOKEN" | "USER_NOT_FOUND"
            | "CREDENTIAL_TOO_OLD_LOGIN_AGAIN" => AuthErrorCode::SessionExpired,
            other => AuthErrorCode::Other(other.to_string()),
        }
    }

    fn message(&self) -> &str {
        match self {
            AuthErrorCode::InvalidCredential => "Invalid email or password.",
            AuthErrorCode::InvalidEmail => "Please enter a valid email address.",
            AuthErrorCode::EmailExists => "An account with this email already exists.",
            AuthErrorCode::WeakPassword => "Password should be at least 6 characters.",
            AuthErrorCode::TooManyAttempts => "Too many attempts. Please try again later.",
            AuthErrorCode::UserDisabled => "This account has been disabled.",
            AuthErrorCode::SessionExpired => "Your session has expired. Please sign in again.",
            AuthErrorCode::NotSignedIn => "Please sign in first.",
            AuthErrorCode::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("identity provider rejected the request: {code:?}")]
    Provider {
        code: AuthErrorCode,
        detail: Option<String>,
    },
    #[error("identity provider unreachable: {0}")]
    Transport(String),
    #[error("unexpected identity provider response: {0}")]
    Decode(String),
}

impl AuthError {
    pub fn code(code: AuthErrorCode) -> Self {
        AuthError::Provider { code, detail: None }
    }

    pub fn not_signed_in() -> Self {
        Self::code(AuthErrorCode::NotSignedIn)
    }

    /// Text shown inline on the sign-in and sign-up forms.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Provider {
                code: AuthErrorCode::Other(code),
                detail: Some(detail),
            } => format!("{detail} ({code})"),
            AuthError::Provider { code, .. } => code.message().to_string(),
            AuthError::Transport(_) => "Network error. Please check your connection.".to_string(),
            AuthError::Decode(_) => "Something went wrong. Please try again.".to_string(),
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(
            self,
            AuthError::Provider {
                code: AuthErrorCode::SessionExpired,
                ..
            }
        )
    }
}

/// Parse an Identity Toolkit / Secure Token error body:
/// `{"error": {"code": 400, "message": "WEAK_PASSWORD : Password should be ..."}}`.
pub fn parse_error(body: &str) -> AuthError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));
    let Some(message) = message else {
        return AuthError::Decode(body.trim().to_string());
    };
    let (code, detail) = match message.split_once(" : ") {
        Some((code, detail)) => (code, Some(detail.trim().to_string())),
        None => (message.as_str(), None),
    };
    AuthError::Provider {
        code: AuthErrorCode::parse(code),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_with_detail() {
        let err = parse_error(
            r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters","errors":[]}}"#,
        );
        assert_eq!(
            err,
            AuthError::Provider {
                code: AuthErrorCode::WeakPassword,
                detail: Some("Password should be at least 6 characters".to_string()),
            }
        );
    }

    #[test]
    fn test_invalid_credentials_get_friendly_message() {
        let err = parse_error(r#"{"error":{"code":400,"message":"INVALID_LOGIN_CREDENTIALS"}}"#);
        assert_eq!(err.user_message(), "Invalid email or password.");
    }

    #[test]
    fn test_unknown_code_keeps_provider_text() {
        let err = parse_error(
            r#"{"error":{"message":"OPERATION_NOT_ALLOWED : Password sign-in is disabled"}}"#,
        );
        assert_eq!(err.user_message(), "Password sign-in is disabled (OPERATION_NOT_ALLOWED)");
    }

    #[test]
    fn test_unparseable_body() {
        assert!(matches!(parse_error("<html>"), AuthError::Decode(_)));
    }

    #[test]
    fn test_session_expired_codes() {
        assert!(parse_error(r#"{"error":{"message":"TOKEN_EXPIRED"}}"#).is_session_expired());
        assert!(!AuthError::not_signed_in().is_session_expired());
    }
}
