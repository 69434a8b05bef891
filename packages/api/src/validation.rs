use thiserror::Error;

/// Client-side form checks, run before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required.")]
    Required(&'static str),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least {0} characters.")]
    PasswordTooShort(usize),
    #[error("Passwords do not match.")]
    Mismatch,
}

/// Reject empty or whitespace-only input; returns the trimmed value.
pub fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(trimmed)
    }
}

pub fn require_email(value: &str) -> Result<&str, ValidationError> {
    let email = require("Email", value)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ValidationError::InvalidEmail),
    }
}

/// Split comma-separated input, trimming each item. Empty items are dropped.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert_eq!(require("Name", "  Chess  "), Ok("Chess"));
        assert_eq!(require("Name", "   "), Err(ValidationError::Required("Name")));
        assert_eq!(
            ValidationError::Required("Club name").to_string(),
            "Club name is required."
        );
    }

    #[test]
    fn test_require_email() {
        assert!(require_email("ann@college.edu").is_ok());
        assert_eq!(require_email("ann"), Err(ValidationError::InvalidEmail));
        assert_eq!(require_email(""), Err(ValidationError::Required("Email")));
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" Tech, JavaScript ,,React "), vec!["Tech", "JavaScript", "React"]);
        assert!(split_list("  ").is_empty());
    }
}
