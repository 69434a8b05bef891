use store::StoreError;
use thiserror::Error;

use crate::identity::AuthError;
use crate::validation::ValidationError;

/// Why a view action did not complete.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl ActionError {
    /// Inline text for forms.
    pub fn user_message(&self) -> String {
        match self {
            ActionError::Validation(e) => e.to_string(),
            ActionError::NotSignedIn => "Please sign in first.".to_string(),
            ActionError::Store(_) => "Something went wrong. Please try again.".to_string(),
            ActionError::Auth(e) => e.user_message(),
        }
    }
}
