use serde::{Deserialize, Serialize};

use super::{opt_text, strings, text};

/// The `users/<uid>` document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub display_name: String,
    #[serde(default, deserialize_with = "text")]
    pub bio: String,
    #[serde(default, deserialize_with = "strings")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "text")]
    pub email: String,
    #[serde(default, deserialize_with = "opt_text", skip_serializing)]
    pub updated_at: Option<String>,
}
