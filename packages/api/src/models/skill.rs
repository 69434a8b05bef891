use serde::{Deserialize, Serialize};

use super::{count, opt_text, strings, text};

pub const DEFAULT_SKILL_COLOR: &str = "#ede9fe";

/// A skill someone offers to teach.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillListing {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "strings")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "text")]
    pub author: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "count")]
    pub exchanges: u64,
    #[serde(default, deserialize_with = "opt_text", skip_serializing)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub color: String,
}

impl SkillListing {
    pub fn color(&self) -> &str {
        if self.color.is_empty() {
            DEFAULT_SKILL_COLOR
        } else {
            &self.color
        }
    }

    /// Glyph for the card icon: the first letter of the title.
    pub fn glyph(&self) -> String {
        self.title
            .chars()
            .next()
            .map(String::from)
            .unwrap_or_else(|| "📚".to_string())
    }

    pub fn blurb(&self) -> &str {
        if self.description.is_empty() {
            "Skill exchange opportunity on campus."
        } else {
            &self.description
        }
    }
}
