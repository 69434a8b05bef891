use serde::{Deserialize, Serialize};

use super::{count, text};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, deserialize_with = "text")]
    pub initials: String,
    #[serde(default, deserialize_with = "text")]
    pub color: String,
    #[serde(default, deserialize_with = "count")]
    pub skills: u64,
    #[serde(default, deserialize_with = "count")]
    pub exchanges: u64,
    #[serde(default, deserialize_with = "count")]
    pub points: u64,
}

impl LeaderboardEntry {
    pub fn initials(&self) -> String {
        if self.initials.is_empty() {
            self.name.chars().take(2).flat_map(char::to_uppercase).collect()
        } else {
            self.initials.clone()
        }
    }

    pub fn color(&self) -> &str {
        if self.color.is_empty() {
            "#7c3aed"
        } else {
            &self.color
        }
    }
}
