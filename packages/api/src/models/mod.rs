//! Entity records as the views see them.
//!
//! Documents carry no schema, so every record decodes leniently: missing keys,
//! explicit `null`s and values of the wrong JSON type fall back to defaults
//! instead of failing the whole document. Legacy key spellings (`desc`,
//! `memberCount`) are accepted as aliases.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

mod club;
mod leaderboard;
mod profile;
mod request;
mod skill;
mod user;

pub use club::{Club, DEFAULT_CLUB_EMOJI, DEFAULT_GRADIENT};
pub use leaderboard::LeaderboardEntry;
pub use profile::UserProfile;
pub use request::{ExchangeRequest, RequestStatus};
pub use skill::{SkillListing, DEFAULT_SKILL_COLOR};
pub use user::AuthUser;

/// First letters of the first two words, upper-cased.
pub fn initials(text: &str) -> String {
    text.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

pub(crate) fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    text(d).map(|s| Some(s).filter(|s| !s.is_empty()))
}

pub(crate) fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Arrays keep their order and duplicates; non-string items are skipped.
pub(crate) fn strings<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
