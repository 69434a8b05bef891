use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{count, opt_text, text};

pub const DEFAULT_CLUB_EMOJI: &str = "🏛️";
pub const DEFAULT_GRADIENT: [&str; 2] = ["#7c3aed", "#4f46e5"];

/// A campus club. Stored under the legacy keys `grad` and `members`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub name: String,
    #[serde(default, alias = "desc", deserialize_with = "text")]
    pub description: String,
    #[serde(default, deserialize_with = "text")]
    pub emoji: String,
    #[serde(default, deserialize_with = "text")]
    pub category: String,
    #[serde(default, rename = "grad", deserialize_with = "gradient")]
    pub gradient: Option<[String; 2]>,
    #[serde(default, alias = "memberCount", deserialize_with = "count")]
    pub members: u64,
    #[serde(default, deserialize_with = "opt_text")]
    pub admin_id: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing)]
    pub created_at: Option<String>,
}

fn gradient<'de, D: Deserializer<'de>>(d: D) -> Result<Option<[String; 2]>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => match (items.first(), items.get(1)) {
            (Some(Value::String(a)), Some(Value::String(b))) => Some([a.clone(), b.clone()]),
            _ => None,
        },
        _ => None,
    })
}

impl Club {
    pub fn emoji(&self) -> &str {
        if self.emoji.is_empty() {
            DEFAULT_CLUB_EMOJI
        } else {
            &self.emoji
        }
    }

    pub fn gradient(&self) -> (&str, &str) {
        match &self.gradient {
            Some([a, b]) => (a, b),
            None => (DEFAULT_GRADIENT[0], DEFAULT_GRADIENT[1]),
        }
    }

    /// CSS `background` value for the club header.
    pub fn background(&self) -> String {
        let (from, to) = self.gradient();
        format!("linear-gradient(135deg, {from}, {to})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_legacy_keys() {
        let club: Club = serde_json::from_value(json!({
            "id": "c1",
            "name": "AI & ML Club",
            "desc": "Explore machine learning.",
            "grad": ["#7c3aed", "#4f46e5"],
            "memberCount": 120,
        }))
        .unwrap();
        assert_eq!(club.description, "Explore machine learning.");
        assert_eq!(club.members, 120);
        assert_eq!(club.emoji(), DEFAULT_CLUB_EMOJI);
        assert_eq!(club.gradient(), ("#7c3aed", "#4f46e5"));
    }

    #[test]
    fn test_decode_tolerates_bad_values() {
        let club: Club = serde_json::from_value(json!({
            "id": "c9",
            "name": null,
            "members": 12.0,
            "grad": ["#fff"],
            "adminId": "",
        }))
        .unwrap();
        assert_eq!(club.name, "");
        assert_eq!(club.members, 12);
        assert!(club.gradient.is_none());
        assert!(club.admin_id.is_none());
        assert_eq!(club.background(), "linear-gradient(135deg, #7c3aed, #4f46e5)");
    }
}
