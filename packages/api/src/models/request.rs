use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::{opt_text, text};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    /// Unknown or missing values read as pending.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "accepted" => RequestStatus::Accepted,
            "declined" => RequestStatus::Declined,
            _ => RequestStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
        }
    }

    /// Badge text.
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::Accepted => "Accepted",
            RequestStatus::Declined => "Declined",
        }
    }

    /// Badge colour class suffix.
    pub fn tone(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "orange",
            RequestStatus::Accepted => "green",
            RequestStatus::Declined => "red",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RequestStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        text(d).map(|s| RequestStatus::parse(&s))
    }
}

/// A request to exchange a skill.
///
/// `skill` is the skill's title at the time the request was made; `skill_id`
/// points at the listing itself and is absent on older documents.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    #[serde(default, skip_serializing)]
    pub id: String,
    #[serde(default, deserialize_with = "text")]
    pub from: String,
    #[serde(default, deserialize_with = "text")]
    pub skill: String,
    #[serde(default, deserialize_with = "opt_text")]
    pub skill_id: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub requester_id: Option<String>,
    #[serde(default, deserialize_with = "text")]
    pub message: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default, deserialize_with = "opt_text", skip_serializing)]
    pub created_at: Option<String>,
}

impl ExchangeRequest {
    pub fn avatar(&self) -> String {
        let text: String = self.from.chars().take(2).flat_map(char::to_uppercase).collect();
        if text.is_empty() {
            "CC".to_string()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parsing_is_lenient() {
        assert_eq!(RequestStatus::parse("accepted"), RequestStatus::Accepted);
        assert_eq!(RequestStatus::parse("Declined"), RequestStatus::Declined);
        assert_eq!(RequestStatus::parse("archived"), RequestStatus::Pending);

        let request: ExchangeRequest =
            serde_json::from_value(json!({ "id": "r9", "status": null, "from": "Dev R" })).unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.avatar(), "DE");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(RequestStatus::Accepted).unwrap(), json!("accepted"));
    }
}
