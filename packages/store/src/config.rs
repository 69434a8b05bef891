//! # Application configuration: `clubconnect.toml`
//!
//! A single static configuration object, compiled into the web bundle. It
//! names the Firebase project the app talks to and a few timing knobs. None
//! of it is secret: Firebase web API keys identify a project, they do not
//! authorize anything on their own.
//!
//! ## Structure
//!
//! ```toml
//! [firebase]
//! api_key = "AIza..."
//! auth_domain = "clubconnect-c1013.firebaseapp.com"
//! project_id = "clubconnect-c1013"
//! storage_bucket = "clubconnect-c1013.firebasestorage.app"
//! messaging_sender_id = "1062210495020"
//! app_id = "1:1062210495020:web:29961868082a6f04d4e789"
//!
//! [ui]
//! toast_ms = 3000
//! counter_duration_ms = 1800
//! badge_rotation_ms = 3500
//!
//! [data]
//! sample_fallback = true   # show sample data when a read fails or is empty
//! ```
//!
//! All structs derive `Default` with the production defaults, so a missing or
//! empty file is a valid (unconfigured, demo-mode) configuration.
//!
//! On native builds [`ClubConnectConfig::apply_env`] lets `CLUBCONNECT_*`
//! environment variables (or a `.env` file) override the Firebase keys.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClubConnectConfig {
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Firebase web-app settings, as shown in the Firebase console.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub auth_domain: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub storage_bucket: String,
    #[serde(default)]
    pub messaging_sender_id: String,
    #[serde(default)]
    pub app_id: String,
}

/// Timing of transient UI feedback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a toast stays visible.
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
    /// Duration of the home page counter animation.
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u64,
    /// Interval between hero badge messages.
    #[serde(default = "default_badge_rotation_ms")]
    pub badge_rotation_ms: u64,
}

fn default_toast_ms() -> u64 {
    3000
}

fn default_counter_duration_ms() -> u64 {
    1800
}

fn default_badge_rotation_ms() -> u64 {
    3500
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ms: default_toast_ms(),
            counter_duration_ms: default_counter_duration_ms(),
            badge_rotation_ms: default_badge_rotation_ms(),
        }
    }
}

/// Read behaviour of the entity views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Show the built-in sample dataset when a collection read fails or
    /// returns nothing.
    #[serde(default = "default_sample_fallback")]
    pub sample_fallback: bool,
}

fn default_sample_fallback() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            sample_fallback: default_sample_fallback(),
        }
    }
}

impl FirebaseConfig {
    /// Whether enough is set to reach a real project.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.project_id.trim().is_empty()
    }
}

impl ClubConnectConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "clubconnect.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Override Firebase keys from `CLUBCONNECT_FIREBASE_*` environment
    /// variables, loading a `.env` file first if one exists.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn apply_env(mut self) -> Self {
        dotenvy::dotenv().ok();
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let firebase = &mut self.firebase;
        let targets: [(&str, &mut String); 6] = [
            ("CLUBCONNECT_FIREBASE_API_KEY", &mut firebase.api_key),
            ("CLUBCONNECT_FIREBASE_AUTH_DOMAIN", &mut firebase.auth_domain),
            ("CLUBCONNECT_FIREBASE_PROJECT_ID", &mut firebase.project_id),
            ("CLUBCONNECT_FIREBASE_STORAGE_BUCKET", &mut firebase.storage_bucket),
            ("CLUBCONNECT_FIREBASE_MESSAGING_SENDER_ID", &mut firebase.messaging_sender_id),
            ("CLUBCONNECT_FIREBASE_APP_ID", &mut firebase.app_id),
        ];
        for (key, slot) in targets {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClubConnectConfig::from_toml("").unwrap();
        assert_eq!(config, ClubConnectConfig::default());
        assert_eq!(config.ui.toast_ms, 3000);
        assert_eq!(config.ui.counter_duration_ms, 1800);
        assert!(config.data.sample_fallback);
        assert!(!config.firebase.is_configured());
    }

    #[test]
    fn test_parse_firebase_section() {
        let config = ClubConnectConfig::from_toml(
            r#"
            [firebase]
            api_key = "AIzaTest"
            project_id = "clubconnect-test"

            [data]
            sample_fallback = false
            "#,
        )
        .unwrap();
        assert!(config.firebase.is_configured());
        assert_eq!(config.firebase.project_id, "clubconnect-test");
        assert!(!config.data.sample_fallback);
        // Untouched sections keep their defaults
        assert_eq!(config.ui.badge_rotation_ms, 3500);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = ClubConnectConfig::default();
        config.firebase.api_key = "k".to_string();
        config.ui.toast_ms = 1000;
        let text = config.to_toml().unwrap();
        assert_eq!(ClubConnectConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_overrides_skip_blank_values() {
        let mut config = ClubConnectConfig::default();
        config.firebase.project_id = "from-file".to_string();
        config.apply_overrides(|key| match key {
            "CLUBCONNECT_FIREBASE_API_KEY" => Some("from-env".to_string()),
            "CLUBCONNECT_FIREBASE_PROJECT_ID" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.firebase.api_key, "from-env");
        assert_eq!(config.firebase.project_id, "from-file");
    }
}
