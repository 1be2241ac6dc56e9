//! Application configuration model.
//!
//! Plain data, serde-backed. Loading and caching live in the application
//! layer; this module only defines the shape and the defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use strum::{Display, EnumString};

/// Visual theme for rendered output (terminal accents and report export).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Teal/cyan gradient, the classic look.
    #[default]
    Aqua,
    /// Violet/pink gradient.
    Dusk,
    /// No gradient, monochrome.
    Plain,
}

/// Remote-inference backend selector for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EngineMode {
    #[default]
    Gemini,
}

/// Engine construction and call settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Which remote backend to construct.
    pub mode: EngineMode,
    /// Model name passed to the backend.
    pub model: String,
    /// Whether to ask the engine for a generated reply in addition to the
    /// tags and the prompt instruction.
    pub respond: bool,
    /// Hard timeout for one engine call, in seconds.
    pub timeout_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            mode: EngineMode::Gemini,
            model: "gemini-2.5-flash".to_string(),
            respond: true,
            timeout_secs: 60,
        }
    }
}

impl EngineSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Root application configuration.
///
/// Every field has a default, so a missing or partial config file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: Theme,
    pub engine: EngineSettings,
    /// Whether a session starts with demo mode already on.
    pub demo_mode: bool,
    /// Smoothing delay for demo-mode responses, in milliseconds.
    pub demo_latency_ms: u64,
    /// Time-to-live for the cached branding-art payload, in seconds.
    pub art_ttl_secs: u64,
    /// Candidate paths probed for the branding art, first readable wins.
    pub art_paths: Vec<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            engine: EngineSettings::default(),
            demo_mode: false,
            demo_latency_ms: 350,
            art_ttl_secs: 3600,
            art_paths: vec![
                PathBuf::from("assets/background.png"),
                PathBuf::from("assets/art/background.png"),
                PathBuf::from("background.png"),
            ],
        }
    }
}

impl AppConfig {
    pub fn demo_latency(&self) -> Duration {
        Duration::from_millis(self.demo_latency_ms)
    }

    pub fn art_ttl(&self) -> Duration {
        Duration::from_secs(self.art_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.theme, Theme::Aqua);
        assert_eq!(config.engine.mode, EngineMode::Gemini);
        assert!(config.engine.respond);
        assert_eq!(config.engine.timeout_secs, 60);
        assert!(!config.demo_mode);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            theme = "dusk"

            [engine]
            respond = false
            "#,
        )
        .unwrap();

        assert_eq!(config.theme, Theme::Dusk);
        assert!(!config.engine.respond);
        assert_eq!(config.engine.model, "gemini-2.5-flash");
        assert_eq!(config.demo_latency_ms, 350);
    }

    #[test]
    fn test_theme_from_str() {
        assert_eq!(Theme::from_str("plain").unwrap(), Theme::Plain);
        assert!(Theme::from_str("neon").is_err());
    }
}
