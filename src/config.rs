//! Configuration loading and validation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classify::{Classifier, Rule};
use crate::error::{ConfigError, Result};
use crate::filter::{DEFAULT_DENYLIST, NoiseFilter};

/// Main configuration for the honeypot monitor.
///
/// Shared by both binaries; the sniffer only reads the capture fields and
/// the portal only the presentation fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Network interface to capture on. If None, auto-detect.
    pub interface: Option<String>,

    /// Path of the append-only activity log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Substrings marking boring DNS traffic, matched case-insensitively.
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,

    /// Classifier rule table override. Empty means the built-in table.
    #[serde(default, rename = "classifier")]
    pub classifier_rules: Vec<RuleSettings>,

    /// Number of most recent events shown on the dashboard.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    #[serde(default)]
    pub dashboard: DashboardSettings,
}

/// One classifier rule as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSettings {
    pub tokens: Vec<String>,
    pub category: String,
}

/// Settings for the dashboard HTTP server.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardSettings {
    /// Address the portal binds to.
    #[serde(default = "default_listen", deserialize_with = "deserialize_socket_addr")]
    pub listen: SocketAddr,

    /// Client-side page refresh interval in seconds.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            refresh_secs: default_refresh_secs(),
        }
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs/dns_log.csv")
}

fn default_denylist() -> Vec<String> {
    DEFAULT_DENYLIST.iter().map(ToString::to_string).collect()
}

const fn default_window_size() -> usize {
    40
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

const fn default_refresh_secs() -> u64 {
    5
}

fn deserialize_socket_addr<'de, D>(deserializer: D) -> std::result::Result<SocketAddr, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the domain classifier, preferring the configured rule table.
    pub fn classifier(&self) -> Classifier {
        if self.classifier_rules.is_empty() {
            Classifier::default()
        } else {
            Classifier::new(
                self.classifier_rules
                    .iter()
                    .map(|rule| Rule::new(&rule.tokens, &rule.category))
                    .collect(),
            )
        }
    }

    /// Build the noise filter from the configured denylist.
    pub fn noise_filter(&self) -> NoiseFilter {
        NoiseFilter::new(&self.denylist)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(ConfigError::Validation("window_size must be > 0".into()).into());
        }

        if self.dashboard.refresh_secs == 0 {
            return Err(
                ConfigError::Validation("dashboard.refresh_secs must be > 0".into()).into(),
            );
        }

        for pattern in &self.denylist {
            if pattern.is_empty() {
                return Err(ConfigError::Validation("empty denylist pattern".into()).into());
            }
        }

        for rule in &self.classifier_rules {
            if rule.category.is_empty() {
                return Err(
                    ConfigError::Validation("classifier rule with empty category".into()).into(),
                );
            }
            if rule.tokens.is_empty() || rule.tokens.iter().any(String::is_empty) {
                return Err(ConfigError::Validation(format!(
                    "classifier rule {:?} needs non-empty tokens",
                    rule.category
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_apply_defaults_to_empty_config() {
        let config = Config::parse("").unwrap();

        assert!(config.interface.is_none());
        assert_eq!(config.log_path, PathBuf::from("logs/dns_log.csv"));
        assert_eq!(config.window_size, 40);
        assert_eq!(config.dashboard.refresh_secs, 5);
        assert_eq!(config.dashboard.listen.port(), 8080);
        assert!(!config.denylist.is_empty());
        assert!(config.classifier_rules.is_empty());
    }

    #[test]
    fn should_parse_capture_settings() {
        let toml = r#"
            interface = "wlan0"
            log_path = "/tmp/honeypot/activity.csv"
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.interface.as_deref(), Some("wlan0"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/honeypot/activity.csv"));
    }

    #[test]
    fn should_parse_dashboard_settings() {
        let toml = r#"
            [dashboard]
            listen = "127.0.0.1:9090"
            refresh_secs = 10
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.dashboard.listen.to_string(), "127.0.0.1:9090");
        assert_eq!(config.dashboard.refresh_secs, 10);
    }

    #[test]
    fn should_build_classifier_from_configured_rules() {
        let toml = r#"
            [[classifier]]
            tokens = ["honeypot"]
            category = "Bait"
        "#;

        let config = Config::parse(toml).unwrap();
        let classifier = config.classifier();
        assert_eq!(classifier.classify("login.honeypot.lan"), "Bait");
        // Built-in rules are replaced, not merged.
        assert_eq!(classifier.classify("icloud.com"), "Unknown");
    }

    #[test]
    fn should_reject_zero_window_size() {
        assert!(Config::parse("window_size = 0").is_err());
    }

    #[test]
    fn should_reject_zero_refresh_interval() {
        let toml = r#"
            [dashboard]
            refresh_secs = 0
        "#;

        assert!(Config::parse(toml).is_err());
    }

    #[test]
    fn should_reject_empty_denylist_pattern() {
        let toml = r#"denylist = ["apple.com", ""]"#;

        assert!(Config::parse(toml).is_err());
    }

    #[test]
    fn should_reject_classifier_rule_without_tokens() {
        let toml = r#"
            [[classifier]]
            tokens = []
            category = "Empty"
        "#;

        assert!(Config::parse(toml).is_err());
    }

    #[test]
    fn should_reject_unknown_fields() {
        assert!(Config::parse(r#"unknown_field = "value""#).is_err());
    }

    #[test]
    fn should_reject_invalid_listen_address() {
        let toml = r#"
            [dashboard]
            listen = "not-an-address"
        "#;

        assert!(Config::parse(toml).is_err());
    }
}
