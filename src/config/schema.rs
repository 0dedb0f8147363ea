//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the kube-applier status API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout (e.g. "10s", "1m")
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,

    /// Automatic refresh period, "0s" disables it
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,

    /// Starting namespace, empty for all namespaces
    #[serde(default)]
    pub default_namespace: String,

    /// Fuzzy search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Fuzzy search configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Maximum normalized edit distance (0.0 = exact substring only)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiConfig {
    /// Enable mouse support
    #[serde(default = "default_false")]
    pub enable_mouse: bool,

    /// Disable Unicode icons for compatibility
    #[serde(default = "default_false")]
    pub no_icons: bool,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> String {
    "10s".to_string()
}

fn default_refresh_interval() -> String {
    "0s".to_string()
}

fn default_threshold() -> f64 {
    crate::search::DEFAULT_THRESHOLD
}

fn default_false() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: default_request_timeout(),
            refresh_interval: default_refresh_interval(),
            default_namespace: String::new(),
            search: SearchConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enable_mouse: default_false(),
            no_icons: default_false(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, "10s");
        assert_eq!(config.refresh_interval, "0s");
        assert!(config.default_namespace.is_empty());
        assert_eq!(config.search.threshold, 0.3);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("apiUrl"));
        assert!(yaml.contains("refreshInterval"));
        assert!(yaml.contains("threshold"));
    }

    #[test]
    fn test_config_deserialization() {
        let yaml = r#"
apiUrl: https://kube-applier.example.com
defaultNamespace: payments
search:
  threshold: 0.5
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api_url, "https://kube-applier.example.com");
        assert_eq!(config.default_namespace, "payments");
        assert_eq!(config.search.threshold, 0.5);
        // untouched keys keep their defaults
        assert_eq!(config.request_timeout, "10s");
        assert!(!config.ui.enable_mouse);
    }
}
