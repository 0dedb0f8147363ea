//! Configuration loading and layering
//!
//! Precedence order (highest to lowest):
//! 1. Command line flags (applied by the caller)
//! 2. Environment variable overrides
//! 3. Root config file
//! 4. Built-in defaults

use super::{defaults, paths, schema::Config};
use crate::source::parse_duration;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the root config file and environment
    pub fn load() -> Result<Config> {
        Self::load_from(&paths::root_config_path())
    }

    /// Load configuration from `path` (if it exists) and environment
    pub fn load_from(path: &Path) -> Result<Config> {
        let config = if path.exists() {
            Self::load_file(path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", path.display());
            Self::load_defaults()
        };
        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        // Missing keys fall back to their defaults through serde
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the root config file and the merged result
    pub fn validate() -> Result<()> {
        let root_path = paths::root_config_path();
        if root_path.exists() {
            let config = Self::load_file(&root_path)?;
            Self::check(&config)
                .with_context(|| format!("Invalid config file: {}", root_path.display()))?;
        }

        let merged = Self::load().context("Failed to load merged configuration")?;
        Self::check(&merged).context("Invalid merged configuration")
    }

    /// Check value formats that serde cannot express
    pub fn check(config: &Config) -> Result<()> {
        url::Url::parse(&config.api_url)
            .with_context(|| format!("apiUrl is not a valid URL: {}", config.api_url))?;
        Self::request_timeout(config)?;
        Self::refresh_interval(config)?;

        check_threshold(config.search.threshold)
    }

    /// Parsed `requestTimeout`, never zero
    pub fn request_timeout(config: &Config) -> Result<Duration> {
        parse_request_timeout(&config.request_timeout)
            .with_context(|| format!("requestTimeout: {}", config.request_timeout))
    }

    /// Parsed `refreshInterval`, `None` when disabled
    pub fn refresh_interval(config: &Config) -> Result<Option<Duration>> {
        let interval = parse_duration(&config.refresh_interval)
            .with_context(|| format!("refreshInterval: {}", config.refresh_interval))?;
        Ok((!interval.is_zero()).then_some(interval))
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(config: Config) -> Config {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
        if let Some(api_url) = lookup("KA9S_API_URL") {
            config.api_url = api_url;
        }

        if let Some(timeout) = lookup("KA9S_REQUEST_TIMEOUT") {
            config.request_timeout = timeout;
        }

        if let Some(namespace) = lookup("KA9S_DEFAULT_NAMESPACE") {
            config.default_namespace = namespace;
        }

        config
    }

    /// Save configuration to a file
    ///
    /// Writes a temp file beside `path` and renames it into place, so a
    /// failed write never leaves a truncated config behind.
    pub fn save(config: &Config, path: &PathBuf) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        paths::ensure_dir(parent)?;

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        let mut tmp = tempfile::NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
        tmp.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        tmp.persist(path)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

/// Parse a request timeout. Zero is rejected: every request would time out.
pub(crate) fn parse_request_timeout(value: &str) -> Result<Duration> {
    let timeout = parse_duration(value)?;
    if timeout.is_zero() {
        anyhow::bail!("requestTimeout must be greater than zero");
    }
    Ok(timeout)
}

/// Fuzzy threshold is a fraction of the query length
pub(crate) fn check_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("search.threshold must be between 0 and 1, got {}", threshold);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ConfigLoader::load_file(&tmp.path().join("missing.yaml"));
        assert!(config.is_err());

        let config = ConfigLoader::apply_overrides(ConfigLoader::load_defaults(), |_| None);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");
        let config = Config {
            api_url: "http://applier:9000".to_string(),
            default_namespace: "payments".to_string(),
            ..Default::default()
        };

        ConfigLoader::save(&config, &path).unwrap();
        assert_eq!(ConfigLoader::load_file(&path).unwrap(), config);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let env: HashMap<&str, &str> = [
            ("KA9S_API_URL", "http://override:8080"),
            ("KA9S_DEFAULT_NAMESPACE", "billing"),
        ]
        .into_iter()
        .collect();

        let config = ConfigLoader::apply_overrides(Config::default(), |key| {
            env.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.api_url, "http://override:8080");
        assert_eq!(config.default_namespace, "billing");
        assert_eq!(config.request_timeout, "10s");
    }

    #[test]
    fn test_check_rejects_bad_values() {
        assert!(ConfigLoader::check(&Config::default()).is_ok());

        let bad_url = Config {
            api_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(ConfigLoader::check(&bad_url).is_err());

        let bad_interval = Config {
            refresh_interval: "soon".to_string(),
            ..Default::default()
        };
        assert!(ConfigLoader::check(&bad_interval).is_err());

        let mut bad_threshold = Config::default();
        bad_threshold.search.threshold = -1.0;
        assert!(ConfigLoader::check(&bad_threshold).is_err());
        bad_threshold.search.threshold = 1.5;
        assert!(ConfigLoader::check(&bad_threshold).is_err());
        bad_threshold.search.threshold = 1.0;
        assert!(ConfigLoader::check(&bad_threshold).is_ok());
    }

    #[test]
    fn test_zero_request_timeout_is_rejected() {
        let config = Config {
            request_timeout: "0s".to_string(),
            ..Default::default()
        };
        assert!(ConfigLoader::check(&config).is_err());
        assert!(ConfigLoader::request_timeout(&config).is_err());

        let config = Config {
            request_timeout: "500ms".to_string(),
            ..Default::default()
        };
        assert_eq!(
            ConfigLoader::request_timeout(&config).unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "apiUrl: http://old:8080\nleftover: true\n").unwrap();

        ConfigLoader::save(&Config::default(), &path).unwrap();
        assert_eq!(ConfigLoader::load_file(&path).unwrap(), Config::default());
        // only the config file remains, no stray temp files
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_refresh_interval_zero_is_off() {
        assert_eq!(
            ConfigLoader::refresh_interval(&Config::default()).unwrap(),
            None
        );
        let config = Config {
            refresh_interval: "30s".to_string(),
            ..Default::default()
        };
        assert_eq!(
            ConfigLoader::refresh_interval(&config).unwrap(),
            Some(Duration::from_secs(30))
        );
    }
}
