//! Configuration system for ka9s
//!
//! A single YAML file layered under environment overrides and command line
//! flags.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, SearchConfig, UiConfig};

/// Keys accepted by [`get_config_value`] and [`set_config_value`]
pub const CONFIG_KEYS: &[&str] = &[
    "apiUrl",
    "requestTimeout",
    "refreshInterval",
    "defaultNamespace",
    "search.threshold",
    "ui.enableMouse",
    "ui.noIcons",
];

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &schema::Config, key: &str) -> anyhow::Result<String> {
    match key {
        "apiUrl" => Ok(config.api_url.clone()),
        "requestTimeout" => Ok(config.request_timeout.clone()),
        "refreshInterval" => Ok(config.refresh_interval.clone()),
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "search.threshold" => Ok(config.search.threshold.to_string()),
        "ui.enableMouse" => Ok(config.ui.enable_mouse.to_string()),
        "ui.noIcons" => Ok(config.ui.no_icons.to_string()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut schema::Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "apiUrl" => {
            url::Url::parse(value).context("apiUrl must be an absolute URL")?;
            config.api_url = value.to_string();
        }
        "requestTimeout" => {
            loader::parse_request_timeout(value)
                .context("requestTimeout must be a non-zero duration like '10s' or '500ms'")?;
            config.request_timeout = value.to_string();
        }
        "refreshInterval" => {
            crate::source::parse_duration(value)
                .context("refreshInterval must be a duration like '30s' ('0s' disables)")?;
            config.refresh_interval = value.to_string();
        }
        "defaultNamespace" => {
            config.default_namespace = value.to_string();
        }
        "search.threshold" => {
            let threshold: f64 = value
                .parse()
                .context("search.threshold must be a number")?;
            loader::check_threshold(threshold)?;
            config.search.threshold = threshold;
        }
        "ui.enableMouse" => {
            config.ui.enable_mouse = value
                .parse()
                .context("ui.enableMouse must be 'true' or 'false'")?;
        }
        "ui.noIcons" => {
            config.ui.no_icons = value
                .parse()
                .context("ui.noIcons must be 'true' or 'false'")?;
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}
