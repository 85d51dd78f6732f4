mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./moviebrowser.toml",
        "~/.config/moviebrowser/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let catalog = &config.catalog;
    if catalog.api_key.is_empty() {
        tracing::warn!("No catalog API key configured; requests will be rejected upstream");
    }
    if catalog.api_base_url.trim().is_empty() {
        anyhow::bail!("catalog.api_base_url cannot be empty");
    }
    if catalog.image_base_url.trim().is_empty() {
        anyhow::bail!("catalog.image_base_url cannot be empty");
    }
    if catalog.requests_per_second == 0 {
        anyhow::bail!("catalog.requests_per_second must be at least 1");
    }
    if catalog.timeout_secs == 0 {
        anyhow::bail!("catalog.timeout_secs must be at least 1");
    }

    let browse = &config.browse;
    if browse.initial_pages == 0 {
        anyhow::bail!("browse.initial_pages must be at least 1");
    }
    if browse.search_max_pages == 0 {
        anyhow::bail!("browse.search_max_pages must be at least 1");
    }
    if browse.max_concurrency == 0 {
        anyhow::bail!("browse.max_concurrency must be at least 1");
    }

    Ok(())
}
