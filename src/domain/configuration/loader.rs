//! Configuration loading from `portfolio.toml` and the environment.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{AppConfig, AppError};

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "portfolio.toml";

/// Comma-separated API keys; replaces `[market].api_keys` when set.
pub const API_KEYS_ENV: &str = "PORTFOLIO_API_KEYS";

/// Overrides `[market].base_url` when set.
pub const BASE_URL_ENV: &str = "PORTFOLIO_BASE_URL";

/// Load configuration from an explicit path, or from `./portfolio.toml` when it
/// exists, falling back to defaults. Environment overrides are applied last.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = match resolve_config_path(explicit)? {
        Some(path) => {
            let content = fs::read_to_string(&path).map_err(|err| {
                AppError::InvalidConfig(format!("cannot read {}: {}", path.display(), err))
            })?;
            parse_config_content(&content)?
        }
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, AppError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(AppError::InvalidConfig(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
    Ok(default_path.is_file().then_some(default_path))
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Apply environment overrides using the given variable lookup.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), AppError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(API_KEYS_ENV) {
        let keys: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        if !keys.is_empty() {
            config.market.api_keys = keys;
        }
    }

    if let Some(raw) = lookup(BASE_URL_ENV)
        && !raw.trim().is_empty()
    {
        config.market.base_url = url::Url::parse(raw.trim()).map_err(|err| {
            AppError::InvalidConfig(format!("{BASE_URL_ENV} is not a valid URL: {err}"))
        })?;
    }

    Ok(())
}
