//! Startup configuration loader for the chat relay.
//!
//! Reads an optional TOML file into [`RelayConfig`], then applies environment
//! overrides (`ALLOWED_ORIGINS`, `OPENAI_API_KEY`, `OPENAI_BASE_URL`,
//! `SYSTEM_MESSAGE`, `OPENAI_MODEL`, `REQUEST_TIMEOUT_SECS`,
//! `CHAT_LOG_DATABASE_URL`). The result is read once and never changes.

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use chatrelay_types::config::{RelayConfig, parse_origin_list};
use chatrelay_types::error::ConfigError;

pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_SYSTEM_MESSAGE: &str = "SYSTEM_MESSAGE";
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const ENV_CHAT_LOG_URL: &str = "CHAT_LOG_DATABASE_URL";

/// On-disk shape: relay settings plus the credential.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(flatten)]
    relay: RelayConfig,
    #[serde(default)]
    api_key: Option<String>,
}

/// Fully resolved startup configuration.
#[derive(Debug)]
pub struct LoadedConfig {
    pub relay: RelayConfig,
    pub api_key: Option<SecretString>,
}

impl LoadedConfig {
    /// Split into relay settings and the credential, which serving requires.
    pub fn into_parts(self) -> Result<(RelayConfig, SecretString), ConfigError> {
        let api_key = self
            .api_key
            .ok_or_else(|| ConfigError::Missing(ENV_API_KEY.to_string()))?;
        Ok((self.relay, api_key))
    }
}

/// Load configuration from `path` (if given) and the process environment.
///
/// - A missing file yields defaults.
/// - An unreadable or unparsable file is an error.
/// - Environment variables override file values; empty variables are ignored.
pub async fn load_relay_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let file = match path {
        Some(path) => read_config_file(path).await?,
        None => ConfigFile::default(),
    };

    apply_env_overrides(file, |key| std::env::var(key).ok())
}

async fn read_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(ConfigFile::default());
        }
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })
}

fn apply_env_overrides(
    file: ConfigFile,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<LoadedConfig, ConfigError> {
    let mut config = file.relay;
    let mut api_key = file.api_key.map(SecretString::from);
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(origins) = var(ENV_ALLOWED_ORIGINS) {
        config.allowed_origins = parse_origin_list(&origins);
    }
    if let Some(key) = var(ENV_API_KEY) {
        api_key = Some(SecretString::from(key));
    }
    if let Some(base_url) = var(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    if let Some(system_message) = var(ENV_SYSTEM_MESSAGE) {
        config.system_message = system_message;
    }
    if let Some(model) = var(ENV_MODEL) {
        config.model = model;
    }
    if let Some(timeout) = var(ENV_TIMEOUT_SECS) {
        config.timeout_secs =
            timeout
                .trim()
                .parse()
                .map_err(|e: std::num::ParseIntError| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS.to_string(),
                    message: e.to_string(),
                })?;
    }
    if let Some(url) = var(ENV_CHAT_LOG_URL) {
        config.chat_log_url = Some(url);
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: "timeout_secs".to_string(),
            message: "must be at least 1 second".to_string(),
        });
    }

    Ok(LoadedConfig {
        relay: config,
        api_key,
    })
}
