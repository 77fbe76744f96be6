//! Configuration validation.

use super::app_config::{AppConfig, SHEET_HARD_CAP};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("SERVER_PORT must be non-zero")]
    InvalidPort,

    #[error("PUBLIC_BASE_URL must start with http:// or https:// (got '{0}')")]
    InvalidBaseUrl(String),

    #[error("MAX_LABELS_PER_SHEET must be between 1 and {SHEET_HARD_CAP} (got {0})")]
    InvalidSheetCap(usize),
}

/// Validate a loaded configuration before the server starts.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server_port == 0 {
        return Err(ConfigError::InvalidPort);
    }
    if !config.public_base_url.starts_with("http://")
        && !config.public_base_url.starts_with("https://")
    {
        return Err(ConfigError::InvalidBaseUrl(config.public_base_url.clone()));
    }
    if config.max_labels_per_sheet == 0 || config.max_labels_per_sheet > SHEET_HARD_CAP {
        return Err(ConfigError::InvalidSheetCap(config.max_labels_per_sheet));
    }
    Ok(())
}
