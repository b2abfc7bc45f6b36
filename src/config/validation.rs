//! Configuration validation module
//!
//! This module provides validation functions for client configuration
//! to ensure all required settings are properly configured.

use url::Url;
use crate::utils::errors::{CampaignHubError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_query_config(&settings.query)?;
    validate_logging_config(&settings.logging)?;
    Ok(())
}

/// Validate backend API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(CampaignHubError::Config(
            "API base URL is required".to_string()
        ));
    }

    Url::parse(&config.base_url).map_err(|e| {
        CampaignHubError::Config(format!("API base URL is not a valid URL: {}", e))
    })?;

    if config.timeout_seconds == 0 {
        return Err(CampaignHubError::Config(
            "API timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate list query configuration
fn validate_query_config(config: &super::QueryConfig) -> Result<()> {
    if config.default_limit == 0 {
        return Err(CampaignHubError::Config(
            "Default page size must be greater than 0".to_string()
        ));
    }

    if config.search_debounce_ms == 0 || config.limit_debounce_ms == 0 {
        return Err(CampaignHubError::Config(
            "Debounce windows must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(CampaignHubError::Config(
            "Logging level is required".to_string()
        ));
    }

    if config.file_path.is_empty() {
        return Err(CampaignHubError::Config(
            "Logging file path is required".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn rejects_malformed_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn rejects_zero_page_size() {
        let mut settings = Settings::default();
        settings.query.default_limit = 0;
        assert!(validate_settings(&settings).is_err());
    }
}
