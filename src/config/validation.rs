use crate::config::types::{Config, HarvestConfig, RemoteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
///
/// Called by the loader and again by the binary after command-line overrides
/// have been applied.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_remote_config(&config.remote)?;
    validate_harvest_config(&config.harvest)?;
    Ok(())
}

/// Validates remote service configuration
fn validate_remote_config(config: &RemoteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "Endpoint '{}' must use http or https",
            config.endpoint
        )));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1 when set".to_string(),
        ));
    }

    if let Some(user_agent) = &config.user_agent {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user_agent cannot be blank when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates harvest behavior configuration
fn validate_harvest_config(config: &HarvestConfig) -> Result<(), ConfigError> {
    // A zero page size never yields a short page, so the loop could not end
    if config.page_size < 1 {
        return Err(ConfigError::Validation(format!(
            "page_size must be >= 1, got {}",
            config.page_size
        )));
    }

    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    if config.max_pages_per_grouping == Some(0) {
        return Err(ConfigError::Validation(
            "max_pages_per_grouping must be >= 1 when set".to_string(),
        ));
    }

    if config.sort_field.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sort_field cannot be empty".to_string(),
        ));
    }

    Ok(())
}
