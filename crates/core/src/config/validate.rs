use super::{Config, ConfigError};

/// Validate a loaded configuration before the service starts.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must be non-zero".to_string(),
        ));
    }

    let base = &config.source.base_url;
    if !base.starts_with("http://") && !base.starts_with("https://") {
        return Err(ConfigError::ValidationError(format!(
            "source.base_url must be an http(s) URL, got '{}'",
            base
        )));
    }
    if base.ends_with('/') {
        return Err(ConfigError::ValidationError(
            "source.base_url must not have a trailing slash".to_string(),
        ));
    }

    if config.source.download_host.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "source.download_host must not be empty".to_string(),
        ));
    }

    if config.browser.max_sessions == 0 {
        return Err(ConfigError::ValidationError(
            "browser.max_sessions must be at least 1".to_string(),
        ));
    }

    Ok(())
}
