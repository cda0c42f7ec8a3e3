//! Input validation for configuration values

use crate::error::{CliError, ConfigError};

const MAX_TIMEOUT_SECS: u64 = 600;

/// Validate that a URL is properly formatted
pub fn validate_url(url: &str) -> crate::Result<()> {
    if url.is_empty() {
        return Err(CliError::InvalidArguments("URL cannot be empty".to_string()).into());
    }

    // Basic URL validation - must start with http:// or https://
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(CliError::InvalidArguments(format!(
            "Invalid URL '{}': URL must start with http:// or https://",
            url
        ))
        .into());
    }

    Ok(())
}

/// Validate a request timeout in seconds
pub fn validate_timeout(timeout_secs: u64) -> crate::Result<()> {
    if timeout_secs == 0 || timeout_secs > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidValue {
            field: "timeout_seconds".to_string(),
            value: timeout_secs.to_string(),
            reason: format!("must be between 1 and {}", MAX_TIMEOUT_SECS),
        }
        .into());
    }

    Ok(())
}
