use crate::config::Config;
use crate::ConfigError;

/// Validates the entire configuration
///
/// Runs before any rendering begins; a degenerate concurrency limit or an
/// unusable seed URL must never reach the worker pool.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_concurrency(config.concurrency)?;
    validate_seed_url(config)?;
    validate_paths(config)?;
    Ok(())
}

/// Validates the concurrency limit
fn validate_concurrency(concurrency: usize) -> Result<(), ConfigError> {
    if concurrency < 1 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be at least 1, got {}",
            concurrency
        )));
    }

    if concurrency > 32 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be at most 32, got {}",
            concurrency
        )));
    }

    Ok(())
}

/// Validates the seed URL scheme and host
fn validate_seed_url(config: &Config) -> Result<(), ConfigError> {
    let scheme = config.seed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed URL must use http or https, got '{}'",
            scheme
        )));
    }

    if config.seed_url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "seed URL has no host: {}",
            config.seed_url
        )));
    }

    Ok(())
}

/// Validates output and working-directory paths
fn validate_paths(config: &Config) -> Result<(), ConfigError> {
    if config.work_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "working directory path cannot be empty".to_string(),
        ));
    }

    if config.output_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
