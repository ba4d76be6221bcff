//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{bounded, ConfigError, Error, Result};

use super::RackConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use solar_rack::load_config;
///
/// let config = load_config("rack.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RackConfig> {
    let content = fs::read_to_string(path.as_ref())
        .map_err(|e| Error::Config(ConfigError::IoError(bounded(&e.to_string()))))?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<RackConfig> {
    let config: RackConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(bounded(e.message()))))?;

    super::validation::validate_config(&config)?;

    Ok(config)
}
