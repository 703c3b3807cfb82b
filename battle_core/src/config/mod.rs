//! Configuration loading from TOML files

mod roster;

pub use roster::{load_roster, parse_roster, EntityTemplate, Roster, RosterConfig};

use crate::entity::EntityError;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
    #[error("Invalid entity: {0}")]
    EntityError(#[from] EntityError),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Deserialize a TOML string
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityOptions;

    #[test]
    fn test_missing_file_is_io_error() {
        let result: Result<EntityOptions, _> = load_toml(Path::new("/nonexistent/roster.toml"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result: Result<EntityOptions, _> = parse_toml("max_health = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_entity_error_converts() {
        let err: ConfigError = EntityError::InvalidMaxHealth(0.0).into();
        assert!(err.to_string().contains("greater than 0"));
    }
}
