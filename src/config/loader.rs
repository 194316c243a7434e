//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::Config;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("trade-responder-{}.toml", std::process::id()));
        fs::write(&path, "[responder]\nresend_interval_ms = 50\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.responder.resend_interval_ms, 50);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn validation_errors_are_joined() {
        let err = parse_config("[responder]\nresend_interval_ms = 0\n[escalation]\ncapacity = 0\n")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: responder.resend_interval_ms must be greater than zero, \
             escalation.capacity must be greater than zero"
        );
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = parse_config("[responder\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
