//! Startup orchestration.
//!
//! # Responsibilities
//! - Merge the config file with command-line overrides
//! - Validate the result
//! - Check that the input file exists before any request is served

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::loader::{read_config, ConfigError};
use crate::config::{validate_config, ServiceConfig};

/// Fatal startup errors.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot find input file: {}", .0.display())]
    MissingInput(PathBuf),
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl Overrides {
    pub fn apply(self, config: &mut ServiceConfig) {
        if let Some(input) = self.input {
            config.dataset.path = Some(input);
        }
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
    }
}

/// Build the final configuration and check the startup preconditions.
pub fn prepare(config_path: Option<&Path>, overrides: Overrides) -> Result<ServiceConfig, StartupError> {
    let mut config = match config_path {
        Some(path) => read_config(path)?,
        None => ServiceConfig::default(),
    };
    overrides.apply(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;
    if let Some(path) = &config.dataset.path {
        ensure_input_exists(path)?;
    }

    Ok(config)
}

/// Fail unless `path` exists.
pub fn ensure_input_exists(path: &Path) -> Result<(), StartupError> {
    if path.exists() {
        Ok(())
    } else {
        Err(StartupError::MissingInput(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_win() {
        let input = std::env::temp_dir().join(format!("flight_query_startup_{}.jsonl", std::process::id()));
        std::fs::write(&input, "").unwrap();

        let config = prepare(
            None,
            Overrides {
                input: Some(input.clone()),
                host: Some("0.0.0.0".into()),
                port: Some(8181),
            },
        )
        .unwrap();

        assert_eq!(config.dataset.path, Some(input.clone()));
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8181");

        std::fs::remove_file(&input).unwrap_or_default();
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let err = prepare(
            None,
            Overrides {
                input: Some(PathBuf::from("/nonexistent/flights.jsonl")),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, StartupError::MissingInput(_)));
    }

    #[test]
    fn test_input_required() {
        match prepare(None, Overrides::default()) {
            Err(StartupError::Config(ConfigError::Validation(errors))) => {
                assert_eq!(errors, vec![crate::config::ValidationError::MissingDatasetPath]);
            }
            other => panic!("expected missing dataset path, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_override_rejected() {
        let err = prepare(
            None,
            Overrides {
                port: Some(0),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
    }
}
