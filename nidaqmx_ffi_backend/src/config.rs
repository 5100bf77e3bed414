//! Settings of the native interpreter, loaded from TOML.
//!
//! ```toml
//! # Append every driver error to this file. Omit to disable.
//! error_log = "nidaqmx_error.logs"
//! # How many times a string or array read is re-probed when the value grows
//! # between the sizing call and the fill call.
//! max_buffer_retries = 8
//! # Use DAQmxGetExtendedErrorInfo instead of DAQmxGetErrorString.
//! extended_error_info = true
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ERROR_LOG: &str = "nidaqmx_error.logs";
pub const DEFAULT_MAX_BUFFER_RETRIES: u32 = 8;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NativeConfig {
    pub error_log: Option<PathBuf>,
    pub max_buffer_retries: u32,
    pub extended_error_info: bool,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            error_log: Some(PathBuf::from(DEFAULT_ERROR_LOG)),
            max_buffer_retries: DEFAULT_MAX_BUFFER_RETRIES,
            extended_error_info: true,
        }
    }
}

impl NativeConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// A configuration that keeps driver errors out of the filesystem.
    pub fn without_error_log() -> Self {
        Self {
            error_log: None,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_buffer_retries == 0 {
            return Err(ConfigError::Invalid(
                "max_buffer_retries must be at least 1".to_string(),
            ));
        }
        if matches!(&self.error_log, Some(path) if path.as_os_str().is_empty()) {
            return Err(ConfigError::Invalid("error_log must not be empty".to_string()));
        }
        Ok(())
    }
}
