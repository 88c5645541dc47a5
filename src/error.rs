use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rls-config operations
///
/// Loading a snapshot never fails; these errors come from reading settings
/// files on the host side and from the command line front end.
#[derive(Debug, Error)]
pub enum RlsConfigError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to parse settings file {}: {message}", .path.display())]
    SettingsParse { path: PathBuf, message: String },

    #[error("Failed to read settings file {}: {source}", .path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl RlsConfigError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn settings_parse<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::SettingsParse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn settings_read<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::SettingsRead {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type alias for rls-config operations
pub type Result<T> = std::result::Result<T, RlsConfigError>;
