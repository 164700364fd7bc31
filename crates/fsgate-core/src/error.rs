//! Error types for fsgate-core

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for fsgate-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fsgate-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is missing or holds an invalid value
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },

    /// I/O error tied to a specific file
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File that was being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// TOML could not be parsed into a configuration
    #[error("Failed to parse configuration: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Configuration could not be rendered as TOML
    #[error("Failed to serialize configuration: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wraps an I/O error with the path it happened on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
