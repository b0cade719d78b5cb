//! Error types for build configuration

use std::path::PathBuf;

use thiserror::Error;

/// Result type for build configuration
pub type Result<T> = std::result::Result<T, BuildError>;

/// Errors raised while resolving a build configuration
#[derive(Error, Debug)]
pub enum BuildError {
    /// An environment override holds an unsupported value
    #[error("Invalid {var}={value:?}. Expected one of: {expected}")]
    Configuration {
        /// Environment variable name
        var: &'static str,
        /// Offending value
        value: String,
        /// Accepted values
        expected: &'static str,
    },

    /// Installed package metadata could not be understood
    #[error("Invalid package metadata in {}: {reason}", .path.display())]
    Metadata {
        /// File that was read
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// A metadata file exists but could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

impl BuildError {
    /// Create a new configuration error
    pub fn configuration(var: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self::Configuration {
            var,
            value: value.into(),
            expected,
        }
    }

    /// Create a new metadata error
    pub fn metadata(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Metadata {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
