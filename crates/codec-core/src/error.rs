//! Error handling for the codec binding layer
//!
//! Every failure a caller can observe falls into one of four kinds:
//! configuration, type mismatch, framing, and an unavailable runtime
//! backend. None of them leave partial output behind.

#![allow(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Error type for session construction, encoding and decoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Invalid sample rate / bit rate / preference value
    #[error("Invalid {field}: {value} (expected {expected})")]
    Configuration {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Input value has a representation the adapter does not accept
    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    /// Input length does not align to the codec block granularity
    #[error("Framing error: {actual} {unit} is not a multiple of {multiple}")]
    Framing {
        unit: &'static str,
        actual: usize,
        multiple: usize,
    },

    /// The accelerated numeric backend was requested but is not available
    #[error("Runtime unavailable: {backend} backend is not available in this build")]
    RuntimeUnavailable { backend: &'static str },
}

impl CodecError {
    /// Create a new configuration error
    pub fn configuration(
        field: &'static str,
        value: impl fmt::Display,
        expected: &'static str,
    ) -> Self {
        Self::Configuration {
            field,
            value: value.to_string(),
            expected,
        }
    }

    /// Create a new type mismatch error
    pub fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected,
            found: found.into(),
        }
    }

    /// Create a new framing error
    pub fn framing(unit: &'static str, actual: usize, multiple: usize) -> Self {
        Self::Framing {
            unit,
            actual,
            multiple,
        }
    }

    /// Create a new runtime unavailable error for the accelerated backend
    pub fn accelerated_unavailable() -> Self {
        Self::RuntimeUnavailable { backend: "ndarray" }
    }

    /// Check if this error is recoverable
    ///
    /// Configuration and availability problems are fixed for the lifetime
    /// of a session; type and framing errors only concern one call.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Configuration { .. } | Self::RuntimeUnavailable { .. } => false,
            Self::TypeMismatch { .. } | Self::Framing { .. } => true,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::TypeMismatch { .. } => ErrorCategory::Type,
            Self::Framing { .. } => ErrorCategory::Value,
            Self::RuntimeUnavailable { .. } => ErrorCategory::Runtime,
        }
    }
}

/// Error category, mirroring how a host environment reports the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Invalid construction parameters
    Configuration,
    /// Unsupported input representation
    Type,
    /// Well-typed input with an unusable value (length)
    Value,
    /// Missing optional backend
    Runtime,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "Configuration"),
            Self::Type => write!(f, "Type"),
            Self::Value => write!(f, "Value"),
            Self::Runtime => write!(f, "Runtime"),
        }
    }
}
