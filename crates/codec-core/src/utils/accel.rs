//! Accelerated backend detection
//!
//! The accelerated container is available when the `ndarray` feature is
//! compiled in and `LIBG722_DISABLE_ACCEL` does not switch it off. The
//! environment is read once per process.

use std::sync::OnceLock;

/// Environment variable that disables the accelerated backend
pub const DISABLE_ACCEL_ENV: &str = "LIBG722_DISABLE_ACCEL";

/// Backend capabilities a session is constructed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Accelerated (ndarray) containers can be read and produced
    pub accelerated: bool,
}

/// Global capability detection
static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Initialize capability detection
pub fn init_capabilities() {
    CAPABILITIES.get_or_init(detect_capabilities);
}

fn detect_capabilities() -> Capabilities {
    let caps = Capabilities::from_lookup(|key| std::env::var(key).ok());
    tracing::debug!(accelerated = caps.accelerated, "Detected backend capabilities");
    caps
}

impl Capabilities {
    /// Process-wide capabilities, detected on first use
    pub fn detect() -> Self {
        *CAPABILITIES.get_or_init(detect_capabilities)
    }

    /// Detect capabilities through an injected environment lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let disabled = lookup(DISABLE_ACCEL_ENV).is_some_and(|v| is_truthy(&v));
        Self::with_accelerated(!disabled)
    }

    /// Capabilities with the accelerated backend requested on or off
    ///
    /// Requesting it on has no effect when the `ndarray` feature is not
    /// compiled in.
    pub fn with_accelerated(accelerated: bool) -> Self {
        Self {
            accelerated: accelerated && cfg!(feature = "ndarray"),
        }
    }

    /// Capabilities of a minimal installation
    pub fn simple_only() -> Self {
        Self { accelerated: false }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
