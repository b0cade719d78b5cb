//! Package variant resolution

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::env::PACKAGE_VARIANT_ENV;
use crate::error::{BuildError, Result};
use crate::metadata::PackageMetadata;

/// Which installable artifact is being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PackageVariant {
    /// The codec itself
    #[serde(rename = "core")]
    Core,
    /// The accelerated-container add-on
    #[serde(rename = "numpy-addon")]
    NumpyAddon,
}

impl PackageVariant {
    /// Base name of the compiled extension module
    pub fn artifact_name(self) -> &'static str {
        match self {
            Self::Core => "g722",
            Self::NumpyAddon => "g722_numpy",
        }
    }

    /// Map a normalized package name to a variant
    pub fn from_package_name(name: &str) -> Option<Self> {
        match name {
            "g722" | "g722-codec-core" => Some(Self::Core),
            "g722-numpy" | "g722-ndarray" | "g722-numpy-addon" => Some(Self::NumpyAddon),
            _ => None,
        }
    }
}

impl FromStr for PackageVariant {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "core" | "main" | "base" => Ok(Self::Core),
            "numpy-addon" | "numpy_addon" | "addon" | "numpy" => Ok(Self::NumpyAddon),
            _ => Err(BuildError::configuration(
                PACKAGE_VARIANT_ENV,
                s,
                "core, numpy-addon",
            )),
        }
    }
}

impl fmt::Display for PackageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::NumpyAddon => write!(f, "numpy-addon"),
        }
    }
}

/// Resolve the variant: explicit override, then installed metadata, then core
pub fn resolve_variant(
    explicit: Option<PackageVariant>,
    metadata: Option<&PackageMetadata>,
) -> PackageVariant {
    if let Some(variant) = explicit {
        debug!(%variant, "Package variant from override");
        return variant;
    }

    if let Some(meta) = metadata {
        let name = meta.normalized_name();
        match PackageVariant::from_package_name(&name) {
            Some(variant) => {
                debug!(%variant, package = %name, "Package variant from metadata");
                return variant;
            }
            None => debug!(package = %name, "Unrecognized package name, using default"),
        }
    }

    PackageVariant::Core
}
