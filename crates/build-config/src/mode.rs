//! Build mode resolution
//!
//! An explicit setting wins. `auto` treats any divergence from the
//! release tag of the declared version as a development build.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::env::BUILD_MODE_ENV;
use crate::error::{BuildError, Result};
use crate::vcs::{TreeState, VersionControl};

/// Requested build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildModeSetting {
    /// Decide from version-control state
    #[default]
    Auto,
    /// Always debug
    Debug,
    /// Always production
    Production,
}

impl FromStr for BuildModeSetting {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "debug" | "dev" => Ok(Self::Debug),
            "production" | "prod" | "release" => Ok(Self::Production),
            _ => Err(BuildError::configuration(
                BUILD_MODE_ENV,
                s,
                "auto, debug, production",
            )),
        }
    }
}

/// Resolved build mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Unoptimized, full debug info
    Debug,
    /// Optimized
    Production,
}

impl BuildMode {
    /// Is this the debug mode?
    pub fn is_debug(self) -> bool {
        self == Self::Debug
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Release tag for a version
pub fn release_tag(version: &str) -> String {
    format!("v{}", version)
}

/// Resolve a setting to a concrete mode
///
/// Version control is only consulted for `auto`.
pub fn resolve_build_mode<V>(
    setting: BuildModeSetting,
    vcs: &V,
    repo_dir: &Path,
    version: &str,
) -> BuildMode
where
    V: VersionControl + ?Sized,
{
    let mode = match setting {
        BuildModeSetting::Debug => BuildMode::Debug,
        BuildModeSetting::Production => BuildMode::Production,
        BuildModeSetting::Auto => {
            let tag = release_tag(version);
            let state = vcs.tree_state(repo_dir, &tag);
            debug!(%tag, ?state, "Checked working tree against release tag");
            match state {
                TreeState::NotARepository | TreeState::Clean => BuildMode::Production,
                TreeState::TagMissing | TreeState::Diverged => BuildMode::Debug,
            }
        }
    };

    debug!(?setting, %mode, "Resolved build mode");
    mode
}
