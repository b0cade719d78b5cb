//! Build configuration resolution
//!
//! A pure function over the environment, a version-control probe and the
//! repository directory. Nothing here reads process state directly.

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::descriptor::{ExtensionDescriptor, ExtensionDescriptorBuilder, SourceLayout, TargetPlatform};
use crate::env::BuildEnv;
use crate::error::Result;
use crate::metadata::PackageMetadata;
use crate::mode::{BuildMode, resolve_build_mode};
use crate::variant::{PackageVariant, resolve_variant};
use crate::vcs::VersionControl;

/// Resolved mode and variant for one build invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BuildConfiguration {
    /// Debug or production
    pub mode: BuildMode,
    /// Core codec or add-on
    pub variant: PackageVariant,
    /// Include the ndarray backend in the core package
    pub with_ndarray: bool,
}

impl BuildConfiguration {
    /// Resolve the configuration
    ///
    /// Installed metadata is only read when no variant override is set.
    ///
    /// # Errors
    ///
    /// Fails on invalid environment overrides and on unreadable metadata.
    pub fn resolve<V>(env: &BuildEnv, vcs: &V, repo_dir: &Path, version: &str) -> Result<Self>
    where
        V: VersionControl + ?Sized,
    {
        let setting = env.build_mode_setting()?;
        let explicit = env.variant_override()?;

        let metadata = match explicit {
            Some(_) => None,
            None => PackageMetadata::probe(repo_dir)?,
        };

        let config = Self {
            mode: resolve_build_mode(setting, vcs, repo_dir, version),
            variant: resolve_variant(explicit, metadata.as_ref()),
            with_ndarray: !env.no_ndarray,
        };

        debug!(
            mode = %config.mode,
            variant = %config.variant,
            with_ndarray = config.with_ndarray,
            "Resolved build configuration"
        );
        Ok(config)
    }
}

/// Everything a build invocation needs, ready to print
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    /// Declared package version
    pub version: String,
    /// Release tag the version maps to
    pub release_tag: String,
    /// Target platform
    pub platform: TargetPlatform,
    /// Resolved configuration
    pub configuration: BuildConfiguration,
    /// Artifacts to compile
    pub extensions: Vec<ExtensionDescriptor>,
}

impl BuildPlan {
    /// Resolve the configuration and build the descriptors
    ///
    /// # Errors
    ///
    /// Same as [`BuildConfiguration::resolve`].
    pub fn resolve<V>(
        env: &BuildEnv,
        vcs: &V,
        repo_dir: &Path,
        version: &str,
        platform: TargetPlatform,
    ) -> Result<Self>
    where
        V: VersionControl + ?Sized,
    {
        let configuration = BuildConfiguration::resolve(env, vcs, repo_dir, version)?;
        let extensions = ExtensionDescriptorBuilder::new(
            configuration,
            platform,
            SourceLayout::from_repo_dir(repo_dir),
        )
        .build();

        Ok(Self {
            version: version.to_string(),
            release_tag: crate::mode::release_tag(version),
            platform,
            configuration,
            extensions,
        })
    }

    /// Pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Fails only if a path is not valid UTF-8.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
