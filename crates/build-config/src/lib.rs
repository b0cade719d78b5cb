//! # G722-Build-Config: Build Configuration for the G.722 Bindings
//!
//! Decides which artifacts to compile and how:
//!
//! - **Build mode**: debug or production, from `LIBG722_BUILD_MODE` or,
//!   in `auto`, from how the checkout relates to its release tag
//! - **Package variant**: core codec or ndarray add-on, from
//!   `LIBG722_PACKAGE_VARIANT` or installed package metadata
//! - **Extension descriptors**: per-artifact flags for the Rust toolchain
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use g722_build_config::{BuildEnv, BuildPlan, GitCli, TargetPlatform};
//!
//! let plan = BuildPlan::resolve(
//!     &BuildEnv::from_env(),
//!     &GitCli::new(),
//!     Path::new("."),
//!     "0.1.0",
//!     TargetPlatform::host(),
//! )?;
//! for ext in &plan.extensions {
//!     println!("{}: {}", ext.name, ext.rustflags());
//! }
//! # Ok::<(), g722_build_config::BuildError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod descriptor;
pub mod env;
pub mod error;
pub mod metadata;
pub mod mode;
pub mod variant;
pub mod vcs;

pub use config::{BuildConfiguration, BuildPlan};
pub use descriptor::{
    ArtifactFlavor, ExtensionDescriptor, ExtensionDescriptorBuilder, SourceLayout, TargetPlatform,
};
pub use env::BuildEnv;
pub use error::{BuildError, Result};
pub use metadata::PackageMetadata;
pub use mode::{BuildMode, BuildModeSetting, release_tag, resolve_build_mode};
pub use variant::{PackageVariant, resolve_variant};
pub use vcs::{GitCli, TreeState, VersionControl};
