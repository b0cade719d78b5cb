//! Extension descriptors
//!
//! Compiler and linker configuration for each artifact, as a pure
//! function of the resolved configuration, the target platform and the
//! source layout. Every build produces a primary artifact and a
//! `_debug`-suffixed one so both flavors can be installed side by side.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::config::BuildConfiguration;
use crate::error::{BuildError, Result};
use crate::mode::BuildMode;
use crate::variant::PackageVariant;

/// `--cfg` flag set on the debug-suffixed artifact
pub const DEBUG_MODULE_CFG: &str = "g722_debug_mod";

/// Cargo package every artifact is built from
pub const CORE_PACKAGE: &str = "g722-codec-core";

/// Operating-system family of the build target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    /// Linux and other ELF targets using GNU ld-compatible linkers
    Linux,
    /// macOS
    MacOs,
    /// Windows
    Windows,
    /// Anything else
    Other,
}

impl TargetPlatform {
    /// Platform this crate was compiled for
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Link-time optimization is applied
    pub fn supports_lto(self) -> bool {
        self != Self::Windows
    }

    /// A linker version script restricts exported symbols
    pub fn supports_symbol_map(self) -> bool {
        !matches!(self, Self::Windows | Self::MacOs)
    }
}

impl FromStr for TargetPlatform {
    type Err = BuildError;

    /// Accepts Rust target triples (`x86_64-pc-windows-msvc`) and host
    /// platform tags (`win-amd64`, `macosx-14.0-arm64`, `linux-x86_64`)
    fn from_str(s: &str) -> Result<Self> {
        let target = s.trim().to_ascii_lowercase();
        if target.is_empty() {
            return Err(BuildError::configuration("target", s, "a target triple or platform tag"));
        }

        let platform = if target.starts_with("win") || target.contains("-windows") {
            Self::Windows
        } else if target.starts_with("macosx") || target.contains("-apple-darwin") {
            Self::MacOs
        } else if target.starts_with("linux") || target.contains("-linux") {
            Self::Linux
        } else {
            Self::Other
        };
        Ok(platform)
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::MacOs => write!(f, "macos"),
            Self::Windows => write!(f, "windows"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Where the extension sources live
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLayout {
    /// Manifest of the package to build
    pub manifest_path: PathBuf,
    /// Linker version script listing exported symbols
    pub symbol_map: PathBuf,
}

impl SourceLayout {
    /// Standard layout under a workspace checkout
    pub fn from_repo_dir(repo_dir: &Path) -> Self {
        let crate_dir = repo_dir.join("crates").join("codec-core");
        Self {
            manifest_path: crate_dir.join("Cargo.toml"),
            symbol_map: crate_dir.join("symbols.map"),
        }
    }
}

/// Primary or debug-suffixed artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFlavor {
    /// The artifact as configured
    Primary,
    /// Side-by-side debug build
    Debug,
}

/// Compiler and linker configuration for one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionDescriptor {
    /// Artifact name
    pub name: String,
    /// Cargo package
    pub package: String,
    /// Manifest path
    pub manifest_path: PathBuf,
    /// Artifact flavor
    pub flavor: ArtifactFlavor,
    /// Cargo features to enable (default features are always off)
    pub features: Vec<String>,
    /// `--cfg` names
    pub cfgs: Vec<String>,
    /// Code generation flags
    pub compile_args: Vec<String>,
    /// Linker flags
    pub link_args: Vec<String>,
}

impl ExtensionDescriptor {
    /// All flags in `RUSTFLAGS` form
    pub fn rustflags(&self) -> String {
        let mut flags: Vec<String> = self.cfgs.iter().map(|c| format!("--cfg {}", c)).collect();
        flags.extend(self.compile_args.iter().cloned());
        flags.extend(self.link_args.iter().cloned());
        flags.join(" ")
    }

    /// Cargo feature list as passed to `--features`
    pub fn features_arg(&self) -> String {
        self.features.join(",")
    }
}

/// Builds the descriptors for one configuration
#[derive(Debug, Clone)]
pub struct ExtensionDescriptorBuilder {
    config: BuildConfiguration,
    platform: TargetPlatform,
    layout: SourceLayout,
}

impl ExtensionDescriptorBuilder {
    /// Create a builder
    pub fn new(config: BuildConfiguration, platform: TargetPlatform, layout: SourceLayout) -> Self {
        Self {
            config,
            platform,
            layout,
        }
    }

    /// Primary descriptor followed by the debug-suffixed one
    pub fn build(&self) -> Vec<ExtensionDescriptor> {
        vec![
            self.descriptor(ArtifactFlavor::Primary),
            self.descriptor(ArtifactFlavor::Debug),
        ]
    }

    fn descriptor(&self, flavor: ArtifactFlavor) -> ExtensionDescriptor {
        let base = self.config.variant.artifact_name();
        let name = match flavor {
            ArtifactFlavor::Primary => base.to_string(),
            ArtifactFlavor::Debug => format!("{}_debug", base),
        };

        let mut cfgs = Vec::new();
        if flavor == ArtifactFlavor::Debug {
            cfgs.push(DEBUG_MODULE_CFG.to_string());
        }

        ExtensionDescriptor {
            name,
            package: CORE_PACKAGE.to_string(),
            manifest_path: self.layout.manifest_path.clone(),
            flavor,
            features: self.features(),
            cfgs,
            compile_args: self.compile_args(),
            link_args: self.link_args(),
        }
    }

    fn features(&self) -> Vec<String> {
        let with_ndarray = match self.config.variant {
            PackageVariant::Core => self.config.with_ndarray,
            PackageVariant::NumpyAddon => true,
        };
        if with_ndarray {
            vec!["ndarray".to_string()]
        } else {
            Vec::new()
        }
    }

    fn compile_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.platform.supports_lto() {
            args.push("-Clto=fat".to_string());
        }
        match self.config.mode {
            BuildMode::Debug => {
                args.push("-Copt-level=0".to_string());
                args.push("-Cdebuginfo=2".to_string());
            }
            BuildMode::Production => args.push("-Copt-level=2".to_string()),
        }
        args
    }

    fn link_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if self.platform.supports_symbol_map() {
            args.push(format!(
                "-Clink-arg=-Wl,--version-script={}",
                self.layout.symbol_map.display()
            ));
        }
        args
    }
}
