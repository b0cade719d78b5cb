//! Installed package metadata
//!
//! A `PKG-INFO` file takes precedence over a `Cargo.toml` manifest. A
//! manifest without a `[package]` table (a virtual workspace) carries no
//! name and is skipped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BuildError, Result};

/// Name of an installed or checked-out package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    /// Package name as written
    pub name: String,
    /// File the name was read from
    pub source: PathBuf,
}

#[derive(Deserialize)]
struct Manifest {
    package: Option<ManifestPackage>,
}

#[derive(Deserialize)]
struct ManifestPackage {
    name: String,
}

impl PackageMetadata {
    /// Look for package metadata in `dir`
    ///
    /// # Errors
    ///
    /// Fails when a metadata file exists but cannot be read or parsed.
    pub fn probe(dir: &Path) -> Result<Option<Self>> {
        let pkg_info = dir.join("PKG-INFO");
        if let Some(text) = read_optional(&pkg_info)? {
            return Self::from_pkg_info(&text, pkg_info).map(Some);
        }

        let manifest = dir.join("Cargo.toml");
        if let Some(text) = read_optional(&manifest)? {
            return Self::from_manifest(&text, manifest);
        }

        Ok(None)
    }

    /// Parse the `Name:` header of a `PKG-INFO` file
    ///
    /// # Errors
    ///
    /// Returns a metadata error when the header is missing or empty.
    pub fn from_pkg_info(text: &str, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        // Headers end at the first blank line
        let name = text
            .lines()
            .take_while(|line| !line.trim().is_empty())
            .find_map(|line| {
                let (key, value) = line.split_once(':')?;
                key.trim().eq_ignore_ascii_case("name").then(|| value.trim())
            });

        match name {
            Some(name) if !name.is_empty() => Ok(Self {
                name: name.to_string(),
                source,
            }),
            _ => Err(BuildError::metadata(source, "missing Name header")),
        }
    }

    /// Parse the `[package] name` of a Cargo manifest
    ///
    /// # Errors
    ///
    /// Returns a metadata error when the manifest is not valid TOML.
    pub fn from_manifest(text: &str, source: impl Into<PathBuf>) -> Result<Option<Self>> {
        let source = source.into();
        let manifest: Manifest =
            toml::from_str(text).map_err(|e| BuildError::metadata(&source, e.to_string()))?;
        Ok(manifest.package.map(|package| Self {
            name: package.name,
            source,
        }))
    }

    /// Lowercase name with `_` and `.` folded to `-`
    pub fn normalized_name(&self) -> String {
        self.name
            .trim()
            .to_ascii_lowercase()
            .replace(['_', '.'], "-")
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(BuildError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
