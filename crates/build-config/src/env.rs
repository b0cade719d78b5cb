//! Environment-driven configuration
//!
//! All variables are read through a lookup function so tests never touch
//! the process environment.

use crate::error::Result;
use crate::mode::BuildModeSetting;
use crate::variant::PackageVariant;

/// Build mode override (`auto`, `debug`, `production` and aliases)
pub const BUILD_MODE_ENV: &str = "LIBG722_BUILD_MODE";

/// Package variant override (`core`, `numpy-addon` and aliases)
pub const PACKAGE_VARIANT_ENV: &str = "LIBG722_PACKAGE_VARIANT";

/// Build the core package without the ndarray backend
pub const NO_NDARRAY_ENV: &str = "LIBG722_NO_NUMPY";

/// Raw build environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildEnv {
    /// Value of `LIBG722_BUILD_MODE`, if set
    pub build_mode: Option<String>,
    /// Value of `LIBG722_PACKAGE_VARIANT`, if set
    pub package_variant: Option<String>,
    /// `LIBG722_NO_NUMPY` is set to a true value
    pub no_ndarray: bool,
}

impl BuildEnv {
    /// Read the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read through an injected lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            build_mode: lookup(BUILD_MODE_ENV),
            package_variant: lookup(PACKAGE_VARIANT_ENV),
            no_ndarray: lookup(NO_NDARRAY_ENV).is_some_and(|v| flag_is_true(&v)),
        }
    }

    /// Parsed build mode setting; unset means `auto`
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unrecognized values.
    pub fn build_mode_setting(&self) -> Result<BuildModeSetting> {
        match &self.build_mode {
            Some(value) => value.parse(),
            None => Ok(BuildModeSetting::Auto),
        }
    }

    /// Parsed package variant override
    ///
    /// # Errors
    ///
    /// Returns a configuration error for unrecognized values.
    pub fn variant_override(&self) -> Result<Option<PackageVariant>> {
        self.package_variant.as_deref().map(str::parse).transpose()
    }
}

/// Boolean environment flag
pub fn flag_is_true(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> BuildEnv {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BuildEnv::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_empty_environment() {
        let env = env(&[]);
        assert_eq!(env, BuildEnv::default());
        assert_eq!(env.build_mode_setting().unwrap(), BuildModeSetting::Auto);
        assert_eq!(env.variant_override().unwrap(), None);
    }

    #[test]
    fn test_overrides() {
        let env = env(&[
            (BUILD_MODE_ENV, " Release "),
            (PACKAGE_VARIANT_ENV, "numpy"),
            (NO_NDARRAY_ENV, "yes"),
        ]);
        assert_eq!(env.build_mode_setting().unwrap(), BuildModeSetting::Production);
        assert_eq!(env.variant_override().unwrap(), Some(PackageVariant::NumpyAddon));
        assert!(env.no_ndarray);
    }

    #[test]
    fn test_invalid_values() {
        let env = env(&[(BUILD_MODE_ENV, "fast"), (PACKAGE_VARIANT_ENV, "gpu")]);
        assert!(matches!(
            env.build_mode_setting(),
            Err(BuildError::Configuration { var: BUILD_MODE_ENV, .. })
        ));
        assert!(matches!(
            env.variant_override(),
            Err(BuildError::Configuration { var: PACKAGE_VARIANT_ENV, .. })
        ));
    }

    #[test]
    fn test_flags() {
        for value in ["1", "TRUE", " on ", "yes"] {
            assert!(flag_is_true(value));
        }
        for value in ["0", "", "off", "no", "2"] {
            assert!(!flag_is_true(value));
        }
    }
}
