//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `$SIGNOFF_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gh-signoff/config.toml`
//! 3. `~/.gh-signoff/config.toml`
//!
//! # Repo Config
//!
//! Located at `.git/gh-signoff/config.toml`.
//!
//! # Validation
//!
//! Config values are validated after parsing. Unknown keys are rejected so a
//! typo does not silently fall back to a default.

use serde::Deserialize;

use super::ConfigError;

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// debug = false
///
/// [tools]
/// git = "git"
/// gh = "/opt/homebrew/bin/gh"
///
/// [install]
/// merge = true
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Emit `[debug]` diagnostics
    pub debug: Option<bool>,

    /// External program locations
    pub tools: Option<ToolsConfig>,

    /// Install command defaults
    pub install: Option<InstallDefaults>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tools) = &self.tools {
            tools.validate()?;
        }
        Ok(())
    }
}

/// Repository configuration.
///
/// # Example
///
/// ```toml
/// [install]
/// merge = false
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// External program locations
    pub tools: Option<ToolsConfig>,

    /// Install command defaults
    pub install: Option<InstallDefaults>,
}

impl RepoConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tools) = &self.tools {
            tools.validate()?;
        }
        Ok(())
    }
}

/// Locations of the external programs.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Git executable (default: "git")
    pub git: Option<String>,

    /// GitHub CLI executable (default: "gh")
    pub gh: Option<String>,
}

impl ToolsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [("tools.git", &self.git), ("tools.gh", &self.gh)] {
            if let Some(program) = value {
                if program.trim().is_empty() {
                    return Err(ConfigError::InvalidValue(format!("{} cannot be empty", key)));
                }
            }
        }
        Ok(())
    }
}

/// Install command defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InstallDefaults {
    /// Merge `signoff` into existing protection instead of overwriting it
    pub merge: Option<bool>,
}
