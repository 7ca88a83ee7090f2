//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! gh-signoff has two configuration scopes:
//! - **Global**: User-level settings
//! - **Repo**: Repository-level overrides
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Repo config file
//! 4. CLI flags and environment (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. `$SIGNOFF_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gh-signoff/config.toml`
//! 3. `~/.gh-signoff/config.toml`
//!
//! # Repo Config Location
//!
//! `gh-signoff/config.toml` inside the repository's common git directory,
//! i.e. `<repo>/.git/gh-signoff/config.toml`, wherever in the working tree
//! (or in which linked worktree) the command runs.
//!
//! # Example
//!
//! ```no_run
//! use signoff::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/repo/.git"))).unwrap();
//! println!("git: {}, gh: {}", config.git_program(), config.gh_program());
//! println!("merge on install: {}", config.install_merge());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, InstallDefaults, RepoConfig, ToolsConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit global config file.
pub const CONFIG_ENV: &str = "SIGNOFF_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Merged configuration from all sources.
///
/// Accessors apply precedence automatically: repo config overrides global.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub global: GlobalConfig,
    pub repo: Option<RepoConfig>,
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// If `git_dir` is provided, also loads the repo-specific config stored
    /// inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed.
    /// Missing config files are not an error (defaults are used).
    pub fn load(git_dir: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(Self::find_global().as_deref(), git_dir)
    }

    /// Load only the global config from the default locations.
    pub fn load_global() -> Result<Self, ConfigError> {
        Self::load_from(Self::find_global().as_deref(), None)
    }

    /// Load from an explicit global config path instead of searching.
    pub fn load_from(
        global_path: Option<&Path>,
        git_dir: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let global: GlobalConfig = match global_path {
            Some(path) if path.exists() => read_toml(path)?,
            _ => GlobalConfig::default(),
        };
        global.validate()?;

        let config = Config { global, repo: None };
        match git_dir {
            Some(dir) => config.with_repo(dir),
            None => Ok(config),
        }
    }

    /// Layer the repo config found in `git_dir` over this config.
    ///
    /// A repository without a config file leaves the config unchanged.
    pub fn with_repo(mut self, git_dir: &Path) -> Result<Self, ConfigError> {
        let path = Self::repo_config_path(git_dir);
        if path.exists() {
            let repo: RepoConfig = read_toml(&path)?;
            repo.validate()?;
            self.repo = Some(repo);
        }
        Ok(self)
    }

    /// First existing global config file, if any.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gh-signoff/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".gh-signoff/config.toml"))
            .filter(|path| path.exists())
    }

    /// The repo config path inside a git directory, e.g. `<repo>/.git`.
    ///
    /// Linked worktrees share the common git directory, so they share one
    /// repo config.
    pub fn repo_config_path(git_dir: &Path) -> PathBuf {
        git_dir.join("gh-signoff/config.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Whether debug output is enabled by config.
    ///
    /// Defaults to `false` if not configured.
    pub fn debug(&self) -> bool {
        self.global.debug.unwrap_or(false)
    }

    /// The git executable.
    ///
    /// Defaults to `"git"`.
    pub fn git_program(&self) -> &str {
        self.tool(|t| t.git.as_deref()).unwrap_or("git")
    }

    /// The GitHub CLI executable.
    ///
    /// Defaults to `"gh"`.
    pub fn gh_program(&self) -> &str {
        self.tool(|t| t.gh.as_deref()).unwrap_or("gh")
    }

    /// Whether `install` merges into existing protection.
    ///
    /// Defaults to `false` (overwrite).
    pub fn install_merge(&self) -> bool {
        self.repo
            .as_ref()
            .and_then(|r| r.install.as_ref())
            .and_then(|i| i.merge)
            .or_else(|| self.global.install.as_ref().and_then(|i| i.merge))
            .unwrap_or(false)
    }

    fn tool<'a>(&'a self, pick: impl Fn(&'a ToolsConfig) -> Option<&'a str>) -> Option<&'a str> {
        self.repo
            .as_ref()
            .and_then(|r| r.tools.as_ref())
            .and_then(&pick)
            .or_else(|| self.global.tools.as_ref().and_then(&pick))
    }
}

fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
