//! core::context
//!
//! Per-invocation execution context.
//!
//! Built once at startup from CLI flags, the environment, and config, then
//! passed by reference to every command. Nothing in the crate reads flags or
//! the debug environment variable after this point.

use std::path::PathBuf;

use super::config::Config;
use crate::ui::output::Verbosity;

/// Environment variable that enables debug output.
pub const DEBUG_ENV: &str = "SIGNOFF_DEBUG";

/// Execution context for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Version string reported by `version`.
    pub version: &'static str,
    /// Merged file configuration.
    pub config: Config,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            version: env!("CARGO_PKG_VERSION"),
            config: Config::default(),
        }
    }
}

impl Context {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Interpret the value of [`DEBUG_ENV`].
///
/// Any non-empty value other than `0` or `false` enables debug output.
pub fn debug_from_env(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !(v == "0" || v.eq_ignore_ascii_case("false")),
    }
}
