//! Shared pieces of the install, uninstall and check commands.

use std::fmt;

use anyhow::{Context as _, Result};

use crate::core::types::BranchName;
use crate::forge::Forge;
use crate::ui::output::{self, Verbosity};

/// Resolve the branch a protection command acts on.
///
/// A requested name is validated and used as-is, with no remote lookup.
/// Otherwise the repository's default branch is fetched from the forge.
pub fn resolve_branch(
    forge: &dyn Forge,
    requested: Option<&str>,
    verbosity: Verbosity,
) -> Result<BranchName> {
    if let Some(name) = requested {
        return Ok(BranchName::new(name)?);
    }

    let branch = forge
        .default_branch()
        .context("failed to get default branch")?;
    output::debug(format!("resolved default branch: {}", branch), verbosity);
    Ok(branch)
}

/// Resulting signoff requirement on a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectionState {
    /// `install` succeeded.
    NowRequired,
    /// `uninstall` succeeded.
    NoLongerRequired,
    /// `check` found signoff required.
    Required,
    /// `check` found signoff not required.
    NotRequired,
}

/// One-line outcome of a protection command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectionReport {
    /// Host name used in the message, e.g. "GitHub"
    pub host: &'static str,
    pub branch: BranchName,
    pub state: ProtectionState,
}

impl ProtectionReport {
    pub fn new(forge: &dyn Forge, branch: BranchName, state: ProtectionState) -> Self {
        Self {
            host: forge.name(),
            branch,
            state,
        }
    }

    /// Whether the branch requires signoff after the command.
    pub fn requires_signoff(&self) -> bool {
        matches!(
            self.state,
            ProtectionState::NowRequired | ProtectionState::Required
        )
    }
}

impl fmt::Display for ProtectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (ok, phrase) = match self.state {
            ProtectionState::NowRequired => (true, "now requires signoff"),
            ProtectionState::NoLongerRequired => (true, "no longer requires signoff"),
            ProtectionState::Required => (true, "requires signoff"),
            ProtectionState::NotRequired => (false, "does not require signoff"),
        };
        let message = format!("{} {} branch {}", self.host, self.branch, phrase);
        write!(f, "{}", output::format_status(ok, message))
    }
}
