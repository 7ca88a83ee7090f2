//! create command - Sign off on the current commit

use std::fmt;

use anyhow::{Context as _, Result};

use crate::core::context::Context;
use crate::core::errors::PreconditionError;
use crate::forge::{Forge, SignoffStatus};
use crate::git::{Cleanliness, Git};
use crate::ui::output;

/// Outcome of a successful signoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignoffReport {
    pub status: SignoffStatus,
}

impl fmt::Display for SignoffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = format!(
            "{} on {}",
            self.status.description,
            self.status.sha.short(7)
        );
        write!(f, "{}", output::format_status(true, message))
    }
}

/// Publish a `signoff` status for HEAD.
///
/// Unless `force` is set, the repository must be clean: no uncommitted or
/// untracked changes, an upstream branch configured, and nothing unpushed.
/// No remote call is made when a check fails.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `git` - Local repository
/// * `forge` - Remote host
/// * `force` - Skip the cleanliness checks
pub fn create(ctx: &Context, git: &Git<'_>, forge: &dyn Forge, force: bool) -> Result<SignoffReport> {
    let verbosity = ctx.verbosity();

    if force {
        output::debug("skipping cleanliness checks (--force)", verbosity);
    } else {
        match git.cleanliness()? {
            Cleanliness::Clean => {}
            Cleanliness::Dirty { entries } => {
                output::debug(
                    format!("uncommitted changes:\n{}", output::format_list(&entries, "  ")),
                    verbosity,
                );
                return Err(PreconditionError::DirtyWorktree { entries }.into());
            }
            Cleanliness::Unpushed { upstream, commits } => {
                return Err(PreconditionError::UnpushedCommits { upstream, commits }.into());
            }
        }
    }

    let sha = git.head_sha()?;
    let user = git.user_name()?;
    let status = SignoffStatus::new(sha, &user);

    output::debug(
        format!("publishing '{}' status for {}", status.context, status.sha),
        verbosity,
    );
    forge
        .create_status(&status)
        .context("failed to create status")?;

    Ok(SignoffReport { status })
}
