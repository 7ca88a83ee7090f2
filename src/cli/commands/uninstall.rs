//! uninstall command - Remove branch protection

use anyhow::{Context as _, Result};

use super::protection::{resolve_branch, ProtectionReport, ProtectionState};
use crate::core::context::Context;
use crate::forge::Forge;

/// Remove a branch's protection rule entirely.
///
/// The deletion endpoint is always called, whatever the current rule
/// contains. Whether deleting a missing rule succeeds is up to the host;
/// its error is surfaced unchanged in the cause chain.
pub fn uninstall(ctx: &Context, forge: &dyn Forge, branch: Option<&str>) -> Result<ProtectionReport> {
    let branch = resolve_branch(forge, branch, ctx.verbosity())?;

    forge
        .delete_protection(&branch)
        .context("failed to remove branch protection")?;

    Ok(ProtectionReport::new(
        forge,
        branch,
        ProtectionState::NoLongerRequired,
    ))
}
