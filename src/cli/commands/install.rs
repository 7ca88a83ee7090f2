//! install command - Require signoff on a branch

use anyhow::{Context as _, Result};

use super::protection::{resolve_branch, ProtectionReport, ProtectionState};
use crate::core::context::Context;
use crate::forge::{Forge, ForgeError, ProtectionRequest};
use crate::ui::output;

/// Require the `signoff` status check on a branch.
///
/// By default this overwrites the whole protection rule: `signoff` becomes
/// the only required check, strict mode is off, and admin enforcement,
/// review requirements and push restrictions are cleared.
///
/// With `merge`, the current rule is read first and `signoff` is added to
/// its required checks. A branch with no protection is treated as empty.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `forge` - Remote host
/// * `branch` - Branch to protect, or `None` for the default branch
/// * `merge` - Keep existing required checks
pub fn install(
    ctx: &Context,
    forge: &dyn Forge,
    branch: Option<&str>,
    merge: bool,
) -> Result<ProtectionReport> {
    let verbosity = ctx.verbosity();
    let branch = resolve_branch(forge, branch, verbosity)?;

    let request = if merge {
        match forge.get_protection(&branch) {
            Ok(existing) => ProtectionRequest::merged_with(&existing),
            Err(ForgeError::NotFound(_)) => {
                output::debug(format!("{} has no protection yet", branch), verbosity);
                ProtectionRequest::signoff_only()
            }
            Err(e) => return Err(e).context("failed to read branch protection"),
        }
    } else {
        ProtectionRequest::signoff_only()
    };

    output::debug(
        format!(
            "required checks for {}: {}",
            branch,
            request
                .required_status_checks
                .context_names()
                .collect::<Vec<_>>()
                .join(", ")
        ),
        verbosity,
    );

    forge
        .set_protection(&branch, &request)
        .context("failed to set branch protection")?;

    Ok(ProtectionReport::new(
        forge,
        branch,
        ProtectionState::NowRequired,
    ))
}
