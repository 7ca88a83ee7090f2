//! check command - Report whether a branch requires signoff

use anyhow::Result;

use super::protection::{resolve_branch, ProtectionReport, ProtectionState};
use crate::core::context::Context;
use crate::forge::{Forge, ForgeError};
use crate::ui::output;

/// Report whether `signoff` is a required check on a branch.
///
/// Failing to read the protection rule (no rule at all, missing
/// permissions, an unreadable body) counts as "not required" and is not an
/// error. Failing to resolve the default branch is.
pub fn check(ctx: &Context, forge: &dyn Forge, branch: Option<&str>) -> Result<ProtectionReport> {
    let verbosity = ctx.verbosity();
    let branch = resolve_branch(forge, branch, verbosity)?;

    let required = match forge.get_protection(&branch) {
        Ok(protection) => protection.requires_signoff(),
        Err(ForgeError::NotFound(_)) => {
            output::debug(format!("{} has no protection", branch), verbosity);
            false
        }
        Err(e) => {
            output::warn(
                format!("could not read protection for {}: {}", branch, e),
                verbosity,
            );
            false
        }
    };

    let state = if required {
        ProtectionState::Required
    } else {
        ProtectionState::NotRequired
    };
    Ok(ProtectionReport::new(forge, branch, state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::mock::{FailOn, MockForge};
    use crate::forge::{BranchProtection, RequiredStatusChecks};

    fn protected_with(contexts: &[&str]) -> BranchProtection {
        BranchProtection {
            required_status_checks: Some(RequiredStatusChecks {
                strict: false,
                contexts: contexts.iter().map(|c| c.to_string()).collect(),
                checks: vec![],
            }),
            enforce_admins: None,
        }
    }

    #[test]
    fn required() {
        let forge = MockForge::new().with_protection("main", protected_with(&["ci", "signoff"]));
        let report = check(&Context::default(), &forge, Some("main")).unwrap();
        assert_eq!(report.to_string(), "✓ GitHub main branch requires signoff");
        assert!(report.requires_signoff());
    }

    #[test]
    fn empty_contexts() {
        let forge = MockForge::new().with_protection("main", protected_with(&[]));
        let report = check(&Context::default(), &forge, Some("main")).unwrap();
        assert_eq!(report.to_string(), "✗ GitHub main branch does not require signoff");
    }

    #[test]
    fn absent_status_checks() {
        let forge = MockForge::new().with_protection("main", BranchProtection::default());
        let report = check(&Context::default(), &forge, Some("main")).unwrap();
        assert!(!report.requires_signoff());
    }

    #[test]
    fn unprotected_branch_is_not_an_error() {
        let forge = MockForge::new();
        let report = check(&Context::default(), &forge, Some("main")).unwrap();
        assert_eq!(report.state, ProtectionState::NotRequired);
    }

    #[test]
    fn read_failure_is_not_an_error() {
        let forge = MockForge::new().fail_on(FailOn::GetProtection("HTTP 403".into()));
        let report = check(&Context::default(), &forge, Some("main")).unwrap();
        assert_eq!(report.state, ProtectionState::NotRequired);
    }

    #[test]
    fn default_branch_failure_is_an_error() {
        let forge = MockForge::new().fail_on(FailOn::DefaultBranch("HTTP 500".into()));
        let err = check(&Context::default(), &forge, None).unwrap_err();
        assert_eq!(err.to_string(), "failed to get default branch");
    }
}
