//! forge::traits
//!
//! Forge trait definition for interacting with the remote hosting service.
//!
//! # Design
//!
//! The `Forge` trait covers exactly what signing off needs: publishing a
//! commit status, resolving the default branch, and reading, replacing, or
//! deleting branch protection. Every call is a single blocking request and
//! is never retried.
//!
//! # Example
//!
//! ```ignore
//! use signoff::forge::{Forge, SignoffStatus};
//!
//! fn sign(forge: &dyn Forge, sha: CommitSha) -> Result<(), ForgeError> {
//!     forge.create_status(&SignoffStatus::new(sha, "Ada"))
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{BranchName, CommitSha};
use crate::process::ProcessError;

/// The status context used for signoff, and the required check name.
pub const SIGNOFF_CONTEXT: &str = "signoff";

/// Errors from forge operations.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The requested resource does not exist (HTTP 404).
    ///
    /// GitHub also answers 404 for a branch with no protection.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API client exited non-zero.
    #[error("API error (exit {status}): {message}")]
    ApiError {
        /// Exit code of the API client
        status: i32,
        /// Message reported by the API client
        message: String,
    },

    /// The response body could not be understood.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    /// The API client could not be run.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Commit state for a status entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Success,
}

impl std::fmt::Display for StatusState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusState::Success => write!(f, "success"),
        }
    }
}

/// A signoff commit status, built once per `create` and handed to the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignoffStatus {
    pub sha: CommitSha,
    pub state: StatusState,
    pub context: String,
    pub description: String,
}

impl SignoffStatus {
    /// A successful `signoff` status attributed to `user`.
    pub fn new(sha: CommitSha, user: &str) -> Self {
        Self {
            sha,
            state: StatusState::Success,
            context: SIGNOFF_CONTEXT.to_string(),
            description: format!("{} signed off", user),
        }
    }
}

/// Branch protection as returned by `GET .../branches/{branch}/protection`.
///
/// Only the fields signoff reads are modeled; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BranchProtection {
    #[serde(default)]
    pub required_status_checks: Option<RequiredStatusChecks>,
    #[serde(default)]
    pub enforce_admins: Option<AdminEnforcement>,
}

impl BranchProtection {
    /// Whether `signoff` is among the required status checks.
    pub fn requires_signoff(&self) -> bool {
        self.required_status_checks
            .as_ref()
            .is_some_and(|checks| checks.context_names().any(|c| c == SIGNOFF_CONTEXT))
    }
}

/// The required status checks block of a protection rule.
///
/// GitHub reports each required check twice: by name in `contexts`, and in
/// `checks` together with the app allowed to set it. When `checks` is
/// non-empty it is authoritative, and a PUT carrying it keeps those app
/// bindings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredStatusChecks {
    /// Require the branch to be up to date with its base before merging.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub contexts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<StatusCheck>,
}

impl RequiredStatusChecks {
    /// Names of the required checks.
    pub fn context_names(&self) -> impl Iterator<Item = &str> + '_ {
        let from_contexts = self.checks.is_empty();
        self.checks
            .iter()
            .map(|check| check.context.as_str())
            .chain(
                self.contexts
                    .iter()
                    .filter(move |_| from_contexts)
                    .map(String::as_str),
            )
    }
}

/// One entry of `required_status_checks.checks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub context: String,
    /// App that must report the check; absent lets GitHub pick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<i64>,
}

/// The `enforce_admins` block of a GET response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdminEnforcement {
    #[serde(default)]
    pub enabled: bool,
}

/// Body for `PUT .../branches/{branch}/protection`.
///
/// The endpoint replaces the whole protection object. `None` fields are
/// serialized as `null`, which disables that protection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectionRequest {
    pub required_status_checks: RequiredStatusChecks,
    pub enforce_admins: Option<bool>,
    pub required_pull_request_reviews: Option<serde_json::Value>,
    pub restrictions: Option<serde_json::Value>,
}

impl ProtectionRequest {
    /// Require only `signoff`, non-strict, with every other protection cleared.
    pub fn signoff_only() -> Self {
        Self {
            required_status_checks: RequiredStatusChecks {
                contexts: vec![SIGNOFF_CONTEXT.to_string()],
                ..RequiredStatusChecks::default()
            },
            enforce_admins: None,
            required_pull_request_reviews: None,
            restrictions: None,
        }
    }

    /// Add `signoff` to an existing rule's required checks.
    ///
    /// Keeps existing checks with their app bindings, the strict flag, and
    /// admin enforcement. Pull request review and push restriction settings
    /// are still cleared, since their GET and PUT shapes differ.
    pub fn merged_with(existing: &BranchProtection) -> Self {
        let mut request = Self::signoff_only();

        if let Some(ref current) = existing.required_status_checks {
            let required = &mut request.required_status_checks;
            required.strict = current.strict;
            if current.checks.is_empty() {
                required.contexts = current.contexts.clone();
                if !required.contexts.iter().any(|c| c == SIGNOFF_CONTEXT) {
                    required.contexts.push(SIGNOFF_CONTEXT.to_string());
                }
            } else {
                // `contexts` stays in the body, empty, so `checks` alone applies
                required.contexts.clear();
                required.checks = current.checks.clone();
                if !required.checks.iter().any(|c| c.context == SIGNOFF_CONTEXT) {
                    required.checks.push(StatusCheck {
                        context: SIGNOFF_CONTEXT.to_string(),
                        app_id: None,
                    });
                }
            }
        }

        if let Some(ref admins) = existing.enforce_admins {
            request.enforce_admins = Some(admins.enabled);
        }

        request
    }
}

/// The Forge trait for interacting with the remote hosting service.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. A branch without protection
/// is reported by [`Forge::get_protection`] as [`ForgeError::NotFound`].
pub trait Forge {
    /// Display name of the host, used in user-facing messages.
    fn name(&self) -> &'static str;

    /// Attach a commit status.
    fn create_status(&self, status: &SignoffStatus) -> Result<(), ForgeError>;

    /// The repository's default branch.
    fn default_branch(&self) -> Result<BranchName, ForgeError>;

    /// Read a branch's protection rule.
    fn get_protection(&self, branch: &BranchName) -> Result<BranchProtection, ForgeError>;

    /// Replace a branch's protection rule wholesale.
    fn set_protection(
        &self,
        branch: &BranchName,
        request: &ProtectionRequest,
    ) -> Result<(), ForgeError>;

    /// Remove a branch's protection entirely.
    fn delete_protection(&self, branch: &BranchName) -> Result<(), ForgeError>;
}
