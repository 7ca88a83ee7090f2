//! forge::github
//!
//! GitHub forge implementation on top of the `gh` CLI.
//!
//! # Design
//!
//! Every call is a `gh api` invocation against a repository-relative path.
//! The `{owner}/{repo}` placeholders are expanded by `gh` from the current
//! repository's remote, so this module never parses remote URLs itself.
//! Authentication is whatever `gh auth` has configured.
//!
//! Request bodies for PUT are sent as JSON on stdin (`--input -`), since the
//! protection endpoint needs `null` values that `-f`/`-F` fields cannot
//! express.
//!
//! # Error Mapping
//!
//! `gh api` exits 1 on any HTTP error and prints `gh: <message> (HTTP <code>)`
//! on stderr. A 404 becomes [`ForgeError::NotFound`]; everything else becomes
//! [`ForgeError::ApiError`] carrying gh's message verbatim.

use serde::Deserialize;

use super::traits::{
    BranchProtection, Forge, ForgeError, ProtectionRequest, SignoffStatus,
};
use crate::core::types::BranchName;
use crate::process::{CommandOutput, Runner};

/// GitHub forge backed by `gh api`.
pub struct GitHubForge<'a> {
    runner: &'a dyn Runner,
    program: String,
}

/// The subset of `GET repos/{owner}/{repo}` we read.
#[derive(Debug, Deserialize)]
struct RepoMetadata {
    default_branch: String,
}

impl<'a> GitHubForge<'a> {
    /// Create a forge that runs `program` (usually `"gh"`).
    pub fn new(runner: &'a dyn Runner, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    fn protection_path(branch: &BranchName) -> String {
        format!("repos/{{owner}}/{{repo}}/branches/{}/protection", branch)
    }

    /// Run `gh api <args>` and map a non-zero exit to a [`ForgeError`].
    fn api(&self, args: &[&str], stdin: Option<&str>) -> Result<CommandOutput, ForgeError> {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push("api");
        full.extend_from_slice(args);

        let output = self.runner.run(&self.program, &full, stdin)?;
        if output.success() {
            Ok(output)
        } else {
            Err(Self::map_failure(&output))
        }
    }

    fn map_failure(output: &CommandOutput) -> ForgeError {
        let message = output.message().to_string();
        if message.contains("HTTP 404") {
            ForgeError::NotFound(message)
        } else {
            ForgeError::ApiError {
                status: output.status,
                message,
            }
        }
    }
}

impl Forge for GitHubForge<'_> {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    fn create_status(&self, status: &SignoffStatus) -> Result<(), ForgeError> {
        let path = format!("repos/{{owner}}/{{repo}}/statuses/{}", status.sha);
        let state = format!("state={}", status.state);
        let context = format!("context={}", status.context);
        let description = format!("description={}", status.description);

        self.api(
            &[
                "--method",
                "POST",
                path.as_str(),
                "-f",
                state.as_str(),
                "-f",
                context.as_str(),
                "-f",
                description.as_str(),
            ],
            None,
        )?;
        Ok(())
    }

    fn default_branch(&self) -> Result<BranchName, ForgeError> {
        let output = self.api(&["repos/{owner}/{repo}"], None)?;
        let metadata: RepoMetadata = serde_json::from_str(&output.stdout)
            .map_err(|e| ForgeError::InvalidResponse(e.to_string()))?;
        BranchName::new(metadata.default_branch)
            .map_err(|e| ForgeError::InvalidResponse(e.to_string()))
    }

    fn get_protection(&self, branch: &BranchName) -> Result<BranchProtection, ForgeError> {
        let path = Self::protection_path(branch);
        let output = self.api(&[path.as_str()], None)?;
        serde_json::from_str(&output.stdout).map_err(|e| ForgeError::InvalidResponse(e.to_string()))
    }

    fn set_protection(
        &self,
        branch: &BranchName,
        request: &ProtectionRequest,
    ) -> Result<(), ForgeError> {
        let body = serde_json::to_string(request)
            .map_err(|e| ForgeError::InvalidResponse(e.to_string()))?;
        let path = Self::protection_path(branch);
        self.api(
            &["--method", "PUT", path.as_str(), "--input", "-"],
            Some(&body),
        )?;
        Ok(())
    }

    fn delete_protection(&self, branch: &BranchName) -> Result<(), ForgeError> {
        let path = Self::protection_path(branch);
        self.api(&["--method", "DELETE", path.as_str()], None)?;
        Ok(())
    }
}
