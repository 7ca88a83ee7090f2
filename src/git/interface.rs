//! git::interface
//!
//! Repository inspection via the `git` CLI.
//!
//! This module provides the **single doorway** to local repository state.
//! All reads go through a [`Runner`], which lets tests script git's output
//! instead of building real repositories.
//!
//! # Error Handling
//!
//! Git failures are categorized into typed variants:
//! - [`GitError::NotARepo`]: Not inside a Git repository
//! - [`GitError::NoTrackingBranch`]: Current branch has no upstream
//! - [`GitError::IdentityUnset`]: `user.name` is not configured
//! - [`GitError::CommandFailed`]: Any other non-zero exit
//!
//! # Example
//!
//! ```no_run
//! use signoff::git::{Cleanliness, Git};
//! use signoff::process::SystemRunner;
//!
//! let runner = SystemRunner::new(None);
//! let git = Git::new(&runner, "git");
//! if git.cleanliness()? == Cleanliness::Clean {
//!     println!("ready to sign off {}", git.head_sha()?);
//! }
//! # Ok::<(), signoff::git::GitError>(())
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::core::types::{CommitSha, TypeError};
use crate::process::{CommandOutput, ProcessError, Runner};

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {message}")]
    NotARepo {
        /// What git reported
        message: String,
    },

    /// The current branch has no upstream configured.
    ///
    /// Divergence cannot be evaluated without one, so this is a hard
    /// precondition failure rather than a "dirty" result.
    #[error("current branch is not tracking a remote branch")]
    NoTrackingBranch,

    /// `user.name` is unset or blank.
    #[error("git user.name is not configured; set it with `git config user.name <name>`")]
    IdentityUnset,

    /// Git exited non-zero for some other reason.
    #[error("`git {command}` failed: {message}")]
    CommandFailed {
        /// The git subcommand line
        command: String,
        /// What git reported
        message: String,
    },

    /// Git produced output that could not be parsed.
    #[error("unexpected git output: {0}")]
    InvalidOutput(#[from] TypeError),

    /// Git could not be run at all.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Result of the sign-off cleanliness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cleanliness {
    /// No local changes and nothing unpushed.
    Clean,
    /// Modified, staged, or untracked entries exist.
    Dirty {
        /// Porcelain status lines, e.g. `" M src/lib.rs"`
        entries: Vec<String>,
    },
    /// Local commits are missing from the upstream branch.
    Unpushed {
        /// The upstream, e.g. `origin/main`
        upstream: String,
        /// Number of local-only commits
        commits: usize,
    },
}

/// Read-only view of the local repository.
pub struct Git<'a> {
    runner: &'a dyn Runner,
    program: String,
}

impl<'a> Git<'a> {
    /// Create an inspector that runs `program` (usually `"git"`).
    pub fn new(runner: &'a dyn Runner, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// Decide whether the repository may be signed off.
    ///
    /// Checks run in order and stop at the first failing one:
    /// 1. dirty working tree (including untracked files)
    /// 2. missing upstream, reported as [`GitError::NoTrackingBranch`]
    /// 3. commits not yet on the upstream
    ///
    /// A dirty tree is reported even when no upstream exists.
    pub fn cleanliness(&self) -> Result<Cleanliness, GitError> {
        let entries = self.status_entries()?;
        if !entries.is_empty() {
            return Ok(Cleanliness::Dirty { entries });
        }

        let upstream = self.upstream()?.ok_or(GitError::NoTrackingBranch)?;

        let commits = self.unpushed_commits()?;
        if commits > 0 {
            return Ok(Cleanliness::Unpushed { upstream, commits });
        }

        Ok(Cleanliness::Clean)
    }

    /// Porcelain status lines for every modified, staged, or untracked path.
    pub fn status_entries(&self) -> Result<Vec<String>, GitError> {
        let output = self.checked(&["status", "--porcelain"])?;
        Ok(output
            .stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// The upstream of the current branch, or `None` if it has none.
    pub fn upstream(&self) -> Result<Option<String>, GitError> {
        let output = self.run(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"])?;
        if !output.success() {
            return Ok(None);
        }
        let upstream = output.stdout.trim();
        Ok((!upstream.is_empty()).then(|| upstream.to_string()))
    }

    /// Number of commits on HEAD that are not on the upstream.
    pub fn unpushed_commits(&self) -> Result<usize, GitError> {
        let output = self.checked(&["log", "--oneline", "@{u}..HEAD"])?;
        Ok(output
            .stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count())
    }

    /// The full sha of HEAD.
    pub fn head_sha(&self) -> Result<CommitSha, GitError> {
        let output = self.checked(&["rev-parse", "HEAD"])?;
        Ok(CommitSha::new(output.stdout.trim())?)
    }

    /// The configured `user.name`.
    pub fn user_name(&self) -> Result<String, GitError> {
        let args = ["config", "user.name"];
        let output = self.run(&args)?;
        // exit 1 is "key not set"; anything else is a real failure
        match output.status {
            0 => {}
            1 => return Err(GitError::IdentityUnset),
            _ => return Err(Self::failure(&args, &output)),
        }

        let name = output.stdout.trim();
        if name.is_empty() {
            return Err(GitError::IdentityUnset);
        }
        Ok(name.to_string())
    }

    /// The repository's common git directory, as an absolute path.
    ///
    /// For a linked worktree this is the main repository's `.git`, not the
    /// worktree's private directory.
    pub fn common_dir(&self) -> Result<PathBuf, GitError> {
        let output = self.checked(&["rev-parse", "--path-format=absolute", "--git-common-dir"])?;
        let dir = output.stdout.trim();
        if dir.is_empty() {
            return Err(GitError::CommandFailed {
                command: "rev-parse --git-common-dir".into(),
                message: "no git directory reported".into(),
            });
        }
        Ok(PathBuf::from(dir))
    }

    fn run(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        Ok(self.runner.run(&self.program, args, None)?)
    }

    /// Run and turn a non-zero exit into a typed error.
    fn checked(&self, args: &[&str]) -> Result<CommandOutput, GitError> {
        let output = self.run(args)?;
        if output.success() {
            Ok(output)
        } else {
            Err(Self::failure(args, &output))
        }
    }

    fn failure(args: &[&str], output: &CommandOutput) -> GitError {
        let message = output.message().to_string();
        if message.contains("not a git repository") {
            GitError::NotARepo { message }
        } else {
            GitError::CommandFailed {
                command: args.join(" "),
                message,
            }
        }
    }
}
