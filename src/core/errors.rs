//! core::errors
//!
//! Precondition errors and failure classification.
//!
//! Commands return `anyhow::Error`. At the process boundary the error chain
//! is classified into an [`ErrorKind`] for diagnostics, and every kind maps
//! to the same exit code.

use std::path::PathBuf;

use thiserror::Error;

use super::config::ConfigError;
use super::types::TypeError;
use crate::forge::ForgeError;
use crate::git::GitError;
use crate::process::ProcessError;

/// Local states that block an operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreconditionError {
    /// Local changes exist.
    #[error("can't sign off on a dirty repository ({} uncommitted change(s))", .entries.len())]
    DirtyWorktree {
        /// Porcelain status lines
        entries: Vec<String>,
    },

    /// Local commits have not been pushed.
    #[error("can't sign off with {commits} unpushed commit(s); push to {upstream} first")]
    UnpushedCommits { upstream: String, commits: usize },

    /// The `-C` directory does not exist.
    #[error("directory '{}' does not exist", .path.display())]
    MissingDirectory { path: PathBuf },
}

/// Broad failure category, used for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The repository or arguments are not in a state that allows the operation.
    Precondition,
    /// A required external tool is not installed.
    MissingDependency,
    /// git or gh ran and failed.
    ExternalCall,
    /// A bug: panic or otherwise unexpected failure.
    Internal,
}

impl ErrorKind {
    /// Classify an error by walking its cause chain.
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<ProcessError>() {
                return Self::from_process(e);
            }
            if cause.is::<PreconditionError>()
                || cause.is::<TypeError>()
                || cause.is::<ConfigError>()
            {
                return ErrorKind::Precondition;
            }
            if let Some(e) = cause.downcast_ref::<GitError>() {
                return match e {
                    GitError::NotARepo { .. }
                    | GitError::NoTrackingBranch
                    | GitError::IdentityUnset => ErrorKind::Precondition,
                    GitError::Process(p) => Self::from_process(p),
                    _ => ErrorKind::ExternalCall,
                };
            }
            if let Some(e) = cause.downcast_ref::<ForgeError>() {
                return match e {
                    ForgeError::Process(p) => Self::from_process(p),
                    _ => ErrorKind::ExternalCall,
                };
            }
        }
        ErrorKind::Internal
    }

    fn from_process(err: &ProcessError) -> Self {
        match err {
            ProcessError::MissingTool { .. } => ErrorKind::MissingDependency,
            ProcessError::Spawn { .. } => ErrorKind::ExternalCall,
        }
    }

    /// Process exit code. Every failure exits 1.
    pub fn exit_code(self) -> u8 {
        1
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Precondition => "precondition",
            ErrorKind::MissingDependency => "missing dependency",
            ErrorKind::ExternalCall => "external call",
            ErrorKind::Internal => "internal",
        };
        write!(f, "{}", name)
    }
}
