//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated Git branch name
//! - [`CommitSha`] - Git commit identifier (SHA-1 or SHA-256)
//!
//! # Validation
//!
//! These types enforce validity at construction time. Output read back from
//! `git` and `gh` is parsed into them before anything is sent to the remote.
//!
//! # Examples
//!
//! ```
//! use signoff::core::types::{BranchName, CommitSha};
//!
//! let branch = BranchName::new("release/1.2").unwrap();
//! let sha = CommitSha::new("ABC123DEF4567890ABC123DEF4567890ABC12345").unwrap();
//! assert_eq!(sha.as_str(), "abc123def4567890abc123def4567890abc12345");
//!
//! assert!(BranchName::new("").is_err());
//! assert!(CommitSha::new("not-a-sha").is_err());
//! ```

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid commit sha: {0}")]
    InvalidSha(String),
}

/// A branch name accepted by `git check-ref-format --branch`.
///
/// The name ends up in `repos/{owner}/{repo}/branches/<name>`, so anything
/// that could add or climb a path segment is refused here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// Validate `name` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` naming the first rule broken.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        match Self::problem(&name) {
            Some(problem) => Err(TypeError::InvalidBranchName(problem)),
            None => Ok(Self(name)),
        }
    }

    fn problem(name: &str) -> Option<String> {
        const FORBIDDEN: [&str; 11] = ["..", "@{", "//", " ", "~", "^", ":", "\\", "?", "*", "["];

        if name.trim().is_empty() {
            return Some("branch name cannot be empty".into());
        }
        if name == "@" {
            return Some("branch name cannot be '@' (reserved)".into());
        }
        if let Some(lead) = name.chars().next().filter(|c| *c == '.' || *c == '-') {
            return Some(format!("branch name cannot start with '{lead}'"));
        }
        if name.ends_with('/') {
            return Some("branch name cannot end with '/'".into());
        }
        if let Some(bad) = FORBIDDEN.iter().find(|bad| name.contains(*bad)) {
            return Some(format!("branch name cannot contain '{bad}'"));
        }
        if name.chars().any(|c| c.is_ascii_control()) {
            return Some("branch name cannot contain control characters".into());
        }
        // each slash-separated segment follows the same dot and lock rules
        name.split('/').find_map(|segment| {
            if segment.starts_with('.') {
                Some(format!("'{segment}' cannot start with '.'"))
            } else if segment.ends_with(".lock") {
                Some(format!("'{segment}' cannot end with '.lock'"))
            } else {
                None
            }
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A full commit identifier, normalized to lowercase.
///
/// Abbreviated shas are rejected: the statuses endpoint needs the full hash.
///
/// ```
/// use signoff::core::types::CommitSha;
///
/// let sha = CommitSha::new("abc123def4567890abc123def4567890abc12345").unwrap();
/// assert_eq!(sha.short(7), "abc123d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    /// Parse a full sha as printed by `git rev-parse`, trailing newline included.
    pub fn new(sha: impl Into<String>) -> Result<Self, TypeError> {
        let sha = sha.into().trim().to_ascii_lowercase();
        if sha.len() != 40 && sha.len() != 64 {
            return Err(TypeError::InvalidSha(format!(
                "expected 40 or 64 hex characters, got {}",
                sha.len()
            )));
        }
        if !sha.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidSha("sha must be hexadecimal".into()));
        }
        Ok(Self(sha))
    }

    /// The first `len` characters, or the whole sha if shorter.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CommitSha {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
