//! git
//!
//! Single interface for all local repository reads.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. It shells out to the `git`
//! CLI through [`crate::process::Runner`] and returns typed results. It never
//! mutates the repository.
//!
//! # Responsibilities
//!
//! - Working tree status (modified, staged, untracked)
//! - Upstream tracking and divergence
//! - HEAD commit identity
//! - Configured user identity

mod interface;

pub use interface::{Cleanliness, Git, GitError};
