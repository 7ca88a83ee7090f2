//! gh-signoff - Sign off on commits in place of CI
//!
//! A GitHub CLI extension for teams that run their checks locally. The
//! developer runs the suite on their own machine, then signs off: a
//! successful `signoff` commit status is published for HEAD. Branch
//! protection can require that status before anything merges.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, runs handlers, reports errors)
//! - [`core`] - Domain types, config, execution context, error classification
//! - [`git`] - Read-only queries against the local repository
//! - [`forge`] - Abstraction for the remote host (GitHub through `gh api`)
//! - [`process`] - The single doorway to external programs
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. Nothing is published for a dirty or unpushed repository unless forced
//! 2. Required tools are located before any operation runs
//! 3. Failures are reported once, at the outermost boundary

pub mod cli;
pub mod core;
pub mod forge;
pub mod git;
pub mod process;
pub mod ui;
