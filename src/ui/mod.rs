//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All user-facing output goes through this module: results on stdout,
//! errors, warnings and debug diagnostics on stderr.

pub mod output;
