//! core
//!
//! Core domain types, configuration, and error classification.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, CommitSha
//! - [`config`] - Configuration schema and loading
//! - [`context`] - Per-invocation execution context
//! - [`errors`] - Precondition errors and failure kinds
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Nothing here runs external programs

pub mod config;
pub mod context;
pub mod errors;
pub mod types;
