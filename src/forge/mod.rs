//! forge
//!
//! Abstraction for the remote hosting service.
//!
//! # Architecture
//!
//! The `Forge` trait defines the interface commands use to publish signoff
//! statuses and manage branch protection. Commands receive a `&dyn Forge`
//! and never build `gh` invocations themselves.
//!
//! # Modules
//!
//! - `traits`: Core `Forge` trait and request/response types
//! - [`github`]: GitHub implementation over `gh api`
//! - [`mock`]: Mock implementation for deterministic testing

pub mod github;
pub mod mock;
mod traits;

pub use traits::*;
