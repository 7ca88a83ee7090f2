//! version command - Show the version

use crate::core::context::Context;
use anyhow::Result;

/// The version line, e.g. `gh-signoff 0.3.0`.
pub fn version_line(ctx: &Context) -> String {
    format!("gh-signoff {}", ctx.version)
}

/// Print the version.
pub fn version(ctx: &Context) -> Result<()> {
    // not subject to --quiet: printing the version is the whole point
    println!("{}", version_line(ctx));
    Ok(())
}
