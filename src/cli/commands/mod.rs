//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Talks to git through [`Git`] and to the host through a `&dyn Forge`
//! 3. Returns a report; the dispatcher prints it
//!
//! Handlers never construct subprocesses themselves, so they run unchanged
//! against [`crate::process::mock::ScriptedRunner`] and
//! [`crate::forge::mock::MockForge`] in tests.

mod check;
mod completion;
mod create;
mod install;
mod protection;
mod uninstall;
mod version;

// Re-export command functions for testing and direct invocation
pub use check::check;
pub use completion::completion;
pub use create::{create, SignoffReport};
pub use install::install;
pub use protection::{resolve_branch, ProtectionReport, ProtectionState};
pub use uninstall::uninstall;
pub use version::{version, version_line};

use crate::cli::args::Command;
use crate::core::context::Context;
use crate::forge::github::GitHubForge;
use crate::git::Git;
use crate::process::{Runner, SystemRunner};
use crate::ui::output;
use anyhow::Result;

/// Dispatch a command to its handler using real `git` and `gh` processes.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    let runner = SystemRunner::new(ctx.cwd.as_deref()).with_verbosity(ctx.verbosity());
    dispatch_with(command, ctx, &runner)
}

/// Dispatch a command with an explicit [`Runner`].
///
/// Required tools are located before any command runs, so a missing `git`
/// or `gh` is reported without side effects.
pub fn dispatch_with(command: Command, ctx: &Context, runner: &dyn Runner) -> Result<()> {
    let verbosity = ctx.verbosity();
    let git_program = ctx.config.git_program();
    let gh_program = ctx.config.gh_program();

    match command {
        Command::Create { force } => {
            runner.require(git_program)?;
            runner.require(gh_program)?;
            let git = Git::new(runner, git_program);
            let forge = GitHubForge::new(runner, gh_program);
            let report = create::create(ctx, &git, &forge, force)?;
            output::print(report, verbosity);
        }
        Command::Install { branch, merge } => {
            runner.require(gh_program)?;
            let forge = GitHubForge::new(runner, gh_program);
            let merge = merge || ctx.config.install_merge();
            let report = install::install(ctx, &forge, branch.as_deref(), merge)?;
            output::print(report, verbosity);
        }
        Command::Uninstall { branch } => {
            runner.require(gh_program)?;
            let forge = GitHubForge::new(runner, gh_program);
            let report = uninstall::uninstall(ctx, &forge, branch.as_deref())?;
            output::print(report, verbosity);
        }
        Command::Check { branch } => {
            runner.require(gh_program)?;
            let forge = GitHubForge::new(runner, gh_program);
            let report = check::check(ctx, &forge, branch.as_deref())?;
            output::print(report, verbosity);
        }
        Command::Version => version::version(ctx)?,
        Command::Completion { shell } => completion::completion(shell, &mut std::io::stdout())?,
    }

    Ok(())
}
