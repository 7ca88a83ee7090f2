//! cli
//!
//! Command-line interface layer for gh-signoff.
//!
//! # Responsibilities
//!
//! - Build the execution [`Context`] from flags, environment and config
//! - Delegate to command handlers
//! - Report failures and map them to an exit code
//!
//! # Architecture
//!
//! The CLI layer is thin. Handlers return `anyhow::Result`; this module is
//! the only place that prints errors or decides the exit code. Panics are
//! caught here too, so every failure leaves through the same door.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use std::panic::{self, AssertUnwindSafe};
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::core::context::{debug_from_env, Context, DEBUG_ENV};
use crate::core::errors::{ErrorKind, PreconditionError};
use crate::forge::ForgeError;
use crate::git::{Git, GitError};
use crate::process::SystemRunner;
use crate::ui::output::{self, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> ExitCode {
    let env_debug = debug_from_env(std::env::var(DEBUG_ENV).ok().as_deref());
    let early = Verbosity::from_flags(false, cli.debug || env_debug);

    let command = match cli.resolve_command() {
        Ok(command) => command,
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    let ctx = match build_context(&cli, env_debug) {
        Ok(ctx) => ctx,
        Err(err) => return fail(&err, early),
    };
    output::debug(format!("config: {:?}", ctx.config), ctx.verbosity());

    let verbosity = Verbosity::from_flags(false, ctx.debug);
    match panic::catch_unwind(AssertUnwindSafe(|| commands::dispatch(command, &ctx))) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(err)) => fail(&err, verbosity),
        // the panic hook has already reported it
        Err(_) => ExitCode::from(ErrorKind::Internal.exit_code()),
    }
}

/// Build the context for one invocation.
///
/// Debug output is enabled by `--debug`, by [`DEBUG_ENV`], or by `debug = true`
/// in config. The repo config is found through git, so it applies from any
/// subdirectory or linked worktree. Outside a repository only the global
/// config is loaded.
pub fn build_context(cli: &Cli, env_debug: bool) -> Result<Context> {
    let cwd = match cli.cwd {
        Some(ref path) => path.clone(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    if !cwd.is_dir() {
        return Err(PreconditionError::MissingDirectory { path: cwd }.into());
    }

    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug || env_debug);
    let config = Config::load_global().context("failed to load config")?;
    let runner = SystemRunner::new(Some(&cwd)).with_verbosity(verbosity);
    let git_dir = Git::new(&runner, config.git_program()).common_dir();
    let config = match git_dir {
        Ok(git_dir) => config.with_repo(&git_dir).context("failed to load config")?,
        Err(e) => {
            output::debug(format!("no repo config: {}", e), verbosity);
            config
        }
    };

    Ok(Context {
        debug: cli.debug || env_debug || config.debug(),
        cwd: cli.cwd.clone(),
        quiet: cli.quiet,
        config,
        ..Context::default()
    })
}

/// Install a panic hook that reports panics as internal errors.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();
        output::error(format!("internal error at {}: {}", location, payload));
    }));
}

fn fail(err: &anyhow::Error, verbosity: Verbosity) -> ExitCode {
    report_error(err, verbosity);
    ExitCode::from(ErrorKind::classify(err).exit_code())
}

/// Print an error to stderr.
///
/// The top-level message comes first as `Error: <message>`. If a collaborator
/// produced its own message further down the chain, it follows verbatim. In
/// debug mode the full cause chain and the failure kind are shown as well.
pub fn report_error(err: &anyhow::Error, verbosity: Verbosity) {
    output::error(err);

    if let Some(message) = collaborator_message(err) {
        output::detail(message);
    }

    for cause in err.chain().skip(1) {
        output::debug(format!("caused by: {}", cause), verbosity);
    }
    output::debug(
        format!("failure kind: {}", ErrorKind::classify(err)),
        verbosity,
    );
}

/// The message git or gh printed, when the top-level error wraps it.
fn collaborator_message(err: &anyhow::Error) -> Option<&str> {
    let found = err.chain().skip(1).find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<ForgeError>() {
            return match e {
                ForgeError::ApiError { message, .. } | ForgeError::NotFound(message) => {
                    Some(message.as_str())
                }
                _ => None,
            };
        }
        match cause.downcast_ref::<GitError>() {
            Some(GitError::CommandFailed { message, .. }) => Some(message.as_str()),
            _ => None,
        }
    });
    found.filter(|message| !message.is_empty())
}
