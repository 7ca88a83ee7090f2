//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version` / `-V`: Show version
//! - `--cwd <path>` / `-C <path>`: Run as if in that directory
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Sign off on commits in place of CI, and require signoff before merging
#[derive(Parser, Debug)]
#[command(name = "gh-signoff")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
With no command, signs off on the current commit (same as `create`).

EXAMPLES:
    # Sign off on HEAD after running your checks locally
    gh signoff

    # Require signoff on the default branch
    gh signoff install

    # Is signoff required on main?
    gh signoff check main")]
pub struct Cli {
    /// Run as if gh-signoff was started in this directory
    #[arg(short = 'C', long, global = true, value_name = "PATH")]
    pub cwd: Option<PathBuf>,

    /// Enable debug output (also: SIGNOFF_DEBUG=1)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Sign off even if the repository is dirty (shorthand for `create -f`)
    #[arg(short, long)]
    pub force: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    ///
    /// Returns clap's error for unknown commands and for `--help`/`--version`,
    /// so the caller decides the exit code.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Parser::try_parse()
    }

    /// The command to run, with the top-level `-f` folded into `create`.
    ///
    /// No command means `create`. A top-level `-f` alongside any other
    /// command is a usage error.
    pub fn resolve_command(&self) -> Result<Command, clap::Error> {
        match &self.command {
            None => Ok(Command::Create { force: self.force }),
            Some(Command::Create { force }) => Ok(Command::Create {
                force: *force || self.force,
            }),
            Some(_) if self.force => Err(Self::command().error(
                clap::error::ErrorKind::ArgumentConflict,
                "--force only applies to `create`",
            )),
            Some(command) => Ok(command.clone()),
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign off on the current commit
    #[command(
        name = "create",
        long_about = "Sign off on the current commit.\n\n\
            Publishes a successful `signoff` commit status for HEAD, attributed to \
            your git user.name. The working tree must be clean, the current branch \
            must track a remote branch, and every local commit must be pushed.",
        after_help = "\
EXAMPLES:
    # Sign off on HEAD
    gh signoff create

    # Sign off despite local changes or unpushed commits
    gh signoff create -f"
    )]
    Create {
        /// Skip the clean/pushed checks
        #[arg(short, long)]
        force: bool,
    },

    /// Require signoff before merging into a branch
    #[command(
        name = "install",
        long_about = "Require the `signoff` status check on a branch.\n\n\
            Replaces the branch's protection with a single non-strict required \
            check, `signoff`. Admin enforcement, review requirements and push \
            restrictions are cleared. Use --merge to keep the branch's existing \
            required checks (including the app each one is bound to), strict mode \
            and admin enforcement instead.",
        after_help = "\
EXAMPLES:
    # Protect the default branch
    gh signoff install

    # Protect a release branch, keeping its CI checks
    gh signoff install --merge release/2.0"
    )]
    Install {
        /// Branch to protect (defaults to the repository's default branch)
        branch: Option<String>,

        /// Add signoff to existing required checks instead of replacing them
        #[arg(long)]
        merge: bool,
    },

    /// Remove branch protection
    #[command(
        name = "uninstall",
        long_about = "Remove branch protection entirely.\n\n\
            Deletes the whole protection rule, not only the signoff check."
    )]
    Uninstall {
        /// Branch to unprotect (defaults to the repository's default branch)
        branch: Option<String>,
    },

    /// Check whether a branch requires signoff
    #[command(name = "check")]
    Check {
        /// Branch to check (defaults to the repository's default branch)
        branch: Option<String>,
    },

    /// Show version
    #[command(name = "version")]
    Version,

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        long_about = "Generate shell completion scripts for tab-completion.\n\n\
            Outputs a completion script for the specified shell (bash if omitted).",
        after_help = "\
EXAMPLES:
    # Bash (add to ~/.bashrc)
    gh-signoff completion bash >> ~/.bashrc

    # Zsh (add to ~/.zshrc)
    gh-signoff completion zsh >> ~/.zshrc

    # Fish
    gh-signoff completion fish > ~/.config/fish/completions/gh-signoff.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum, default_value = "bash")]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
