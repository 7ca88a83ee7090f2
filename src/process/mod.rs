//! process
//!
//! The single doorway to external programs.
//!
//! # Architecture
//!
//! Both collaborators (`git` and `gh`) are reached through the [`Runner`]
//! trait: run a named program with arguments and optional stdin, capture its
//! stdout, stderr and exit code. Nothing else in the crate touches
//! `std::process` directly.
//!
//! # Modules
//!
//! - [`mock`]: Scripted runner for deterministic tests
//!
//! # Example
//!
//! ```no_run
//! use signoff::process::{Runner, SystemRunner};
//!
//! let runner = SystemRunner::new(None);
//! let output = runner.run("git", &["rev-parse", "HEAD"], None).unwrap();
//! if output.success() {
//!     println!("HEAD is {}", output.stdout.trim());
//! }
//! ```

pub mod mock;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::ui::output::{self, Verbosity};

/// Errors from spawning an external program.
///
/// A program that runs and exits non-zero is *not* an error at this layer;
/// callers inspect [`CommandOutput::status`] and decide.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The program could not be found on `PATH`.
    #[error("required tool '{program}' was not found on PATH")]
    MissingTool {
        /// The program name that was looked up
        program: String,
    },

    /// The program exists but could not be started or waited on.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// The program being run
        program: String,
        source: std::io::Error,
    },
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `-1` when the process was killed by a signal.
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            status: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed output with the given exit code and stderr.
    pub fn failed(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// The most useful diagnostic text: stderr if present, else stdout.
    pub fn message(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Capability to run external programs.
pub trait Runner {
    /// Run `program` with `args`, feeding `stdin` if given, and wait for it.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process could not be started. A non-zero
    /// exit is reported through [`CommandOutput::status`].
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&str>,
    ) -> Result<CommandOutput, ProcessError>;

    /// Resolve `program` to an executable path, if it exists.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Fail with [`ProcessError::MissingTool`] unless `program` can be located.
    fn require(&self, program: &str) -> Result<PathBuf, ProcessError> {
        self.locate(program).ok_or_else(|| ProcessError::MissingTool {
            program: program.to_string(),
        })
    }
}

/// Runner backed by real subprocesses.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    cwd: Option<PathBuf>,
    verbosity: Verbosity,
}

impl SystemRunner {
    /// Create a runner that executes in `cwd` (or the process cwd if `None`).
    pub fn new(cwd: Option<&Path>) -> Self {
        Self {
            cwd: cwd.map(Path::to_path_buf),
            verbosity: Verbosity::Normal,
        }
    }

    /// Echo every invocation and its exit code in debug mode.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

impl Runner for SystemRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&str>,
    ) -> Result<CommandOutput, ProcessError> {
        let spawn_err = |source| ProcessError::Spawn {
            program: program.to_string(),
            source,
        };

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(ref cwd) = self.cwd {
            command.current_dir(cwd);
        }

        output::debug(
            format!("running: {} {}", program, args.join(" ")),
            self.verbosity,
        );

        // NotFound also covers a missing working directory
        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound && self.locate(program).is_none() {
                ProcessError::MissingTool {
                    program: program.to_string(),
                }
            } else {
                spawn_err(e)
            }
        })?;

        if let Some(input) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                // a child that exits without reading reports through its status
                match pipe.write_all(input.as_bytes()) {
                    Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                        return Err(spawn_err(e));
                    }
                    _ => {}
                }
                // dropping the pipe closes it so the child sees EOF
            }
        }

        let output = child.wait_with_output().map_err(spawn_err)?;
        let result = CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        output::debug(
            format!("{} exited with {}", program, result.status),
            self.verbosity,
        );

        Ok(result)
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}
