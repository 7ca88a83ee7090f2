//! process::mock
//!
//! Scripted runner for deterministic testing.
//!
//! # Design
//!
//! Responses are registered against an argument-vector prefix. The first
//! registered rule whose program matches and whose arguments start with the
//! rule's prefix answers the call. Every invocation is recorded so tests can
//! assert what was (and was not) run.
//!
//! # Example
//!
//! ```
//! use signoff::process::mock::ScriptedRunner;
//! use signoff::process::{CommandOutput, Runner};
//!
//! let runner = ScriptedRunner::new()
//!     .on("git", &["rev-parse", "HEAD"], CommandOutput::ok("abc\n"));
//!
//! let out = runner.run("git", &["rev-parse", "HEAD"], None).unwrap();
//! assert_eq!(out.stdout, "abc\n");
//! assert_eq!(runner.invocations().len(), 1);
//! ```

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{CommandOutput, ProcessError, Runner};

/// A recorded call to [`ScriptedRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
}

impl Invocation {
    /// Render as a single command line, for assertions.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

#[derive(Debug, Clone)]
struct Rule {
    program: String,
    prefix: Vec<String>,
    output: CommandOutput,
}

#[derive(Debug, Default)]
struct ScriptedRunnerInner {
    rules: Vec<Rule>,
    missing: HashSet<String>,
    invocations: Vec<Invocation>,
}

/// Runner that answers from a script instead of spawning processes.
///
/// Unmatched calls exit 127 with a "no scripted response" message, which
/// makes an unexpected invocation show up as a failure in the code under test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<Mutex<ScriptedRunnerInner>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer calls to `program` whose arguments start with `prefix`.
    pub fn on(self, program: &str, prefix: &[&str], output: CommandOutput) -> Self {
        self.lock().rules.push(Rule {
            program: program.to_string(),
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            output,
        });
        self
    }

    /// Pretend `program` is not installed.
    pub fn without(self, program: &str) -> Self {
        self.lock().missing.insert(program.to_string());
        self
    }

    /// All invocations so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock().invocations.clone()
    }

    /// Invocations of a single program.
    pub fn invocations_of(&self, program: &str) -> Vec<Invocation> {
        self.lock()
            .invocations
            .iter()
            .filter(|inv| inv.program == program)
            .cloned()
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ScriptedRunnerInner> {
        self.inner.lock().expect("scripted runner lock poisoned")
    }
}

impl Runner for ScriptedRunner {
    fn run(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<&str>,
    ) -> Result<CommandOutput, ProcessError> {
        let mut inner = self.lock();
        inner.invocations.push(Invocation {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            stdin: stdin.map(str::to_string),
        });

        if inner.missing.contains(program) {
            return Err(ProcessError::MissingTool {
                program: program.to_string(),
            });
        }

        let matched = inner.rules.iter().find(|rule| {
            rule.program == program
                && rule.prefix.len() <= args.len()
                && rule.prefix.iter().zip(args).all(|(want, got)| want == got)
        });

        Ok(match matched {
            Some(rule) => rule.output.clone(),
            None => CommandOutput::failed(
                127,
                format!("no scripted response for: {} {}", program, args.join(" ")),
            ),
        })
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        if self.lock().missing.contains(program) {
            None
        } else {
            Some(PathBuf::from("/usr/bin").join(program))
        }
    }
}
