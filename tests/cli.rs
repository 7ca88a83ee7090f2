//! End-to-end tests for the gh-signoff binary.
//!
//! Each test runs the real binary against a real git repository that tracks
//! a local bare remote. `gh` is replaced by a shell script on `PATH`:
//!
//! - `GH_MOCK_OUTPUT` is printed to stdout for every call
//! - `GH_MOCK_EXIT_CODE` is the exit code for every call (default 0)
//! - every argument line is appended to `GH_MOCK_LOG`

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FAKE_GH: &str = r#"#!/bin/sh
if [ -n "$GH_MOCK_LOG" ]; then
    echo "$*" >> "$GH_MOCK_LOG"
fi
cat > /dev/null
printf '%s' "$GH_MOCK_OUTPUT"
exit "${GH_MOCK_EXIT_CODE:-0}"
"#;

// =============================================================================
// Test Fixtures
// =============================================================================

/// A working repository with `origin` pointing at a bare repository,
/// `main` pushed and tracking `origin/main`.
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let work = dir.path().join("work");
        let remote = dir.path().join("remote.git");
        fs::create_dir_all(&work).unwrap();

        run_git(dir.path(), &["init", "--bare", remote.to_str().unwrap()]);
        run_git(&work, &["init", "-b", "main"]);
        run_git(&work, &["config", "user.email", "test@example.com"]);
        run_git(&work, &["config", "user.name", "Test User"]);
        run_git(&work, &["config", "commit.gpgsign", "false"]);

        fs::write(work.join("README.md"), "# Test Repo\n").unwrap();
        run_git(&work, &["add", "README.md"]);
        run_git(&work, &["commit", "-m", "Initial commit"]);
        run_git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);
        run_git(&work, &["push", "-u", "origin", "main"]);

        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    fn commit(&self, filename: &str, message: &str) {
        fs::write(self.path().join(filename), message).unwrap();
        run_git(&self.path(), &["add", filename]);
        run_git(&self.path(), &["commit", "-m", message]);
    }

    /// Write the per-repository config under the shared git dir.
    fn write_config(&self, contents: &str) {
        let dir = self.path().join(".git/gh-signoff");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), contents).unwrap();
    }

    fn head_sha(&self) -> String {
        let output = StdCommand::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(self.path())
            .output()
            .expect("git rev-parse failed");
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }
}

fn run_git(dir: &Path, args: &[&str]) {
    let status = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .output()
        .expect("failed to run git");
    assert!(
        status.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&status.stderr)
    );
}

/// A directory holding the fake `gh`, an isolated home and the call log.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let bin = dir.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();

        let gh = bin.join("gh");
        fs::write(&gh, FAKE_GH).unwrap();
        fs::set_permissions(&gh, fs::Permissions::from_mode(0o755)).unwrap();

        Self { dir }
    }

    fn bin(&self) -> PathBuf {
        self.dir.path().join("bin")
    }

    fn log_path(&self) -> PathBuf {
        self.dir.path().join("gh.log")
    }

    /// Argument lines the fake `gh` was called with.
    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// The binary, run in `cwd`, with the fake `gh` first on `PATH`.
    fn signoff(&self, cwd: &Path) -> Command {
        let path = format!(
            "{}:{}",
            self.bin().display(),
            std::env::var("PATH").unwrap_or_default()
        );
        let home = self.dir.path().join("home");

        let mut cmd = Command::cargo_bin("gh-signoff").unwrap();
        cmd.current_dir(cwd)
            .env("PATH", path)
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", &home)
            .env("GIT_CONFIG_NOSYSTEM", "1")
            .env("GH_MOCK_LOG", self.log_path())
            .env_remove("SIGNOFF_DEBUG")
            .env_remove("SIGNOFF_CONFIG")
            .env_remove("GH_MOCK_OUTPUT")
            .env_remove("GH_MOCK_EXIT_CODE");
        cmd
    }
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_main_requires_signoff() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .args(["check", "main"])
        .env(
            "GH_MOCK_OUTPUT",
            r#"{"required_status_checks":{"contexts":["signoff"]}}"#,
        )
        .assert()
        .success()
        .stdout("✓ GitHub main branch requires signoff\n");

    assert_eq!(
        sandbox.calls(),
        vec!["api repos/{owner}/{repo}/branches/main/protection"]
    );
}

#[test]
fn check_other_contexts_does_not_require() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .args(["check", "main"])
        .env(
            "GH_MOCK_OUTPUT",
            r#"{"required_status_checks":{"contexts":["ci/build"]}}"#,
        )
        .assert()
        .success()
        .stdout("✗ GitHub main branch does not require signoff\n");
}

#[test]
fn check_unprotected_branch_exits_zero() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .args(["check", "main"])
        .env("GH_MOCK_OUTPUT", "gh: Branch not protected (HTTP 404)")
        .env("GH_MOCK_EXIT_CODE", "1")
        .assert()
        .success()
        .stdout("✗ GitHub main branch does not require signoff\n");
}

// =============================================================================
// create
// =============================================================================

#[test]
fn create_on_clean_repository() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    let sha = repo.head_sha();

    sandbox
        .signoff(&repo.path())
        .arg("create")
        .env("GH_MOCK_OUTPUT", "{}")
        .assert()
        .success()
        .stdout(format!("✓ Test User signed off on {}\n", &sha[..7]));

    assert_eq!(
        sandbox.calls(),
        vec![format!(
            "api --method POST repos/{{owner}}/{{repo}}/statuses/{} -f state=success \
             -f context=signoff -f description=Test User signed off",
            sha
        )]
    );
}

#[test]
fn no_command_means_create() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Test User signed off on"));

    assert_eq!(sandbox.calls().len(), 1);
}

#[test]
fn create_status_failure() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .arg("create")
        .env("GH_MOCK_EXIT_CODE", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: failed to create status\n"));

    assert_eq!(sandbox.calls().len(), 1);
}

#[test]
fn create_status_failure_shows_gh_message() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .arg("create")
        .env("GH_MOCK_OUTPUT", "gh: Resource not accessible by integration (HTTP 403)")
        .env("GH_MOCK_EXIT_CODE", "1")
        .assert()
        .code(1)
        .stderr(
            "Error: failed to create status\n\
             gh: Resource not accessible by integration (HTTP 403)\n",
        );
}

#[test]
fn dirty_repository_is_rejected() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    fs::write(repo.path().join("scratch.txt"), "wip").unwrap();

    sandbox
        .signoff(&repo.path())
        .arg("create")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: can't sign off on a dirty repository (1 uncommitted change(s))",
        ));

    assert!(sandbox.calls().is_empty());
}

#[test]
fn force_signs_off_dirty_repository() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    fs::write(repo.path().join("scratch.txt"), "wip").unwrap();

    sandbox
        .signoff(&repo.path())
        .args(["create", "-f"])
        .assert()
        .success();

    assert_eq!(sandbox.calls().len(), 1);
}

#[test]
fn bare_force_flag_is_create() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    fs::write(repo.path().join("scratch.txt"), "wip").unwrap();

    sandbox
        .signoff(&repo.path())
        .arg("-f")
        .assert()
        .success()
        .stdout(predicate::str::contains("signed off on"));
}

#[test]
fn unpushed_commits_are_rejected() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    repo.commit("feature.txt", "Add feature");

    sandbox
        .signoff(&repo.path())
        .arg("create")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "can't sign off with 1 unpushed commit(s); push to origin/main first",
        ));

    assert!(sandbox.calls().is_empty());
}

#[test]
fn untracked_branch_is_rejected() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    run_git(&repo.path(), &["checkout", "-b", "topic"]);

    sandbox
        .signoff(&repo.path())
        .arg("create")
        .assert()
        .code(1)
        .stderr("Error: current branch is not tracking a remote branch\n");

    assert!(sandbox.calls().is_empty());
}

#[test]
fn cwd_flag_selects_repository() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    let elsewhere = TempDir::new().unwrap();

    sandbox
        .signoff(elsewhere.path())
        .arg("-C")
        .arg(repo.path())
        .arg("create")
        .assert()
        .success();

    assert_eq!(sandbox.calls().len(), 1);
}

#[test]
fn outside_a_repository() {
    let sandbox = Sandbox::new();
    let elsewhere = TempDir::new().unwrap();

    sandbox
        .signoff(elsewhere.path())
        .arg("create")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a git repository"));

    assert!(sandbox.calls().is_empty());
}

// =============================================================================
// install / uninstall
// =============================================================================

#[test]
fn install_named_branch() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .args(["install", "main"])
        .env("GH_MOCK_OUTPUT", "{}")
        .assert()
        .success()
        .stdout("✓ GitHub main branch now requires signoff\n");

    assert_eq!(
        sandbox.calls(),
        vec!["api --method PUT repos/{owner}/{repo}/branches/main/protection --input -"]
    );
}

#[test]
fn install_resolves_default_branch() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .arg("install")
        .env("GH_MOCK_OUTPUT", r#"{"default_branch":"trunk"}"#)
        .assert()
        .success()
        .stdout("✓ GitHub trunk branch now requires signoff\n");

    assert_eq!(
        sandbox.calls(),
        vec![
            "api repos/{owner}/{repo}",
            "api --method PUT repos/{owner}/{repo}/branches/trunk/protection --input -",
        ]
    );
}

#[test]
fn install_failure() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .args(["install", "main"])
        .env("GH_MOCK_EXIT_CODE", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: failed to set branch protection"));
}

const PROTECTED_CI: &str = r#"{"required_status_checks":{"strict":true,"contexts":["ci"]}}"#;

const MERGE_CALLS: [&str; 2] = [
    "api repos/{owner}/{repo}/branches/main/protection",
    "api --method PUT repos/{owner}/{repo}/branches/main/protection --input -",
];

#[test]
fn repo_config_applies_in_subdirectory() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    repo.write_config("[install]\nmerge = true\n");
    let nested = repo.path().join("src");
    fs::create_dir_all(&nested).unwrap();

    sandbox
        .signoff(&nested)
        .args(["install", "main"])
        .env("GH_MOCK_OUTPUT", PROTECTED_CI)
        .assert()
        .success();

    assert_eq!(sandbox.calls(), MERGE_CALLS);
}

#[test]
fn repo_config_applies_in_linked_worktree() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    repo.write_config("[install]\nmerge = true\n");
    let worktree = repo.dir.path().join("wt");
    run_git(
        &repo.path(),
        &["worktree", "add", "-b", "wt", worktree.to_str().unwrap()],
    );

    sandbox
        .signoff(&worktree)
        .args(["install", "main"])
        .env("GH_MOCK_OUTPUT", PROTECTED_CI)
        .assert()
        .success();

    assert_eq!(sandbox.calls(), MERGE_CALLS);
}

#[test]
fn missing_cwd_directory_is_not_a_missing_tool() {
    let sandbox = Sandbox::new();
    let elsewhere = TempDir::new().unwrap();
    let gone = elsewhere.path().join("gone");

    sandbox
        .signoff(elsewhere.path())
        .arg("-C")
        .arg(&gone)
        .arg("check")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(format!(
            "Error: directory '{}' does not exist",
            gone.display()
        )))
        .stderr(predicate::str::contains("not found").not());

    assert!(sandbox.calls().is_empty());
}

#[test]
fn default_branch_failure() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .arg("uninstall")
        .env("GH_MOCK_EXIT_CODE", "1")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: failed to get default branch"));

    assert_eq!(sandbox.calls(), vec!["api repos/{owner}/{repo}"]);
}

#[test]
fn uninstall_named_branch() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .args(["uninstall", "main"])
        .assert()
        .success()
        .stdout("✓ GitHub main branch no longer requires signoff\n");

    assert_eq!(
        sandbox.calls(),
        vec!["api --method DELETE repos/{owner}/{repo}/branches/main/protection"]
    );
}

// =============================================================================
// Tooling and dispatcher
// =============================================================================

#[test]
fn missing_gh_is_reported() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();
    let only_git = TempDir::new().unwrap();
    let git = which::which("git").expect("git must be installed to run these tests");
    std::os::unix::fs::symlink(git, only_git.path().join("git")).unwrap();

    sandbox
        .signoff(&repo.path())
        .env("PATH", only_git.path())
        .arg("create")
        .assert()
        .code(1)
        .stderr("Error: required tool 'gh' was not found on PATH\n");
}

#[test]
fn version_command() {
    let sandbox = Sandbox::new();

    sandbox
        .signoff(sandbox.dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(format!("gh-signoff {}\n", env!("CARGO_PKG_VERSION")));
}

#[test]
fn completion_defaults_to_bash() {
    let sandbox = Sandbox::new();

    sandbox
        .signoff(sandbox.dir.path())
        .arg("completion")
        .assert()
        .success()
        .stdout(predicate::str::contains("complete").and(predicate::str::contains("gh-signoff")));
}

#[test]
fn help_exits_zero() {
    let sandbox = Sandbox::new();

    sandbox
        .signoff(sandbox.dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn unknown_command_exits_one() {
    let sandbox = Sandbox::new();

    sandbox
        .signoff(sandbox.dir.path())
        .arg("frobnicate")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));

    assert!(sandbox.calls().is_empty());
}

#[test]
fn force_with_other_command_is_a_usage_error() {
    let sandbox = Sandbox::new();

    sandbox
        .signoff(sandbox.dir.path())
        .args(["-f", "check", "main"])
        .assert()
        .code(1);

    assert!(sandbox.calls().is_empty());
}

#[test]
fn debug_env_logs_invocations() {
    let repo = TestRepo::new();
    let sandbox = Sandbox::new();

    sandbox
        .signoff(&repo.path())
        .args(["check", "main"])
        .env("SIGNOFF_DEBUG", "1")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "[debug] running: gh api repos/{owner}/{repo}/branches/main/protection",
        ));
}
