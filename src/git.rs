//! Git command wrappers.
//!
//! This module provides a thin wrapper around the git CLI and the
//! [`VersionControl`] seam the sync run publishes through.

use anyhow::Context;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Callback invoked before each git command runs.
pub type GitLogger = fn(&Path, &[&str]);

pub fn verbose_logger(_repo: &Path, args: &[&str]) {
    eprintln!("    {}", format!("$ git {}", args.join(" ")).dimmed());
}

pub fn no_op_logger(_repo: &Path, _args: &[&str]) {}

pub fn run_git(repo: &Path, args: &[&str]) -> anyhow::Result<String> {
    let output = std::process::Command::new("git")
        .current_dir(repo)
        .args(args)
        .output()
        .context("Failed to spawn git command")?;

    if output.status.success() {
        let result = String::from_utf8_lossy(&output.stdout);
        Ok(result.as_ref().trim().to_string())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        let detail = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        anyhow::bail!("git {} failed: {}", args.join(" "), detail)
    }
}

/// Result of a commit attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    NothingToCommit,
}

/// Version-control operations used to publish an updated document.
///
/// Every method is best-effort from the caller's point of view.
pub trait VersionControl {
    fn configure_identity(&self, name: &str, email: &str) -> anyhow::Result<()>;
    fn stage(&self, path: &Path) -> anyhow::Result<()>;
    fn commit(&self, message: &str) -> anyhow::Result<CommitOutcome>;
    fn push(&self) -> anyhow::Result<()>;
}

/// [`VersionControl`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo: PathBuf,
    logger: GitLogger,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>, logger: GitLogger) -> Self {
        Self {
            repo: repo.into(),
            logger,
        }
    }

    fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        (self.logger)(&self.repo, args);
        run_git(&self.repo, args)
    }

    fn has_staged_changes(&self) -> anyhow::Result<bool> {
        (self.logger)(&self.repo, &["diff", "--cached", "--quiet"]);
        let status = std::process::Command::new("git")
            .current_dir(&self.repo)
            .args(["diff", "--cached", "--quiet"])
            .status()
            .context("Failed to spawn git command")?;
        match status.code() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => anyhow::bail!("git diff --cached --quiet failed: {}", status),
        }
    }
}

fn validate_identity_field(field: &str, value: &str) -> anyhow::Result<()> {
    if value.trim().is_empty() || value.contains('\0') || value.contains('\n') {
        anyhow::bail!("Invalid committer {}: {:?}", field, value);
    }
    Ok(())
}

impl VersionControl for GitCli {
    /// Writes the committer identity to the repository-local config.
    fn configure_identity(&self, name: &str, email: &str) -> anyhow::Result<()> {
        validate_identity_field("name", name)?;
        validate_identity_field("email", email)?;
        self.run(&["config", "user.name", name])
            .context("Failed to set committer name")?;
        self.run(&["config", "user.email", email])
            .context("Failed to set committer email")?;
        Ok(())
    }

    fn stage(&self, path: &Path) -> anyhow::Result<()> {
        let path = path.to_str().context("Path is not valid UTF-8")?;
        self.run(&["add", "--", path])
            .with_context(|| format!("Failed to stage '{}'", path))?;
        Ok(())
    }

    fn commit(&self, message: &str) -> anyhow::Result<CommitOutcome> {
        if !self.has_staged_changes()? {
            return Ok(CommitOutcome::NothingToCommit);
        }
        self.run(&["commit", "-m", message])
            .context("Failed to commit changes")?;
        Ok(CommitOutcome::Committed)
    }

    fn push(&self) -> anyhow::Result<()> {
        self.run(&["push"]).context("Failed to push to remote")?;
        Ok(())
    }
}
