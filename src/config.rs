//! Configuration types for a sync run.

use crate::constants::{DEFAULT_DOCUMENT, DEFAULT_SENTINEL};
use crate::git::{self, GitLogger};
use anyhow::Context;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Where the citation count comes from, with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Scrape a public Google Scholar profile page.
    Scrape { url: String },
    /// Look up an OpenAlex author by id or ORCID.
    AuthorSearch { author_id: String },
    /// Query the Semantic Scholar academic-graph API.
    GraphApi { author_id: String },
}

/// Whether and how far the updated document is published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitMode {
    Disabled,
    Enabled { push: bool },
}

/// Runtime configuration derived from CLI arguments and the environment.
/// Immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceConfig,
    /// Target document, relative to `workspace` unless absolute.
    pub document_path: PathBuf,
    pub workspace: PathBuf,
    /// Text written when the count is unavailable.
    pub sentinel: String,
    pub git: GitMode,
    /// Fetch and patch, but leave the file and repository untouched.
    pub dry_run: bool,
    pub verbosity: Verbosity,
}

impl Config {
    /// Configuration with defaults for everything but the source and workspace.
    pub fn new(source: SourceConfig, workspace: impl Into<PathBuf>) -> Self {
        Self {
            source,
            document_path: PathBuf::from(DEFAULT_DOCUMENT),
            workspace: workspace.into(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            git: GitMode::Enabled { push: true },
            dry_run: false,
            verbosity: Verbosity::default(),
        }
    }

    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Absolute location of the target document.
    #[must_use]
    pub fn document_location(&self) -> PathBuf {
        self.workspace.join(&self.document_path)
    }

    /// Returns the appropriate git logger based on verbosity settings.
    ///
    /// Config only picks the callback; the callbacks live in the git module.
    #[must_use]
    pub fn git_logger(&self) -> GitLogger {
        if self.is_verbose() {
            git::verbose_logger
        } else {
            git::no_op_logger
        }
    }
}

/// Verbosity level for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

/// Picks the workspace: explicit flag, then the workspace environment
/// variable, then the current directory.
pub fn resolve_workspace(explicit: Option<PathBuf>, env: Option<OsString>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Some(value) = env.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    std::env::current_dir().context("Failed to determine current directory")
}

/// Display form of `path` relative to `base` when possible.
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}
