// Sync run: fetch, patch, persist, publish

use crate::citation::CitationCount;
use crate::config::{Config, GitMode};
use crate::constants::{COMMIT_MESSAGE, COMMITTER_EMAIL, COMMITTER_NAME};
use crate::error::SyncError;
use crate::git::{CommitOutcome, VersionControl};
use crate::patch::DocumentPatcher;
use crate::source::CitationSource;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStep {
    Started,
    Reading,
    Fetching,
    Fetched(CitationCount),
    Patched,
    NoChange,
    Persisting,
    Persisted,
    Committing,
    Committed,
    CommitSkipped,
    Pushing,
    Pushed,
    PushFailed,
    Done,
}

impl fmt::Display for SyncStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => f.write_str("Starting"),
            Self::Reading => f.write_str("Reading document"),
            Self::Fetching => f.write_str("Fetching citation count"),
            Self::Fetched(count) => write!(f, "Fetched citation count ({})", count),
            Self::Patched => f.write_str("Patched document"),
            Self::NoChange => f.write_str("Document already up to date"),
            Self::Persisting => f.write_str("Writing document"),
            Self::Persisted => f.write_str("Wrote document"),
            Self::Committing => f.write_str("Committing"),
            Self::Committed => f.write_str("Committed"),
            Self::CommitSkipped => f.write_str("Commit skipped"),
            Self::Pushing => f.write_str("Pushing"),
            Self::Pushed => f.write_str("Pushed"),
            Self::PushFailed => f.write_str("Push failed"),
            Self::Done => f.write_str("Done"),
        }
    }
}

/// Receives progress notifications during a run.
pub trait SyncCallbacks {
    fn on_step(&self, step: &SyncStep);
    fn on_complete(&self, result: &SyncResult);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitStatus {
    Committed,
    NothingToCommit,
    Failed(String),
    /// Git disabled or dry run.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushStatus {
    Pushed,
    Failed(String),
    Skipped,
}

#[derive(Debug)]
pub struct SyncReport {
    pub count: CitationCount,
    /// False on a dry run.
    pub persisted: bool,
    pub commit: CommitStatus,
    pub push: PushStatus,
}

#[derive(Debug)]
pub struct SyncFailure {
    pub error: SyncError,
    pub step: SyncStep,
}

#[derive(Debug)]
pub enum SyncOutcome {
    Unchanged(CitationCount),
    Updated(SyncReport),
    Failed(SyncFailure),
}

#[derive(Debug)]
pub struct SyncResult {
    pub path: PathBuf,
    pub outcome: SyncOutcome,
    pub duration: Duration,
}

impl SyncResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, SyncOutcome::Failed(_))
    }
}

fn at_step<T>(step: SyncStep, result: Result<T, SyncError>) -> Result<T, SyncFailure> {
    result.map_err(|error| SyncFailure { error, step })
}

/// Runs one sync of the configured document.
///
/// Only a missing or unreadable document, an unpatchable document, or a
/// failed write end the run with `Failed`. Version-control problems are
/// logged and recorded in the report.
pub fn run<C>(
    config: &Config,
    source: &dyn CitationSource,
    vcs: &dyn VersionControl,
    callbacks: &C,
) -> SyncResult
where
    C: SyncCallbacks + ?Sized,
{
    let start = Instant::now();
    let path = config.document_location();

    let outcome = match do_sync(config, &path, source, vcs, callbacks) {
        Ok(outcome) => outcome,
        Err(failure) => SyncOutcome::Failed(failure),
    };

    let result = SyncResult {
        path,
        outcome,
        duration: start.elapsed(),
    };
    callbacks.on_complete(&result);
    result
}

fn do_sync<C>(
    config: &Config,
    path: &Path,
    source: &dyn CitationSource,
    vcs: &dyn VersionControl,
    callbacks: &C,
) -> Result<SyncOutcome, SyncFailure>
where
    C: SyncCallbacks + ?Sized,
{
    callbacks.on_step(&SyncStep::Started);

    callbacks.on_step(&SyncStep::Reading);
    if !path.is_file() {
        return Err(SyncFailure {
            error: SyncError::FileNotFound(path.to_path_buf()),
            step: SyncStep::Reading,
        });
    }
    let original = at_step(
        SyncStep::Reading,
        std::fs::read_to_string(path).map_err(|source| SyncError::Read {
            path: path.to_path_buf(),
            source,
        }),
    )?;

    callbacks.on_step(&SyncStep::Fetching);
    let count = source.fetch();
    callbacks.on_step(&SyncStep::Fetched(count));

    let patcher = DocumentPatcher::new(config.sentinel.as_str());
    let patched = at_step(
        SyncStep::Patched,
        patcher.patch(&original, &count).map_err(SyncError::from),
    )?;
    callbacks.on_step(&SyncStep::Patched);

    if !patched.changed {
        log::info!("No changes needed for {}", path.display());
        callbacks.on_step(&SyncStep::NoChange);
        callbacks.on_step(&SyncStep::Done);
        return Ok(SyncOutcome::Unchanged(count));
    }

    if config.dry_run {
        log::info!("Dry run: {} would be updated", path.display());
        callbacks.on_step(&SyncStep::Done);
        return Ok(SyncOutcome::Updated(SyncReport {
            count,
            persisted: false,
            commit: CommitStatus::Skipped,
            push: PushStatus::Skipped,
        }));
    }

    callbacks.on_step(&SyncStep::Persisting);
    at_step(
        SyncStep::Persisting,
        write_atomically(path, &patched.text).map_err(|source| SyncError::Persist {
            path: path.to_path_buf(),
            source,
        }),
    )?;
    log::info!(
        "Updated citation count to {}",
        count.render(patcher.sentinel())
    );
    callbacks.on_step(&SyncStep::Persisted);

    let (commit, push) = match config.git {
        GitMode::Disabled => (CommitStatus::Skipped, PushStatus::Skipped),
        GitMode::Enabled { push } => publish(path, push, vcs, callbacks),
    };

    callbacks.on_step(&SyncStep::Done);
    Ok(SyncOutcome::Updated(SyncReport {
        count,
        persisted: true,
        commit,
        push,
    }))
}

/// Identity, stage, commit, push. Each step is independent and non-fatal.
fn publish<C>(
    path: &Path,
    push: bool,
    vcs: &dyn VersionControl,
    callbacks: &C,
) -> (CommitStatus, PushStatus)
where
    C: SyncCallbacks + ?Sized,
{
    if let Err(err) = vcs.configure_identity(COMMITTER_NAME, COMMITTER_EMAIL) {
        log::warn!("{:#}", err);
    }
    if let Err(err) = vcs.stage(path) {
        log::warn!("{:#}", err);
    }

    callbacks.on_step(&SyncStep::Committing);
    let commit = match vcs.commit(COMMIT_MESSAGE) {
        Ok(CommitOutcome::Committed) => {
            callbacks.on_step(&SyncStep::Committed);
            CommitStatus::Committed
        }
        Ok(CommitOutcome::NothingToCommit) => {
            log::info!("Nothing to commit");
            callbacks.on_step(&SyncStep::CommitSkipped);
            CommitStatus::NothingToCommit
        }
        Err(err) => {
            log::warn!("{:#}", err);
            callbacks.on_step(&SyncStep::CommitSkipped);
            CommitStatus::Failed(format!("{:#}", err))
        }
    };

    if !push {
        return (commit, PushStatus::Skipped);
    }

    callbacks.on_step(&SyncStep::Pushing);
    let push = match vcs.push() {
        Ok(()) => {
            callbacks.on_step(&SyncStep::Pushed);
            PushStatus::Pushed
        }
        Err(err) => {
            log::warn!("{:#}", err);
            callbacks.on_step(&SyncStep::PushFailed);
            PushStatus::Failed(format!("{:#}", err))
        }
    };

    (commit, push)
}

/// Replaces `path` with `text` via a sibling temp file and a rename, so an
/// interrupted write leaves either the old or the new document. The original
/// file's permissions carry over.
fn write_atomically(path: &Path, text: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(text.as_bytes())?;
    tmp.as_file().sync_all()?;
    if let Ok(metadata) = std::fs::metadata(path) {
        std::fs::set_permissions(tmp.path(), metadata.permissions())?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
