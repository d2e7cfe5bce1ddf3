//! Spinner, colored output, and summary formatting.
//!
//! This module provides visual feedback during a sync run: a spinner with
//! step messages in normal mode, per-step lines in verbose mode, and a
//! one-line result in quiet mode.

use crate::config::{Config, display_relative};
use crate::constants::PROGRESS_TICK_MS;
use crate::sync::{
    CommitStatus, PushStatus, SyncCallbacks, SyncOutcome, SyncReport, SyncResult, SyncStep,
};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// No-op callbacks for when progress tracking is not needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpCallbacks;

impl SyncCallbacks for NoOpCallbacks {
    fn on_step(&self, _step: &SyncStep) {}
    fn on_complete(&self, _result: &SyncResult) {}
}

/// Spinner for a sync run.
/// `None` when progress is hidden (quiet/verbose modes).
pub struct SyncProgress {
    spinner: Option<ProgressBar>,
}

impl SyncProgress {
    /// The underlying bar, for routing log output around it.
    pub fn bar(&self) -> Option<&ProgressBar> {
        self.spinner.as_ref()
    }

    pub fn update(&self, step: &SyncStep) {
        if let Some(spinner) = &self.spinner {
            spinner.set_message(format_step_message(step));
        }
    }

    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
    }
}

/// Creates the spinner for a run.
/// Returns a hidden tracker in quiet or verbose mode to avoid allocation.
#[must_use]
pub fn create_sync_progress(config: &Config) -> SyncProgress {
    let spinner = if config.is_quiet() || config.is_verbose() {
        None
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
        Some(spinner)
    };

    SyncProgress { spinner }
}

/// Callbacks for terminal runs.
/// Combines spinner updates with verbose step output.
pub struct ConsoleCallbacks {
    progress: SyncProgress,
    verbose: bool,
}

impl ConsoleCallbacks {
    pub fn new(progress: SyncProgress, config: &Config) -> Self {
        Self {
            progress,
            verbose: config.is_verbose(),
        }
    }
}

impl SyncCallbacks for ConsoleCallbacks {
    fn on_step(&self, step: &SyncStep) {
        self.progress.update(step);
        if self.verbose {
            eprintln!("  {}...", step.to_string().dimmed());
        }
    }

    fn on_complete(&self, _result: &SyncResult) {
        self.progress.finish();
    }
}

pub fn print_working_dir(path: &Path, config: &Config) {
    if config.is_quiet() {
        return;
    }
    println!(
        "{} {}",
        "Working in:".cyan(),
        path.display().to_string().white().bold()
    )
}

pub fn print_summary(result: &SyncResult, config: &Config) {
    let name = display_relative(&result.path, &config.workspace);
    if config.is_quiet() {
        print_quiet_summary(result, &name, &config.sentinel);
    } else {
        print_normal_summary(result, &name, &config.sentinel);
    }
}

fn print_quiet_summary(result: &SyncResult, name: &str, sentinel: &str) {
    let line = format_quiet_summary(result, name, sentinel);
    if result.is_success() {
        println!("{}", line);
    } else {
        eprintln!("{}", line);
    }
}

fn format_quiet_summary(result: &SyncResult, name: &str, sentinel: &str) -> String {
    match &result.outcome {
        SyncOutcome::Unchanged(count) => {
            format!("{}: unchanged ({})", name, count.render(sentinel))
        }
        SyncOutcome::Updated(report) if !report.persisted => {
            format!("{}: would update to {}", name, report.count.render(sentinel))
        }
        SyncOutcome::Updated(report) => {
            format!("{}: updated to {}", name, report.count.render(sentinel))
        }
        SyncOutcome::Failed(failure) => format!("error: {}: {}", name, failure.error),
    }
}

fn print_normal_summary(result: &SyncResult, name: &str, sentinel: &str) {
    let elapsed = format_duration(result.duration).dimmed();
    match &result.outcome {
        SyncOutcome::Unchanged(count) => {
            println!(
                "  {} {} already shows {} in {}",
                "OK".green().bold(),
                name.white(),
                count.render(sentinel).cyan(),
                elapsed
            );
        }
        SyncOutcome::Updated(report) => {
            let verb = if report.persisted {
                "updated to"
            } else {
                "would update to"
            };
            println!(
                "  {} {} {} {} in {}",
                "UPDATED".green().bold(),
                name.white(),
                verb,
                report.count.render(sentinel).cyan(),
                elapsed
            );
            if report.persisted {
                print_publish_status(report);
            }
        }
        SyncOutcome::Failed(failure) => {
            println!(
                "  {} {} {} in {}",
                "FAIL".red().bold(),
                name.white(),
                format!("at {:?}: {}", failure.step, failure.error).red(),
                elapsed
            );
        }
    }
}

fn print_publish_status(report: &SyncReport) {
    let commit = match &report.commit {
        CommitStatus::Committed => "committed".green(),
        CommitStatus::NothingToCommit => "nothing to commit".yellow(),
        CommitStatus::Failed(_) => "commit failed".red(),
        CommitStatus::Skipped => "git disabled".dimmed(),
    };
    let push = match &report.push {
        PushStatus::Pushed => "pushed".green(),
        PushStatus::Failed(_) => "push failed".red(),
        PushStatus::Skipped => "not pushed".dimmed(),
    };
    println!("    {} {}, {}", "git:".dimmed(), commit, push);
}

fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f32())
}

fn format_step_message(step: &SyncStep) -> &'static str {
    match step {
        SyncStep::Started => "Starting sync...",
        SyncStep::Reading => "Reading document...",
        SyncStep::Fetching => "Fetching citation count...",
        SyncStep::Fetched(_) => "Fetched citation count",
        SyncStep::Patched => "Patching document...",
        SyncStep::NoChange => "No changes needed",
        SyncStep::Persisting => "Writing document...",
        SyncStep::Persisted => "Document written",
        SyncStep::Committing => "Committing...",
        SyncStep::Committed => "Committed",
        SyncStep::CommitSkipped => "Commit skipped",
        SyncStep::Pushing => "Pushing to remote...",
        SyncStep::Pushed => "Pushed",
        SyncStep::PushFailed => "Push failed",
        SyncStep::Done => "Done",
    }
}
