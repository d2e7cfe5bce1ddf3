//! `log` backend with spinner integration.

use crate::config::Verbosity;
use indicatif::ProgressBar;
use log::Log;
use std::io::Write;

fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    }
}

/// Logger that suspends the spinner while printing so lines don't interleave.
pub struct SpinnerLogger {
    inner: env_logger::Logger,
    spinner: ProgressBar,
}

impl SpinnerLogger {
    pub fn new(inner: env_logger::Logger, spinner: ProgressBar) -> Self {
        Self { inner, spinner }
    }
}

impl Log for SpinnerLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &log::Record) {
        if self.inner.enabled(record.metadata()) {
            let line = format!("[{}] {}", level_label(record.level()), record.args());
            self.spinner.suspend(|| eprintln!("{line}"));
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Default filter for a verbosity, overridable with `RUST_LOG`.
#[must_use]
pub fn default_filter(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "warn",
        Verbosity::Normal => "info",
        Verbosity::Verbose => "debug",
    }
}

/// Initializes logging, routing through `spinner` when one is shown.
pub fn init_logging(verbosity: Verbosity, spinner: Option<&ProgressBar>) {
    let env = env_logger::Env::default().default_filter_or(default_filter(verbosity));

    if let Some(spinner) = spinner {
        let logger = env_logger::Builder::from_env(env).build();
        let max_level = logger.filter();
        if log::set_boxed_logger(Box::new(SpinnerLogger::new(logger, spinner.clone()))).is_ok() {
            log::set_max_level(max_level);
        }
    } else {
        let _ = env_logger::Builder::from_env(env)
            .format(|buf, record| writeln!(buf, "[{}] {}", level_label(record.level()), record.args()))
            .try_init();
    }
}
