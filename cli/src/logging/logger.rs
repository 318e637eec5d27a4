//! Console logger backed by the global tracing subscriber.
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::Log;

/// Structured logger for one command invocation.
///
/// Every message becomes a [`tracing`] event; the subscriber installed by
/// [`init_subscriber`](super::subscriber::init_subscriber) decides where it
/// is written. Warnings are counted so commands can report them at the end.
#[derive(Debug, Default)]
pub struct Logger {
    log_file: Option<PathBuf>,
    warnings: AtomicUsize,
}

impl Logger {
    /// Create a new logger.
    ///
    /// `log_file` is only remembered for display; the file itself is written
    /// by the subscriber's file layer.
    #[must_use]
    pub fn new(log_file: Option<&Path>) -> Self {
        Self {
            log_file: log_file.map(Path::to_path_buf),
            warnings: AtomicUsize::new(0),
        }
    }

    /// Return the log file path, if one was configured.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Number of warnings logged so far.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file when one is configured).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }
}

/// Implement the methods of [`Log`] by delegating to inherent methods of the
/// same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);
}
