//! The [`Log`] trait shared by the CLI logger and test doubles.

/// Abstraction over logging backends.
///
/// The build steps log through `&dyn Log` so that they do not depend on the
/// global subscriber; [`Logger`](super::logger::Logger) is the production
/// implementation.
#[cfg_attr(test, mockall::automock)]
pub trait Log: Send + Sync {
    /// Log a stage header (major section).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a dry-run action message.
    fn dry_run(&self, msg: &str);
}
