//! The [`Log`] trait shared by every component that reports progress.

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) forwards to `tracing`; tests substitute
/// a mock or a recording implementation to assert on warnings.
#[cfg_attr(test, mockall::automock)]
pub trait Log {
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a recoverable problem; processing continues.
    fn warn(&self, msg: &str);
    /// Log an unrecoverable problem.
    fn error(&self, msg: &str);
    /// Log an action that would have been taken outside dry-run mode.
    fn dry_run(&self, msg: &str);
}
