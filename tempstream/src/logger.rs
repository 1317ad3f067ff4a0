//! Pluggable logging for cleanup failures.

use std::path::Path;

use tempstream_core::TempStreamError;
use tracing::error;

/// Receives cleanup failures from a stream's teardown path.
///
/// Implementations must be callable from many streams at once: a single
/// logger is typically shared (via `Arc`) across every stream a program
/// creates, and teardown may run on whatever thread drops the stream.
pub trait CleanupLogger: Send + Sync {
    /// Record that the file at `path` could not be cleaned up.
    fn cleanup_error(&self, path: &Path, error: &TempStreamError);
}

/// Does nothing. Installed internally when the caller supplies no logger,
/// so the teardown path never branches on logger absence.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl CleanupLogger for NoopLogger {
    fn cleanup_error(&self, _path: &Path, _error: &TempStreamError) {}
}

/// Forwards cleanup failures to the `tracing` error stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl CleanupLogger for TracingLogger {
    fn cleanup_error(&self, path: &Path, error: &TempStreamError) {
        error!(path = %path.display(), %error, "Temp file cleanup failed");
    }
}
