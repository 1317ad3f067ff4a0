//! The temp-file backed stream and its delete-on-close lifecycle.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempstream_core::{Result, TempStreamError};
use tracing::error;
use uuid::Uuid;

use crate::logger::{CleanupLogger, NoopLogger};
use crate::options::{Access, Builder};

const CLOSED_MSG: &str = "temp file stream is closed";

/// A stream that creates a temp file to temporarily store data.
///
/// The backing file is deleted once the stream is closed or dropped, so the
/// file lives exactly as long as the stream's scope. All I/O delegates
/// directly to the underlying [`File`]; no buffering or retry is added.
///
/// Cleanup policy: callers that supplied a [`CleanupLogger`] opted into
/// best-effort teardown and observe failures via the logger; callers that
/// did not supply one get cleanup failures back from [`close`](Self::close).
pub struct TempFileStream {
    path: PathBuf,
    file: Option<File>,
    access: Access,
    logger: Arc<dyn CleanupLogger>,
    logger_supplied: bool,
    closed: bool,
}

impl TempFileStream {
    /// Open a stream with all defaults: OS temp root, create/truncate,
    /// read+write access, no cleanup logger.
    pub fn new() -> Result<Self> {
        Builder::new().open()
    }

    pub(crate) fn from_builder(builder: Builder) -> Result<Self> {
        let (root, mode, access, share, logger) = builder.into_parts();
        let dir = root.resolve()?;

        // Ensure the chosen name does not yet exist
        let mut path;
        loop {
            path = dir.join(Uuid::new_v4().to_string());
            if !path.exists() {
                break;
            }
        }

        let mut options = OpenOptions::new();
        access.apply(&mut options);
        mode.apply(&mut options);
        share.apply(&mut options);
        let file = options.open(&path).map_err(|source| TempStreamError::Open {
            path: path.clone(),
            source,
        })?;

        let logger_supplied = logger.is_some();
        Ok(Self {
            path,
            file: Some(file),
            access,
            logger: logger.unwrap_or_else(|| Arc::new(NoopLogger)),
            logger_supplied,
            closed: false,
        })
    }

    /// Absolute path of the backing file, valid while the stream is alive.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file length in bytes.
    pub fn len(&self) -> Result<u64> {
        Ok(self.file()?.metadata()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Current stream position.
    pub fn position(&mut self) -> Result<u64> {
        Ok(self.file_mut()?.stream_position()?)
    }

    /// Reposition to an absolute offset; returns the new position.
    pub fn set_position(&mut self, position: u64) -> Result<u64> {
        Ok(self.file_mut()?.seek(SeekFrom::Start(position))?)
    }

    /// Truncate or extend the backing file.
    pub fn set_len(&self, size: u64) -> Result<()> {
        Ok(self.file()?.set_len(size)?)
    }

    pub fn can_read(&self) -> bool {
        self.file.is_some() && self.access.readable()
    }

    pub fn can_write(&self) -> bool {
        self.file.is_some() && self.access.writable()
    }

    pub fn can_seek(&self) -> bool {
        self.file.is_some()
    }

    /// Close the stream and delete the backing file.
    ///
    /// The handle is released first; the delete is attempted regardless.
    /// Failures are logged and swallowed when a logger was supplied, and
    /// returned otherwise. A second `close` re-attempts the delete, and the
    /// resulting not-found failure follows the same policy.
    pub fn close(&mut self) -> Result<()> {
        self.closed = true;
        match self.release() {
            Ok(()) => Ok(()),
            Err(err) => {
                if self.logger_supplied {
                    self.logger.cleanup_error(&self.path, &err);
                    Ok(())
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Release the handle, then delete the file.
    fn release(&mut self) -> Result<()> {
        // Handle first: Windows will not unlink a file with an open handle.
        drop(self.file.take());
        fs::remove_file(&self.path).map_err(|source| TempStreamError::Cleanup {
            path: self.path.clone(),
            source,
        })
    }

    fn file(&self) -> Result<&File> {
        self.file.as_ref().ok_or(TempStreamError::Closed)
    }

    fn file_mut(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(TempStreamError::Closed)
    }

    fn io_handle(&mut self) -> io::Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, CLOSED_MSG))
    }
}

impl Read for TempFileStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.io_handle()?.read(buf)
    }
}

impl Write for TempFileStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.io_handle()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.io_handle()?.flush()
    }
}

impl Seek for TempFileStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.io_handle()?.seek(pos)
    }
}

impl Drop for TempFileStream {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.release() {
            if self.logger_supplied {
                self.logger.cleanup_error(&self.path, &err);
            } else {
                // Drop cannot propagate; leave a record instead.
                error!(path = %self.path.display(), %err, "Temp file cleanup failed in drop");
            }
        }
    }
}

impl fmt::Debug for TempFileStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TempFileStream")
            .field("path", &self.path)
            .field("access", &self.access)
            .field("closed", &self.closed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OpenMode;

    fn scratch_builder(dir: &tempfile::TempDir) -> Builder {
        Builder::new().root_dir(dir.path().join("streams"))
    }

    #[test]
    fn test_capability_flags_follow_access() {
        let dir = tempfile::tempdir().unwrap();
        let stream = scratch_builder(&dir).open().unwrap();
        assert!(stream.can_read());
        assert!(stream.can_write());
        assert!(stream.can_seek());

        let write_only = scratch_builder(&dir).access(Access::Write).open().unwrap();
        assert!(!write_only.can_read());
        assert!(write_only.can_write());
    }

    #[test]
    fn test_closed_stream_rejects_operations() {
        let dir = tempfile::tempdir().unwrap();
        let mut stream = scratch_builder(&dir).open().unwrap();
        stream.close().unwrap();

        assert!(!stream.can_read());
        assert!(!stream.can_write());
        assert!(!stream.can_seek());
        assert!(matches!(stream.len(), Err(TempStreamError::Closed)));
        assert!(matches!(stream.position(), Err(TempStreamError::Closed)));

        let err = stream.write(b"late").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[test]
    fn test_create_new_mode_opens_fresh_file() {
        let dir = tempfile::tempdir().unwrap();
        let stream = scratch_builder(&dir)
            .mode(OpenMode::CreateNew)
            .open()
            .unwrap();
        assert!(stream.path().exists());
        assert_eq!(stream.len().unwrap(), 0);
    }

    #[test]
    fn test_debug_output_shows_path_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let stream = scratch_builder(&dir).open().unwrap();
        let rendered = format!("{:?}", stream);
        assert!(rendered.contains("TempFileStream"));
        assert!(rendered.contains("closed: false"));
    }
}
