//! Self-deleting temp-file streams.
//!
//! A [`TempFileStream`] is a readable, writable, seekable stream backed by a
//! uniquely named file in a temp directory. The backing file is removed when
//! the stream is closed or dropped. Cleanup failures are reported through an
//! optional [`CleanupLogger`]; callers that supply no logger get the failure
//! back from [`TempFileStream::close`] instead.
//!
//! ```no_run
//! use std::io::{Read, Seek, SeekFrom, Write};
//! use tempstream::TempFileStream;
//!
//! # fn main() -> tempstream::Result<()> {
//! let mut stream = TempFileStream::new()?;
//! stream.write_all(b"scratch data")?;
//! stream.flush()?;
//! stream.seek(SeekFrom::Start(0))?;
//! let mut contents = String::new();
//! stream.read_to_string(&mut contents)?;
//! // Dropping the stream deletes the backing file.
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod logger;
pub mod options;
pub mod stream;

pub use config::TempStreamConfig;
pub use logger::{CleanupLogger, NoopLogger, TracingLogger};
pub use options::{Access, Builder, OpenMode, ShareMode, TempRoot};
pub use stream::TempFileStream;

pub use tempstream_core::{Result, TempStreamError};
