//! Directory resolution and open options for temp streams.

use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempstream_core::{Result, TempStreamError};

use crate::config::TempStreamConfig;
use crate::logger::CleanupLogger;
use crate::stream::TempFileStream;

/// Sub-folder joined onto the OS temp directory when no root is given.
pub const DEFAULT_SUBFOLDER: &str = "Temp-FileStreams";

/// Selects the directory a stream's backing file is created in.
///
/// Exactly one source is used per stream: an explicit path, a configuration
/// object naming a root folder, or the OS temp directory joined with
/// [`DEFAULT_SUBFOLDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TempRoot {
    /// OS temp directory + [`DEFAULT_SUBFOLDER`]
    OsDefault,
    /// Caller-provided directory
    Explicit(PathBuf),
    /// `root_temp_folder` from a configuration object
    Config(TempStreamConfig),
}

impl Default for TempRoot {
    fn default() -> Self {
        Self::OsDefault
    }
}

impl TempRoot {
    /// Directory this root points at, before any filesystem access.
    fn base_dir(&self) -> PathBuf {
        match self {
            TempRoot::OsDefault => env::temp_dir().join(DEFAULT_SUBFOLDER),
            TempRoot::Explicit(path) => path.clone(),
            TempRoot::Config(config) => config.root_temp_folder.clone(),
        }
    }

    /// Resolve to an absolute directory, creating it (and any missing
    /// parents) if it does not exist yet.
    pub(crate) fn resolve(&self) -> Result<PathBuf> {
        let dir = self.base_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|source| TempStreamError::Directory {
                path: dir.clone(),
                source,
            })?;
        }
        dir.canonicalize().map_err(|source| TempStreamError::Directory {
            path: dir.clone(),
            source,
        })
    }
}

/// How the backing file is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Create the file, truncating anything already at the path
    Create,
    /// Create the file, failing if the path already exists
    CreateNew,
}

impl Default for OpenMode {
    fn default() -> Self {
        Self::Create
    }
}

impl OpenMode {
    pub(crate) fn apply(self, options: &mut fs::OpenOptions) {
        match self {
            OpenMode::Create => {
                options.create(true).truncate(true);
            }
            OpenMode::CreateNew => {
                options.create_new(true);
            }
        }
    }
}

/// What the returned stream may do with the backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

impl Default for Access {
    fn default() -> Self {
        Self::ReadWrite
    }
}

impl Access {
    pub(crate) fn readable(self) -> bool {
        matches!(self, Access::Read | Access::ReadWrite)
    }

    pub(crate) fn writable(self) -> bool {
        matches!(self, Access::Write | Access::ReadWrite)
    }

    pub(crate) fn apply(self, options: &mut fs::OpenOptions) {
        options.read(self.readable()).write(self.writable());
    }
}

/// What other handles may do with the file while the stream holds it.
///
/// Only Windows enforces sharing at the OS level; on other platforms
/// concurrent handles are always allowed and this value is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMode {
    None,
    Read,
    Write,
    ReadWrite,
}

impl Default for ShareMode {
    fn default() -> Self {
        Self::ReadWrite
    }
}

impl ShareMode {
    #[cfg(windows)]
    fn flags(self) -> u32 {
        // FILE_SHARE_READ | FILE_SHARE_WRITE
        match self {
            ShareMode::None => 0,
            ShareMode::Read => 1,
            ShareMode::Write => 2,
            ShareMode::ReadWrite => 3,
        }
    }

    #[cfg(windows)]
    pub(crate) fn apply(self, options: &mut fs::OpenOptions) {
        use std::os::windows::fs::OpenOptionsExt;
        options.share_mode(self.flags());
    }

    #[cfg(not(windows))]
    pub(crate) fn apply(self, _options: &mut fs::OpenOptions) {}
}

/// Configures and opens a [`TempFileStream`].
///
/// ```no_run
/// use tempstream::Builder;
///
/// # fn main() -> tempstream::Result<()> {
/// let stream = Builder::new().root_dir("/var/tmp/scratch").open()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Builder {
    root: TempRoot,
    mode: OpenMode,
    access: Access,
    share: ShareMode,
    logger: Option<Arc<dyn CleanupLogger>>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory-resolution strategy for the backing file.
    pub fn root(mut self, root: TempRoot) -> Self {
        self.root = root;
        self
    }

    /// Shorthand for [`TempRoot::Explicit`].
    pub fn root_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.root(TempRoot::Explicit(dir.into()))
    }

    /// Shorthand for [`TempRoot::Config`].
    pub fn config(self, config: &TempStreamConfig) -> Self {
        self.root(TempRoot::Config(config.clone()))
    }

    pub fn mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    pub fn share(mut self, share: ShareMode) -> Self {
        self.share = share;
        self
    }

    /// Logger that receives cleanup failures.
    ///
    /// Supplying a logger opts into best-effort teardown: close and delete
    /// failures are logged and swallowed instead of returned from
    /// [`TempFileStream::close`].
    pub fn logger(mut self, logger: Arc<dyn CleanupLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Open the stream: resolve and create the directory, pick a fresh
    /// file name, and open the backing file.
    ///
    /// Name selection re-checks existence and regenerates until an unused
    /// name is found. The check is not atomic against other processes
    /// creating the same name in the gap; with 128-bit random names this is
    /// accepted rather than engineered away.
    pub fn open(self) -> Result<TempFileStream> {
        TempFileStream::from_builder(self)
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        TempRoot,
        OpenMode,
        Access,
        ShareMode,
        Option<Arc<dyn CleanupLogger>>,
    ) {
        (self.root, self.mode, self.access, self.share, self.logger)
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("root", &self.root)
            .field("mode", &self.mode)
            .field("access", &self.access)
            .field("share", &self.share)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_contract() {
        assert_eq!(OpenMode::default(), OpenMode::Create);
        assert_eq!(Access::default(), Access::ReadWrite);
        assert_eq!(ShareMode::default(), ShareMode::ReadWrite);
        assert_eq!(TempRoot::default(), TempRoot::OsDefault);
    }

    #[test]
    fn test_base_dir_per_variant() {
        let os_default = TempRoot::OsDefault.base_dir();
        assert!(os_default.ends_with(DEFAULT_SUBFOLDER));

        let explicit = TempRoot::Explicit(PathBuf::from("/a/b")).base_dir();
        assert_eq!(explicit, PathBuf::from("/a/b"));

        let config = TempStreamConfig::new("/cfg/root");
        assert_eq!(
            TempRoot::Config(config).base_dir(),
            PathBuf::from("/cfg/root")
        );
    }

    #[test]
    fn test_resolve_creates_missing_directories() {
        let scratch = tempfile::tempdir().unwrap();
        let nested = scratch.path().join("one").join("two");
        assert!(!nested.exists());

        let resolved = TempRoot::Explicit(nested.clone()).resolve().unwrap();
        assert!(nested.is_dir());
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_access_capabilities() {
        assert!(Access::Read.readable() && !Access::Read.writable());
        assert!(!Access::Write.readable() && Access::Write.writable());
        assert!(Access::ReadWrite.readable() && Access::ReadWrite.writable());
    }
}
