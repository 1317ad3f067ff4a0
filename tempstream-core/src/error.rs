//! Error types shared across the tempstream workspace.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while creating, using, or tearing down a temp stream.
#[derive(Error, Debug)]
pub enum TempStreamError {
    #[error("Failed to prepare temp directory '{path}': {source}")]
    Directory { path: PathBuf, source: io::Error },
    #[error("Failed to open temp file '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("Temporary file '{path}' could not be removed: {source}")]
    Cleanup { path: PathBuf, source: io::Error },
    #[error("Stream is closed")]
    Closed,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TempStreamError {
    /// Path the error refers to, when it carries one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            TempStreamError::Directory { path, .. }
            | TempStreamError::Open { path, .. }
            | TempStreamError::Cleanup { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TempStreamError>;
