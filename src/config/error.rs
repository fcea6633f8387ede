use std::path::PathBuf;
use thiserror::Error;

use crate::config::manifest::ManifestError;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Manifest file does not exist.
    #[error("Manifest file not found: {0}")]
    NotFound(PathBuf),
    /// Manifest content is malformed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
