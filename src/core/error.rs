//! Error types shared across the compiler and the viewer

use std::path::PathBuf;

use thiserror::Error;

/// One subtree could not be read; the scan skips it and continues
#[derive(Debug, Error)]
#[error("failed to scan {path}: {source}")]
pub struct ScanError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// A document or the manifest could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("failed to read {reference}: {source}")]
    Io {
        reference: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to write manifest {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("markdown renderer is not available")]
    RenderUnavailable,

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}
