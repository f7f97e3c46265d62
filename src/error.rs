/// Error types for the viewer
///
/// Only `ViewerError` is fatal. Decode and persistence errors are carried
/// as values so a triage session survives corrupt files and a flaky disk.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Startup failures that prevent the interactive session from starting
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("no images found in {0}")]
    NoImagesFound(PathBuf),

    #[error("failed to prepare output directory {path}: {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start load runtime: {0}")]
    Runtime(#[source] io::Error),

    #[error("window error: {0}")]
    Ui(#[from] iced::Error),
}

/// Per-record decode failure
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{path} has no pixels")]
    EmptyImage { path: PathBuf },
}

/// Failure to create or remove a link marker in the output directory
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to link {filename}: {source}")]
    Link {
        filename: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to unlink {filename}: {source}")]
    Unlink {
        filename: String,
        #[source]
        source: io::Error,
    },
}
