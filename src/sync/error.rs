use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

use crate::remote::RemoteError;

/// Errors that abort a pull or push run.
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Remote(#[from] RemoteError),

    #[error("Could not download translations file from {url} (HTTP {status})")]
    #[diagnostic(code(lokalise::sync::download))]
    Download { url: String, status: u16 },

    #[error("Failed to extract bundle: {message}")]
    #[diagnostic(code(lokalise::sync::extraction))]
    Extraction { message: String },

    #[error("{locale} - Could not upload file {}: {message}", .file.display())]
    #[diagnostic(
        code(lokalise::sync::upload_rejected),
        help("Files uploaded before this one were kept. Fix the file and run push again.")
    )]
    UploadRejected {
        locale: String,
        file: PathBuf,
        message: String,
    },

    #[error("{locale} - Could not upload file {}", .file.display())]
    #[diagnostic(
        code(lokalise::sync::upload_failed),
        help("Files uploaded before this one were kept. Run push again once the service is reachable.")
    )]
    UploadFailed {
        locale: String,
        file: PathBuf,
        #[source]
        source: RemoteError,
    },

    #[error("Failed to read template {}", .path.display())]
    #[diagnostic(code(lokalise::sync::read_template))]
    ReadTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(lokalise::sync::io))]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for SyncError {
    fn from(e: zip::result::ZipError) -> Self {
        SyncError::Extraction {
            message: e.to_string(),
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
