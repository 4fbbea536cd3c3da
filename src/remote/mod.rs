//! Remote translation service.
//!
//! [`RemoteClient`] is the seam between the sync pipelines and the network.
//! [`LokaliseClient`] talks to the real service; tests substitute a fake.

mod client;
mod error;

pub use client::LokaliseClient;
pub use error::{RemoteError, RemoteResult};

use serde::Deserialize;
use std::future::Future;

/// Handle to an exported bundle. Only valid for the pull that requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRef {
    pub download_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Success,
    Error,
}

/// Outcome of a single file import as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub status: ImportStatus,
    pub message: String,
}

impl ImportResult {
    pub fn is_error(&self) -> bool {
        self.status == ImportStatus::Error
    }
}

/// Merge behaviour flags sent with every import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Overwrite existing translations.
    pub replace: bool,
    /// Fill empty translations with the key.
    pub fill_empty: bool,
    /// Treat identical keys with different context as distinct.
    pub distinguish: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            replace: false,
            fill_empty: false,
            distinguish: true,
        }
    }
}

/// One file upload for one locale.
#[derive(Debug, Clone)]
pub struct ImportRequest<'a> {
    pub content: Vec<u8>,
    /// Name the service sees, already carrying the translation extension.
    pub filename: String,
    pub locale: &'a str,
    pub tags: &'a [String],
    pub hidden: bool,
    pub options: ImportOptions,
}

/// Typed operations against the translation service.
///
/// No implementation retries. A failed call surfaces to the caller as-is.
pub trait RemoteClient {
    /// Request a bundle export. An empty `locales` slice means all locales.
    fn export_bundle(
        &self,
        locales: &[String],
    ) -> impl Future<Output = RemoteResult<BundleRef>> + Send;

    /// Upload one file for one locale.
    fn import_file(
        &self,
        request: ImportRequest<'_>,
    ) -> impl Future<Output = RemoteResult<ImportResult>> + Send;

    /// Fetch the raw bytes behind a download URL.
    fn download(&self, url: &str) -> impl Future<Output = RemoteResult<Vec<u8>>> + Send;
}
