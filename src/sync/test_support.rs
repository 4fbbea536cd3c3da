//! Fakes shared by the sync tests.

use std::io::{Cursor, Write};
use std::sync::Mutex;
use tokio::time::Instant;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::remote::{
    BundleRef, ImportRequest, ImportResult, ImportStatus, RemoteClient, RemoteError, RemoteResult,
};

#[derive(Debug, Clone)]
pub struct RecordedImport {
    pub filename: String,
    pub locale: String,
    pub tags: Vec<String>,
    pub hidden: bool,
    pub content: Vec<u8>,
    pub at: Instant,
}

/// Scriptable in-memory [`RemoteClient`] that records every call.
#[derive(Default)]
pub struct FakeClient {
    /// Returned by `export_bundle`; `None` means the response had no bundle.
    pub bundle_url: Option<String>,
    /// Returned by `download`; `None` means HTTP 404.
    pub archive: Option<Vec<u8>>,
    /// Zero-based import call that the service rejects.
    pub reject_at: Option<usize>,
    /// Zero-based import call that fails in transport.
    pub fail_at: Option<usize>,
    pub exports: Mutex<Vec<Vec<String>>>,
    pub downloads: Mutex<Vec<String>>,
    pub imports: Mutex<Vec<RecordedImport>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import_calls(&self) -> Vec<RecordedImport> {
        self.imports.lock().unwrap().clone()
    }

    pub fn export_calls(&self) -> Vec<Vec<String>> {
        self.exports.lock().unwrap().clone()
    }
}

impl RemoteClient for FakeClient {
    async fn export_bundle(&self, locales: &[String]) -> RemoteResult<BundleRef> {
        self.exports.lock().unwrap().push(locales.to_vec());
        match &self.bundle_url {
            Some(url) => Ok(BundleRef {
                download_url: url.clone(),
            }),
            None => Err(RemoteError::MissingBundle),
        }
    }

    async fn import_file(&self, request: ImportRequest<'_>) -> RemoteResult<ImportResult> {
        let index = {
            let mut imports = self.imports.lock().unwrap();
            imports.push(RecordedImport {
                filename: request.filename.clone(),
                locale: request.locale.to_string(),
                tags: request.tags.to_vec(),
                hidden: request.hidden,
                content: request.content.clone(),
                at: Instant::now(),
            });
            imports.len() - 1
        };

        if self.fail_at == Some(index) {
            return Err(RemoteError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        if self.reject_at == Some(index) {
            return Ok(ImportResult {
                status: ImportStatus::Error,
                message: "Invalid file format".to_string(),
            });
        }
        Ok(ImportResult {
            status: ImportStatus::Success,
            message: "OK".to_string(),
        })
    }

    async fn download(&self, url: &str) -> RemoteResult<Vec<u8>> {
        self.downloads.lock().unwrap().push(url.to_string());
        match &self.archive {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(RemoteError::Status {
                status: 404,
                message: "Not Found".to_string(),
            }),
        }
    }
}

/// Build an in-memory zip. Names ending in `/` become directories.
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, SimpleFileOptions::default())
                .unwrap();
        } else {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Entry names of a zip file on disk, in archive order.
pub fn zip_entry_names(path: &std::path::Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(std::fs::File::open(path).unwrap()).unwrap();
    archive.file_names().map(String::from).collect()
}
