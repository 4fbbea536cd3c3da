//! Bundle download, entry renaming and extraction.
//!
//! Lokalise exports gettext files with the template suffix. Renaming the
//! entries inside the archive before extracting lets one recursive extract
//! drop `.po` files straight into the per-locale folders the bundle already
//! encodes.

use chrono::Utc;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};
use zip::{ZipArchive, ZipWriter};

use super::error::{SyncError, SyncResult};
use super::locator::to_translation_name;
use crate::remote::{RemoteClient, RemoteError};

/// What an extraction left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// Location of the temporary archive. It no longer exists once returned.
    pub archive_path: PathBuf,
    /// Entry names written to the destination, sorted.
    pub entries: Vec<String>,
    /// Number of entries renamed to the translation suffix.
    pub renamed: usize,
}

/// Downloads bundles into the temp directory and unpacks them.
pub struct ArchiveProcessor {
    temp_dir: PathBuf,
}

impl ArchiveProcessor {
    pub fn new() -> Self {
        Self {
            temp_dir: std::env::temp_dir(),
        }
    }

    /// Create a processor that stages archives in a custom directory (for testing).
    pub fn with_temp_dir(temp_dir: PathBuf) -> Self {
        Self { temp_dir }
    }

    /// Download, rename and extract in one go.
    pub async fn process<C: RemoteClient>(
        &self,
        client: &C,
        download_url: &str,
        destination: &Path,
    ) -> SyncResult<ExtractionResult> {
        let archive = self.download(client, download_url).await?;
        self.extract(archive, destination)
    }

    /// Fetch the bundle into a timestamped temp file.
    ///
    /// The file is removed when the returned handle is dropped.
    #[instrument(skip(self, client))]
    pub async fn download<C: RemoteClient>(
        &self,
        client: &C,
        download_url: &str,
    ) -> SyncResult<NamedTempFile> {
        info!("Starting download of {}", download_url);

        let bytes = client.download(download_url).await.map_err(|e| match e {
            RemoteError::Status { status, .. } => SyncError::Download {
                url: download_url.to_string(),
                status,
            },
            other => SyncError::Remote(other),
        })?;

        let stamp = Utc::now().format("%Y-%m-%d.%H.%M.%S");
        let mut archive = tempfile::Builder::new()
            .prefix(&format!("translations_{}_", stamp))
            .suffix(".zip")
            .tempfile_in(&self.temp_dir)?;
        archive.as_file_mut().write_all(&bytes)?;
        archive.as_file_mut().flush()?;

        info!(
            path = %archive.path().display(),
            size = bytes.len(),
            "Successfully downloaded bundle file"
        );
        Ok(archive)
    }

    /// Rename template entries, extract everything into `destination`, then
    /// delete the temp archive whether or not extraction succeeded.
    #[instrument(skip(self, archive), fields(archive = %archive.path().display()))]
    pub fn extract(
        &self,
        archive: NamedTempFile,
        destination: &Path,
    ) -> SyncResult<ExtractionResult> {
        let archive_path = archive.path().to_path_buf();

        let outcome = rename_template_entries(&archive_path).and_then(|renamed| {
            extract_archive(&archive_path, destination).map(|entries| (renamed, entries))
        });

        match archive.close() {
            Ok(()) => debug!("Deleted bundle file"),
            Err(e) => warn!(error = %e, "Could not delete bundle file"),
        }

        let (renamed, entries) = outcome?;
        info!(
            entries = entries.len(),
            renamed,
            destination = %destination.display(),
            "Extracted bundle file"
        );

        Ok(ExtractionResult {
            archive_path,
            entries,
            renamed,
        })
    }
}

impl Default for ArchiveProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite the archive at `path` so every `*.pot` entry is named `*.po`.
///
/// Entries are copied raw, so only the name table changes. The archive is
/// left untouched when nothing needs renaming.
pub fn rename_template_entries(path: &Path) -> SyncResult<usize> {
    let file = File::open(path).map_err(|e| SyncError::Extraction {
        message: format!("could not open {}: {}", path.display(), e),
    })?;
    let mut archive = ZipArchive::new(file)?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut renamed = 0;

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        match to_translation_name(entry.name()) {
            Some(name) => {
                debug!(from = entry.name(), to = %name, "Renaming entry");
                writer.raw_copy_file_rename(entry, name)?;
                renamed += 1;
            }
            None => writer.raw_copy_file(entry)?,
        }
    }

    if renamed == 0 {
        return Ok(0);
    }

    let rewritten = writer.finish()?.into_inner();
    drop(archive);
    std::fs::write(path, rewritten).map_err(|e| SyncError::Extraction {
        message: format!("could not rewrite {}: {}", path.display(), e),
    })?;

    Ok(renamed)
}

/// Extract every entry of the archive at `path`, overwriting existing files.
pub fn extract_archive(path: &Path, destination: &Path) -> SyncResult<Vec<String>> {
    // Reopen so the renamed name table is what gets extracted
    let file = File::open(path).map_err(|e| SyncError::Extraction {
        message: format!("could not open {}: {}", path.display(), e),
    })?;
    let mut archive = ZipArchive::new(file)?;

    std::fs::create_dir_all(destination).map_err(|e| SyncError::Extraction {
        message: format!("could not create {}: {}", destination.display(), e),
    })?;
    archive.extract(destination)?;

    let mut entries: Vec<String> = archive.file_names().map(String::from).collect();
    entries.sort();
    Ok(entries)
}
