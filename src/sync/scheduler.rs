//! Paced, sequential upload of template files.
//!
//! Every (file, locale) pair becomes one [`UploadJob`]. Jobs run one at a
//! time with a fixed pause before each dispatch, and the first rejected job
//! ends the run.

use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

#[cfg(test)]
use mockall::automock;

use super::error::{SyncError, SyncResult};
use super::locator::to_translation_name;
use crate::remote::{ImportOptions, ImportRequest, RemoteClient};

/// One upload of one template file for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub file: PathBuf,
    pub locale: String,
    pub tags: Vec<String>,
    pub hidden: bool,
}

impl UploadJob {
    /// File name sent to the service, with the translation suffix.
    pub fn upload_name(&self) -> String {
        let name = self
            .file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        to_translation_name(&name).unwrap_or(name)
    }
}

/// The ordered job list of a push. Its length is fixed at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncRun {
    jobs: Vec<UploadJob>,
}

impl SyncRun {
    /// Expand files × locales, file-major and locale-minor.
    pub fn new(files: &[PathBuf], locales: &[String], tags: &[String], hidden: bool) -> Self {
        let mut jobs = Vec::with_capacity(files.len() * locales.len());
        for file in files {
            for locale in locales {
                jobs.push(UploadJob {
                    file: file.clone(),
                    locale: locale.clone(),
                    tags: tags.to_vec(),
                    hidden,
                });
            }
        }
        Self { jobs }
    }

    pub fn jobs(&self) -> &[UploadJob] {
        &self.jobs
    }

    pub fn total(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Receives progress while a run is in flight.
#[cfg_attr(test, automock)]
pub trait ProgressReporter {
    /// Called once, before the first dispatch, with the fixed job count.
    fn start(&mut self, total: usize);

    /// Called after each successful job.
    fn advance(&mut self, completed: usize, total: usize);

    /// Called once after the last job, only when every job succeeded.
    fn finish(&mut self);
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _total: usize) {}
    fn advance(&mut self, _completed: usize, _total: usize) {}
    fn finish(&mut self) {}
}

/// Totals of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: usize,
    pub total: usize,
}

/// Dispatches a [`SyncRun`] one job at a time.
pub struct UploadScheduler {
    throttle: Duration,
    options: ImportOptions,
}

impl UploadScheduler {
    pub fn new(throttle: Duration) -> Self {
        Self {
            throttle,
            options: ImportOptions::default(),
        }
    }

    /// Run every job in order.
    ///
    /// Sleeps for the throttle interval before each dispatch, the first one
    /// included. Stops at the first failed or rejected import;
    /// uploads that already went through are not rolled back.
    pub async fn run<C, P>(
        &self,
        run: &SyncRun,
        client: &C,
        progress: &mut P,
    ) -> SyncResult<UploadSummary>
    where
        C: RemoteClient,
        P: ProgressReporter + ?Sized,
    {
        let total = run.total();
        let mut completed = 0;
        progress.start(total);

        for job in run.jobs() {
            tokio::time::sleep(self.throttle).await;

            debug!(file = %job.file.display(), locale = %job.locale, "Uploading file");
            let content = read_template(&job.file).await?;
            let result = client
                .import_file(ImportRequest {
                    content,
                    filename: job.upload_name(),
                    locale: &job.locale,
                    tags: &job.tags,
                    hidden: job.hidden,
                    options: self.options,
                })
                .await
                .map_err(|source| {
                    warn!(
                        file = %job.file.display(),
                        locale = %job.locale,
                        error = %source,
                        "Upload failed, aborting run"
                    );
                    SyncError::UploadFailed {
                        locale: job.locale.clone(),
                        file: job.file.clone(),
                        source,
                    }
                })?;

            if result.is_error() {
                warn!(
                    file = %job.file.display(),
                    locale = %job.locale,
                    message = %result.message,
                    "Upload rejected, aborting run"
                );
                return Err(SyncError::UploadRejected {
                    locale: job.locale.clone(),
                    file: job.file.clone(),
                    message: result.message,
                });
            }

            completed += 1;
            progress.advance(completed, total);
        }

        progress.finish();
        info!(uploaded = completed, "Upload run complete");
        Ok(UploadSummary {
            uploaded: completed,
            total,
        })
    }
}

async fn read_template(path: &Path) -> SyncResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|source| SyncError::ReadTemplate {
            path: path.to_path_buf(),
            source,
        })
}
