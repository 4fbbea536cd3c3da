//! Push: upload every local template for every requested locale.

use std::path::PathBuf;
use tracing::{info, instrument};

use super::error::SyncResult;
use super::locator::find_templates;
use super::scheduler::{ProgressReporter, SyncRun, UploadScheduler};
use crate::config::ProjectConfig;
use crate::remote::RemoteClient;

/// What the caller asked for on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushRequest {
    /// Target locales. Empty means the project's default locale.
    pub locales: Vec<String>,
    pub tags: Vec<String>,
    pub hidden: bool,
}

/// Result of a completed push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushSummary {
    pub files: Vec<PathBuf>,
    pub locales: Vec<String>,
    pub uploaded: usize,
}

/// Fall back to the default locale when none were requested.
pub fn resolve_locales(requested: &[String], default_locale: &str) -> Vec<String> {
    if requested.is_empty() {
        vec![default_locale.to_string()]
    } else {
        requested.to_vec()
    }
}

pub struct PushOrchestrator<'a, C: RemoteClient> {
    client: &'a C,
    project: &'a ProjectConfig,
    locale_paths: Vec<PathBuf>,
    scheduler: UploadScheduler,
}

impl<'a, C: RemoteClient> PushOrchestrator<'a, C> {
    pub fn new(
        client: &'a C,
        project: &'a ProjectConfig,
        locale_paths: Vec<PathBuf>,
        scheduler: UploadScheduler,
    ) -> Self {
        Self {
            client,
            project,
            locale_paths,
            scheduler,
        }
    }

    /// Locate templates, expand them across locales and upload them.
    ///
    /// Finding no templates is a successful push with nothing uploaded.
    #[instrument(skip(self, progress), fields(project = %self.project.project_id))]
    pub async fn push<P>(&self, request: &PushRequest, progress: &mut P) -> SyncResult<PushSummary>
    where
        P: ProgressReporter + ?Sized,
    {
        let locales = resolve_locales(&request.locales, &self.project.default_locale);
        let files = find_templates(&self.locale_paths)?;
        info!(
            files = files.len(),
            locales = ?locales,
            "Located template files"
        );

        let run = SyncRun::new(&files, &locales, &request.tags, request.hidden);
        let summary = self.scheduler.run(&run, self.client, progress).await?;

        Ok(PushSummary {
            files,
            locales,
            uploaded: summary.uploaded,
        })
    }
}
