//! Pull: export a bundle from the service and unpack it locally.

use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

use super::archive::{ArchiveProcessor, ExtractionResult};
use super::error::SyncResult;
use crate::config::ProjectConfig;
use crate::remote::RemoteClient;

/// Stages a pull moves through. Any failure lands in `Aborted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullState {
    Idle,
    Exporting,
    Validating,
    Downloading,
    Extracting,
    Done,
    Aborted,
}

impl fmt::Display for PullState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PullState::Idle => "idle",
            PullState::Exporting => "exporting",
            PullState::Validating => "validating",
            PullState::Downloading => "downloading",
            PullState::Extracting => "extracting",
            PullState::Done => "done",
            PullState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Result of a completed pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullSummary {
    pub download_url: String,
    pub destination: PathBuf,
    pub extraction: ExtractionResult,
}

pub struct PullOrchestrator<'a, C: RemoteClient> {
    client: &'a C,
    project: &'a ProjectConfig,
    destination: PathBuf,
    processor: ArchiveProcessor,
    state: PullState,
    aborted_from: Option<PullState>,
}

impl<'a, C: RemoteClient> PullOrchestrator<'a, C> {
    /// `destination` is the locale root the bundle is extracted into.
    pub fn new(client: &'a C, project: &'a ProjectConfig, destination: PathBuf) -> Self {
        Self {
            client,
            project,
            destination,
            processor: ArchiveProcessor::new(),
            state: PullState::Idle,
            aborted_from: None,
        }
    }

    pub fn with_processor(mut self, processor: ArchiveProcessor) -> Self {
        self.processor = processor;
        self
    }

    pub fn state(&self) -> PullState {
        self.state
    }

    /// The stage that failed, once the pull is `Aborted`.
    pub fn aborted_from(&self) -> Option<PullState> {
        self.aborted_from
    }

    fn enter(&mut self, next: PullState) {
        debug!(from = %self.state, to = %next, "Pull state change");
        self.state = next;
    }

    fn abort<T>(&mut self, result: SyncResult<T>) -> SyncResult<T> {
        if result.is_err() {
            self.aborted_from = Some(self.state);
            self.enter(PullState::Aborted);
        }
        result
    }

    /// Export, download and extract. An empty `locales` slice pulls every locale.
    ///
    /// There are no retries; the first failure ends the pull.
    #[instrument(skip(self), fields(project = %self.project.project_id))]
    pub async fn pull(&mut self, locales: &[String]) -> SyncResult<PullSummary> {
        self.state = PullState::Idle;
        self.aborted_from = None;

        self.enter(PullState::Exporting);
        let exported: SyncResult<_> =
            self.client.export_bundle(locales).await.map_err(Into::into);
        let bundle = self.abort(exported)?;

        self.enter(PullState::Validating);
        info!(url = %bundle.download_url, "Bundle ready");

        self.enter(PullState::Downloading);
        let downloaded = self
            .processor
            .download(self.client, &bundle.download_url)
            .await;
        let archive = self.abort(downloaded)?;

        self.enter(PullState::Extracting);
        let extracted = self.processor.extract(archive, &self.destination);
        let extraction = self.abort(extracted)?;

        self.enter(PullState::Done);
        Ok(PullSummary {
            download_url: bundle.download_url,
            destination: self.destination.clone(),
            extraction,
        })
    }
}
