//! Sync module - moving translation files between the local tree and Lokalise.
//!
//! Pull exports a bundle, renames its templates and unpacks it into the
//! first locale root. Push uploads every local template for every target
//! locale, paced to the service's rate limit.

mod archive;
#[cfg(test)]
mod archive_test;
mod error;
mod locator;
#[cfg(test)]
mod locator_test;
mod pull;
mod push;
mod scheduler;
#[cfg(test)]
pub(crate) mod test_support;

pub use archive::{ArchiveProcessor, ExtractionResult, extract_archive, rename_template_entries};
pub use error::{SyncError, SyncResult};
pub use locator::{TEMPLATE_SUFFIX, TRANSLATION_SUFFIX, find_templates, to_translation_name};
pub use pull::{PullOrchestrator, PullState, PullSummary};
pub use push::{PushOrchestrator, PushRequest, PushSummary, resolve_locales};
#[cfg(test)]
pub use scheduler::MockProgressReporter;
pub use scheduler::{
    NoProgress, ProgressReporter, SyncRun, UploadJob, UploadScheduler, UploadSummary,
};
