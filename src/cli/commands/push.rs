//! Push command implementation.

use std::time::Duration;
use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, format_list};
use crate::config::Settings;
use crate::remote::RemoteClient;
use crate::sync::{ProgressReporter, PushOrchestrator, PushRequest, UploadScheduler};

#[derive(Tabled)]
struct UploadedRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Locales")]
    locales: String,
}

/// Shown before a push starts, since uploads are slow by necessity.
pub fn upload_notice(throttle: Duration) -> String {
    format!(
        "Starting the file upload, this will take time as Lokalise accepts only one upload every {} seconds",
        throttle.as_secs()
    )
}

/// Upload every template for every requested locale
pub async fn push<C, P>(
    client: &C,
    settings: &Settings,
    request: &PushRequest,
    progress: &mut P,
) -> CliResult<String>
where
    C: RemoteClient,
    P: ProgressReporter + ?Sized,
{
    let orchestrator = PushOrchestrator::new(
        client,
        &settings.project,
        settings.sync.locale_paths.clone(),
        UploadScheduler::new(settings.sync.throttle),
    );
    let summary = orchestrator.push(request, progress).await?;

    if summary.files.is_empty() {
        let searched: Vec<String> = settings
            .sync
            .locale_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        return Ok(format!(
            "ℹ No template files found in {}. Nothing to push.\n",
            format_list(&searched)
        ));
    }

    let rows: Vec<UploadedRow> = summary
        .files
        .iter()
        .map(|file| UploadedRow {
            file: file.display().to_string(),
            locales: format_list(&summary.locales),
        })
        .collect();

    let mut output = format!("✓ All Done. {} upload(s) completed\n\n", summary.uploaded);
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    output.push_str(&table.to_string());

    Ok(output)
}
