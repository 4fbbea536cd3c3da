//! Pull command implementation.

use std::path::PathBuf;
use tabled::{Table, Tabled};

use crate::cli::error::CliResult;
use crate::cli::utils::apply_table_style;
use crate::config::{DEFAULT_LOCALE_PATH, Settings};
use crate::remote::RemoteClient;
use crate::sync::PullOrchestrator;

#[derive(Tabled)]
struct ExtractedRow {
    #[tabled(rename = "Locale")]
    locale: String,
    #[tabled(rename = "File")]
    file: String,
}

impl From<&str> for ExtractedRow {
    fn from(entry: &str) -> Self {
        let locale = match entry.split_once('/') {
            Some((locale, _)) => locale.to_string(),
            None => "-".to_string(),
        };
        Self {
            locale,
            file: entry.to_string(),
        }
    }
}

/// Download the bundle and replace local translation files
pub async fn pull<C: RemoteClient>(
    client: &C,
    settings: &Settings,
    locales: &[String],
) -> CliResult<String> {
    let destination = settings
        .sync
        .locale_paths
        .first()
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCALE_PATH));

    let mut orchestrator = PullOrchestrator::new(client, &settings.project, destination);
    let summary = orchestrator.pull(locales).await?;

    let rows: Vec<ExtractedRow> = summary
        .extraction
        .entries
        .iter()
        .filter(|entry| !entry.ends_with('/'))
        .map(|entry| ExtractedRow::from(entry.as_str()))
        .collect();

    let mut output = String::new();
    output.push_str(&format!(
        "✓ Replaced translation files in {}. You can now commit the changes\n",
        summary.destination.display()
    ));

    if !rows.is_empty() {
        let mut table = Table::new(rows);
        apply_table_style(&mut table);
        output.push('\n');
        output.push_str(&table.to_string());
    }

    Ok(output)
}
