//! Discovery of template files in the configured locale roots.

use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::SyncResult;

pub const TEMPLATE_SUFFIX: &str = ".pot";
pub const TRANSLATION_SUFFIX: &str = ".po";

/// Swap a trailing `.pot` for `.po`. Returns `None` for any other name.
pub fn to_translation_name(name: &str) -> Option<String> {
    name.strip_suffix(TEMPLATE_SUFFIX)
        .map(|stem| format!("{}{}", stem, TRANSLATION_SUFFIX))
}

fn is_template(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| !name.starts_with('.') && name.ends_with(TEMPLATE_SUFFIX))
}

/// Find `*.pot` files directly inside each directory.
///
/// Results are ordered by directory (as given) and then by file name.
/// A directory that does not exist contributes nothing. Finding no
/// templates at all is not an error.
pub fn find_templates(paths: &[PathBuf]) -> SyncResult<Vec<PathBuf>> {
    let mut templates = Vec::new();

    for dir in paths {
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "Locale directory missing, skipping");
            continue;
        }

        let mut found: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_template(path))
            .collect();
        found.sort();

        debug!(dir = %dir.display(), count = found.len(), "Scanned locale directory");
        templates.extend(found);
    }

    Ok(templates)
}
