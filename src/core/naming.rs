//! Derives destination file names from source names.

use super::format::TargetFormat;
use std::path::Path;

/// Returns the candidate destination name: `<base_name>.<extension>`.
pub fn resolve_destination_name(base_name: &str, format: TargetFormat) -> String {
    format!("{}.{}", base_name, format.extension())
}

/// Builds the collision variant `"<stem> (n).<ext>"` of a candidate name.
///
/// `n` starts at 2; the bare candidate counts as the first.
pub fn numbered_variant(candidate: &str, n: usize) -> String {
    let path = Path::new(candidate);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, n, ext.to_string_lossy()),
        None => format!("{} ({})", stem, n),
    }
}
