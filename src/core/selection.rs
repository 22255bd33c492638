//! Holds the documents currently selected for conversion.

use super::error::ConvertError;
use super::SourceItem;
use std::path::{Path, PathBuf};

pub struct SelectionManager {
    allowed_extensions: Vec<String>,
    items: Vec<SourceItem>,
}

impl SelectionManager {
    pub fn new<S: AsRef<str>>(allowed_extensions: &[S]) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
            items: Vec::new(),
        }
    }

    /// Replaces the current selection with `paths`, preserving their order.
    ///
    /// Paths outside the extension allow-list are skipped. If any remaining path
    /// is not a regular file the selection is left empty and the error is returned.
    pub fn replace(&mut self, paths: Vec<PathBuf>) -> Result<usize, ConvertError> {
        self.items.clear();

        let mut items = Vec::with_capacity(paths.len());
        for path in paths {
            if !self.is_allowed(&path) {
                tracing::warn!("Skipping {:?}: extension not in allow-list", path);
                continue;
            }
            items.push(SourceItem::from_path(&path)?);
        }

        self.items = items;
        tracing::info!("Selection replaced: {} files", self.items.len());
        Ok(self.items.len())
    }

    pub fn is_allowed(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.allowed_extensions.contains(&ext))
    }

    pub fn items(&self) -> &[SourceItem] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
