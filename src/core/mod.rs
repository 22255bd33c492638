pub mod batch;
pub mod converter;
pub mod error;
pub mod format;
pub mod naming;
pub mod output;
pub mod selection;

use serde::Serialize;
use std::path::{Path, PathBuf};

/// One user-selected input document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceItem {
    pub path: PathBuf,
    /// The file name including its extension.
    pub display_name: String,
    /// The file name without its extension.
    pub base_name: String,
}

impl SourceItem {
    /// Builds a source item from a picked path.
    ///
    /// Fails with `InvalidSource` if the path has no file name, the name is
    /// not valid UTF-8, or the path is not a regular file.
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let invalid = || ConvertError::InvalidSource(path.to_path_buf());
        let display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(invalid)?
            .to_string();
        let base_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(invalid)?
            .to_string();

        if !path.is_file() {
            return Err(ConvertError::InvalidSource(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            display_name,
            base_name,
        })
    }
}

/// A document written into the output folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationItem {
    pub path: PathBuf,
    /// The unique name the file was created with.
    pub name: String,
    pub format: TargetFormat,
    pub bytes_written: u64,
}

/// Progress of a running batch, reported after every converted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConversionProgress {
    pub processed: usize,
    pub total: usize,
}

pub use batch::{BatchOutcome, BatchRun};
pub use converter::{Converter, PlaceholderConverter};
pub use error::ConvertError;
pub use format::TargetFormat;
pub use naming::resolve_destination_name;
pub use output::OutputLocation;
pub use selection::SelectionManager;
