pub mod settings;

use crate::core::format::DEFAULT_INPUT_EXTENSIONS;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_FOLDER: &str = "ConvertedFiles";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Directory the output folder is created in.
    pub output_root: Option<PathBuf>,
    pub output_folder_name: String,
    /// Extensions offered by the file picker, without the leading dot.
    pub allowed_extensions: Vec<String>,
    /// The format label chosen last time, preselected on startup.
    pub last_format: Option<String>,
    pub last_source_directory: Option<PathBuf>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    /// The full path of the output folder: `<output_root>/<output_folder_name>`.
    ///
    /// Falls back to the home directory, then the working directory, when no
    /// documents directory is known.
    pub fn output_directory(&self) -> PathBuf {
        let root = self
            .output_root
            .clone()
            .or_else(dirs::document_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        root.join(&self.output_folder_name)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_root: dirs::document_dir(),
            output_folder_name: DEFAULT_OUTPUT_FOLDER.to_string(),
            allowed_extensions: DEFAULT_INPUT_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            last_format: None,
            last_source_directory: None,
        }
    }
}
