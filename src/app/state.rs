//! Defines the central, mutable state of the application.

use crate::config::{self, AppConfig};
use crate::core::{ConversionProgress, OutputLocation, SelectionManager};
use serde::Serialize;
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Where the orchestrator is in the select → convert cycle.
///
/// `Completed` and `Failed` describe the last finished run. The selection is
/// kept, so both allow a new selection or a new run just like `Selected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BatchPhase {
    Idle,
    Selected,
    Converting,
    Completed,
    Failed,
}

/// Holds the complete, mutable state of the application.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` to allow for safe, shared access
/// from the UI command handlers and the conversion task.
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// Overrides the platform config directory when saving. Used by tests.
    pub config_dir: Option<PathBuf>,
    pub phase: BatchPhase,
    /// The documents picked by the user, in selection order.
    pub selection: SelectionManager,
    /// The label currently chosen in the format chooser.
    pub chosen_format: Option<String>,
    /// The output folder, set once by `initialize`.
    pub output_location: Option<OutputLocation>,
    /// Set if the output folder could not be created. Conversion stays disabled.
    pub startup_error: Option<String>,
    pub status_message: String,
    pub progress: ConversionProgress,
    /// Names of the files written by the current or last run.
    pub converted_files: Vec<String>,
    /// A handle to the running conversion task, if any.
    pub conversion_task: Option<JoinHandle<()>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let selection = SelectionManager::new(config.allowed_extensions.as_slice());
        let chosen_format = config.last_format.clone();
        Self {
            config,
            config_dir: None,
            phase: BatchPhase::Idle,
            selection,
            chosen_format,
            output_location: None,
            startup_error: None,
            status_message: "Ready.".to_string(),
            progress: ConversionProgress::default(),
            converted_files: Vec::new(),
            conversion_task: None,
        }
    }

    /// Select, format choice and start are all disabled while a run is in progress.
    pub fn controls_enabled(&self) -> bool {
        self.phase != BatchPhase::Converting
    }

    /// `true` if a start request would actually begin a run.
    pub fn can_convert(&self) -> bool {
        self.controls_enabled()
            && self.output_location.is_some()
            && self.chosen_format.is_some()
            && !self.selection.is_empty()
    }

    /// Persists the config, logging instead of failing.
    pub fn save_config(&self) {
        if let Err(e) = config::settings::save_config(&self.config, self.config_dir.as_deref()) {
            tracing::warn!("Failed to save config: {}", e);
        }
    }
}
