//! Responsible for transforming the `AppState` into a `UiState` view model.

use crate::core::TargetFormat;
use serde::Serialize;
use std::path::PathBuf;

use super::state::{AppState, BatchPhase};

/// A serializable representation of the application state for the UI.
#[derive(Serialize, Clone, Debug)]
pub struct UiState {
    pub phase: BatchPhase,
    pub status_message: String,
    pub progress_value: usize,
    /// Equals the number of selected files.
    pub progress_max: usize,
    pub progress_visible: bool,
    pub selected_files: Vec<String>,
    pub chosen_format: Option<String>,
    pub available_formats: Vec<String>,
    pub output_directory: Option<PathBuf>,
    pub converted_files: Vec<String>,
    pub can_select: bool,
    pub can_choose_format: bool,
    pub can_convert: bool,
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    UiState {
        phase: state.phase,
        status_message: state.status_message.clone(),
        progress_value: state.progress.processed,
        progress_max: state.progress.total,
        progress_visible: state.phase != BatchPhase::Idle,
        selected_files: state
            .selection
            .items()
            .iter()
            .map(|item| item.display_name.clone())
            .collect(),
        chosen_format: state.chosen_format.clone(),
        available_formats: TargetFormat::ALL
            .iter()
            .map(|f| f.label().to_string())
            .collect(),
        output_directory: state.output_location.as_ref().map(|o| o.path().to_path_buf()),
        converted_files: state.converted_files.clone(),
        can_select: state.controls_enabled(),
        can_choose_format: state.controls_enabled(),
        can_convert: state.can_convert(),
    }
}
