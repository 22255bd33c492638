//! Defines the messages sent from the orchestrator to the UI.

use serde::Deserialize;

use super::view_model::UiState;

/// Events sent from the orchestrator to whatever renders the UI.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete state update: status line, progress and control enablement.
    StateUpdate(Box<UiState>),
    /// A modal error message.
    ShowError { title: String, message: String },
    /// A modal success message.
    ShowSuccess { title: String, message: String },
}

/// A user action coming from the UI.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "command", content = "payload", rename_all = "camelCase")]
pub enum UiCommand {
    /// Resolve the output folder. Sent once, when the UI starts.
    Initialize,
    SelectFiles,
    /// The label picked in the format chooser, or `None` if the choice was cleared.
    ChooseFormat(Option<String>),
    StartConversion,
}
