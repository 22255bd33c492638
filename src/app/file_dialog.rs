//! An abstraction layer for native dialogs to enable testing.

use crate::config::AppConfig;
use crate::core::TargetFormat;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::path::PathBuf;

/// Defines a common interface for the pickers and message boxes the UI shows.
/// This allows for a mock implementation during tests, avoiding the need
/// to interact with actual OS dialog windows.
pub trait DialogService: Send + Sync {
    /// Opens a multi-select file picker restricted to the configured extensions.
    /// Returns `None` if the user cancels.
    fn pick_sources(&self, config: &AppConfig) -> Option<Vec<PathBuf>>;

    /// Asks the user to choose one of `formats`, returning the chosen label.
    fn pick_format(&self, formats: &[TargetFormat]) -> Option<String>;

    /// Asks a yes/no question.
    fn confirm(&self, title: &str, message: &str) -> bool;

    fn show_error(&self, title: &str, message: &str);

    fn show_info(&self, title: &str, message: &str);
}

/// The production implementation that uses the `rfd` crate to show native OS dialogs.
pub struct NativeDialogService;

impl DialogService for NativeDialogService {
    fn pick_sources(&self, config: &AppConfig) -> Option<Vec<PathBuf>> {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Select files to convert")
            .add_filter("Documents", config.allowed_extensions.as_slice());
        if let Some(dir) = config
            .last_source_directory
            .clone()
            .or_else(dirs::document_dir)
        {
            dialog = dialog.set_directory(dir);
        }
        dialog.pick_files()
    }

    fn pick_format(&self, formats: &[TargetFormat]) -> Option<String> {
        let labels: Vec<String> = formats.iter().map(|f| f.label().to_string()).collect();
        let buttons = match labels.as_slice() {
            [only] => MessageButtons::OkCustom(only.clone()),
            [first, second] => MessageButtons::OkCancelCustom(first.clone(), second.clone()),
            [first, second, third] => {
                MessageButtons::YesNoCancelCustom(first.clone(), second.clone(), third.clone())
            }
            _ => {
                tracing::warn!("Cannot offer {} formats in a message dialog", labels.len());
                return None;
            }
        };

        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Choose format")
            .set_description("Convert the selected files to:")
            .set_buttons(buttons)
            .show();

        match result {
            MessageDialogResult::Custom(label) => Some(label),
            MessageDialogResult::Ok | MessageDialogResult::Yes => labels.first().cloned(),
            _ => None,
        }
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::YesNo)
            .show();
        matches!(result, MessageDialogResult::Yes)
    }

    fn show_error(&self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn show_info(&self, title: &str, message: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(message)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
