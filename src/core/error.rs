//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// The variants fall into three groups: startup errors that leave the
/// application unable to convert (`PermissionDenied`, `LocationUnavailable`),
/// per-item errors that abort a running batch (`Read`, `Write`,
/// `UnsupportedFormat`), and local validation errors that never reach the
/// converter (`OutputUnavailable`, `NoFormatChosen`, `NoSelection`).
/// `InvalidSource` rejects a picked file and is shown as a dialog.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Access to the output location was denied by the operating system.
    #[error("Access to {0} is required to create the output folder. Please check your permissions.")]
    PermissionDenied(PathBuf, #[source] std::io::Error),

    /// The output location could not be created for any other reason.
    #[error("Could not create output folder {0}: {1}")]
    LocationUnavailable(PathBuf, #[source] std::io::Error),

    /// A source document could not be read as text.
    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, #[source] std::io::Error),

    /// A destination document could not be created or written.
    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, #[source] std::io::Error),

    /// The chosen format label does not map onto a supported format.
    #[error("Unsupported target format: {0}")]
    UnsupportedFormat(String),

    /// Conversion was requested although the output folder could not be prepared.
    #[error("Output folder is unavailable")]
    OutputUnavailable,

    /// Conversion was requested before a target format was chosen.
    #[error("Please choose format")]
    NoFormatChosen,

    /// Conversion was requested with an empty selection.
    #[error("No files selected")]
    NoSelection,

    /// A picked path is not a regular file.
    #[error("Selected item is not a readable file: {0}")]
    InvalidSource(PathBuf),
}

impl ConvertError {
    /// The short title shown above the message in an error dialog.
    pub fn title(&self) -> &'static str {
        match self {
            ConvertError::PermissionDenied(..) => "Permission Error",
            ConvertError::LocationUnavailable(..) => "Failed to create output folder",
            ConvertError::InvalidSource(_) => "File Selection Error",
            ConvertError::Read(..)
            | ConvertError::Write(..)
            | ConvertError::UnsupportedFormat(_) => "Conversion Error",
            ConvertError::OutputUnavailable
            | ConvertError::NoFormatChosen
            | ConvertError::NoSelection => "Validation",
        }
    }

    /// `true` for errors that make every later conversion impossible until restart.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            ConvertError::PermissionDenied(..) | ConvertError::LocationUnavailable(..)
        )
    }

    /// `true` for errors that are reported on the status line only.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ConvertError::OutputUnavailable | ConvertError::NoFormatChosen | ConvertError::NoSelection
        )
    }
}
