//! The closed set of target formats offered by the format chooser.

use super::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input extensions accepted by the file picker.
pub const DEFAULT_INPUT_EXTENSIONS: [&str; 3] = ["txt", "docx", "pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetFormat {
    Pdf,
    Docx,
}

impl TargetFormat {
    pub const ALL: [TargetFormat; 2] = [TargetFormat::Pdf, TargetFormat::Docx];

    /// The label shown in the format chooser.
    pub fn label(self) -> &'static str {
        match self {
            TargetFormat::Pdf => "PDF",
            TargetFormat::Docx => "DOCX",
        }
    }

    /// The canonical, lower-cased file extension.
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Pdf => "pdf",
            TargetFormat::Docx => "docx",
        }
    }

    /// Maps a chooser label onto a format, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Result<Self, ConvertError> {
        let trimmed = label.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ConvertError::UnsupportedFormat(trimmed.to_string()))
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TargetFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}
