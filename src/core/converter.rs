//! Converts a single source document into the requested target format.
//!
//! Conversion is routed by format. Every route currently performs the same
//! placeholder conversion: the source is read as text and that text is written
//! unchanged into the destination file. Real encoders plug in at
//! [`PlaceholderConverter::write_pdf`] and [`PlaceholderConverter::write_docx`].

use super::error::ConvertError;
use super::format::TargetFormat;
use super::output::OutputLocation;
use super::{DestinationItem, SourceItem};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Converts one source item into one destination item inside `output`.
#[async_trait]
pub trait Converter: Send + Sync + 'static {
    /// `candidate` is the preferred destination name; the file may end up with
    /// a numbered variant of it if the name is already taken.
    async fn convert_one(
        &self,
        source: &SourceItem,
        format: TargetFormat,
        output: &OutputLocation,
        candidate: &str,
    ) -> Result<DestinationItem, ConvertError>;
}

/// The production converter.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderConverter;

impl PlaceholderConverter {
    async fn read_source(source: &SourceItem) -> Result<String, ConvertError> {
        tokio::fs::read_to_string(&source.path)
            .await
            .map_err(|e| ConvertError::Read(source.path.clone(), e))
    }

    pub async fn write_pdf(file: &mut File, path: &Path, content: &str) -> Result<u64, ConvertError> {
        Self::write_text(file, path, content).await
    }

    pub async fn write_docx(file: &mut File, path: &Path, content: &str) -> Result<u64, ConvertError> {
        Self::write_text(file, path, content).await
    }

    async fn write_text(file: &mut File, path: &Path, content: &str) -> Result<u64, ConvertError> {
        let map_err = |e| ConvertError::Write(path.to_path_buf(), e);
        file.write_all(content.as_bytes()).await.map_err(map_err)?;
        file.flush().await.map_err(map_err)?;
        Ok(content.len() as u64)
    }
}

#[async_trait]
impl Converter for PlaceholderConverter {
    async fn convert_one(
        &self,
        source: &SourceItem,
        format: TargetFormat,
        output: &OutputLocation,
        candidate: &str,
    ) -> Result<DestinationItem, ConvertError> {
        let content = Self::read_source(source).await?;

        let (mut file, name) = output.create_unique(candidate).await?;
        let path = output.path().join(&name);

        let bytes_written = match format {
            TargetFormat::Pdf => Self::write_pdf(&mut file, &path, &content).await?,
            TargetFormat::Docx => Self::write_docx(&mut file, &path, &content).await?,
        };
        drop(file);

        tracing::info!(
            "Converted {:?} -> {:?} ({} bytes)",
            source.display_name,
            name,
            bytes_written
        );
        Ok(DestinationItem {
            path,
            name,
            format,
            bytes_written,
        })
    }
}
