//! Resolves the output folder and creates uniquely named files inside it.

use super::error::ConvertError;
use super::naming::numbered_variant;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Upper bound on collision variants tried for a single candidate name.
pub const MAX_NAME_ATTEMPTS: usize = 10_000;

/// The single directory every destination file is written to.
///
/// Created once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    path: PathBuf,
}

impl OutputLocation {
    /// Creates `dir` (and its parents) if absent, or reuses it if it already exists.
    pub fn ensure(dir: &Path) -> Result<Self, ConvertError> {
        let map_err = |e: io::Error| match e.kind() {
            io::ErrorKind::PermissionDenied => ConvertError::PermissionDenied(dir.to_path_buf(), e),
            _ => ConvertError::LocationUnavailable(dir.to_path_buf(), e),
        };

        fs::create_dir_all(dir).map_err(map_err)?;
        let metadata = fs::metadata(dir).map_err(map_err)?;
        if !metadata.is_dir() {
            return Err(ConvertError::LocationUnavailable(
                dir.to_path_buf(),
                io::Error::other("path exists but is not a directory"),
            ));
        }
        if metadata.permissions().readonly() {
            return Err(ConvertError::PermissionDenied(
                dir.to_path_buf(),
                io::Error::from(io::ErrorKind::PermissionDenied),
            ));
        }

        tracing::info!("Output folder ready at {:?}", dir);
        Ok(Self {
            path: dir.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates a new, empty file named `candidate`, or a numbered variant of it
    /// if that name is taken. Existing files are never opened for writing.
    ///
    /// Returns the open handle together with the name actually used.
    pub async fn create_unique(
        &self,
        candidate: &str,
    ) -> Result<(tokio::fs::File, String), ConvertError> {
        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let name = if attempt == 1 {
                candidate.to_string()
            } else {
                numbered_variant(candidate, attempt)
            };
            let path = self.path.join(&name);

            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => {
                    if attempt > 1 {
                        tracing::info!("Name {:?} taken, using {:?}", candidate, name);
                    }
                    return Ok((file, name));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(ConvertError::Write(path, e)),
            }
        }

        Err(ConvertError::Write(
            self.path.join(candidate),
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("no free name after {} attempts", MAX_NAME_ATTEMPTS),
            ),
        ))
    }
}
