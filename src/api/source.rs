use std::path::Path;

use super::error::{ApiError, Result};

/// A source document loaded into memory, ready for a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Loads `path` after checking it names a readable, non-empty regular file.
    ///
    /// Every failure here is a [`ApiError::Validation`] so that a bad source is
    /// rejected before any request leaves the machine.
    pub async fn read(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path).await.map_err(|e| {
            ApiError::Validation(format!("source file {} is not accessible: {e}", path.display()))
        })?;

        if !metadata.is_file() {
            return Err(ApiError::Validation(format!(
                "source path {} is not a file",
                path.display()
            )));
        }
        if metadata.len() == 0 {
            return Err(ApiError::Validation(format!(
                "source file {} is empty",
                path.display()
            )));
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ApiError::Validation(format!("failed to read source file {}: {e}", path.display()))
        })?;

        let file_name = path
            .file_name()
            .map_or_else(|| "document.pdf".to_string(), |n| n.to_string_lossy().into_owned());

        Ok(Self { file_name, bytes })
    }
}
