//! File system utilities.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// A download in progress, written to a hidden sibling of its destination.
///
/// The temp file is created in the same directory as the target so the final
/// rename stays on one filesystem. Dropping the guard without calling
/// [`PartialFile::commit`] removes the temp file, so the destination path only
/// ever holds a complete file.
pub struct PartialFile {
    file: Option<File>,
    temp_path: PathBuf,
    destination: PathBuf,
}

impl PartialFile {
    /// Creates missing parent directories and opens the temp file.
    pub async fn create(destination: &Path) -> io::Result<Self> {
        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).await?;

        let file_name = destination.file_name().unwrap_or_default().to_string_lossy();
        let temp_path = parent.join(format!(".{file_name}.part"));
        let file = File::create(&temp_path).await?;

        Ok(Self {
            file: Some(file),
            temp_path,
            destination: destination.to_path_buf(),
        })
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    pub async fn write_all(&mut self, chunk: &[u8]) -> io::Result<()> {
        match self.file.as_mut() {
            Some(file) => file.write_all(chunk).await,
            None => Err(io::Error::other("partial file already closed")),
        }
    }

    /// Flushes, syncs and renames the temp file onto the destination.
    pub async fn commit(mut self) -> io::Result<PathBuf> {
        if let Some(mut file) = self.file.take() {
            file.flush().await?;
            file.sync_all().await?;
        }
        fs::rename(&self.temp_path, &self.destination).await?;
        Ok(self.destination.clone())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        // Runs on every exit path, including commit; after a successful rename the
        // temp path no longer exists and the removal is a no-op.
        drop(self.file.take());
        let _ = std::fs::remove_file(&self.temp_path);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_commit_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("out.pdf");

        let mut partial = PartialFile::create(&destination).await.unwrap();
        partial.write_all(b"Hello, ").await.unwrap();
        partial.write_all(b"World!").await.unwrap();
        let written = partial.commit().await.unwrap();

        assert_eq!(written, destination);
        assert_eq!(std::fs::read(&destination).unwrap(), b"Hello, World!");
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("es").join("nested").join("out.pdf");

        let mut partial = PartialFile::create(&destination).await.unwrap();
        partial.write_all(b"content").await.unwrap();
        partial.commit().await.unwrap();

        assert!(destination.exists());
    }

    #[tokio::test]
    async fn test_commit_overwrites_existing() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("out.pdf");
        std::fs::write(&destination, "Original content").unwrap();

        let mut partial = PartialFile::create(&destination).await.unwrap();
        partial.write_all(b"New content").await.unwrap();
        partial.commit().await.unwrap();

        assert_eq!(std::fs::read_to_string(&destination).unwrap(), "New content");
    }

    #[tokio::test]
    async fn test_no_temp_file_remains_after_commit() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("out.pdf");

        let partial = PartialFile::create(&destination).await.unwrap();
        let temp_path = partial.temp_path().to_path_buf();
        partial.commit().await.unwrap();

        assert!(!temp_path.exists());
    }

    #[tokio::test]
    async fn test_drop_without_commit_leaves_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("out.pdf");

        let mut partial = PartialFile::create(&destination).await.unwrap();
        partial.write_all(b"half a document").await.unwrap();
        let temp_path = partial.temp_path().to_path_buf();
        assert!(temp_path.exists());
        drop(partial);

        assert!(!temp_path.exists());
        assert!(!destination.exists());
    }
}
