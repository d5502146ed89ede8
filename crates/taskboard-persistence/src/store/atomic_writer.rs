use std::io::Write;
use std::path::Path;
use taskboard_core::{TaskboardError, TaskboardResult};

/// Crash-safe file replacement: bytes go to a sibling temp file which is
/// then renamed over the target, so readers see the old or the new
/// contents, never a partial write.
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> TaskboardResult<()> {
        let path = path.to_path_buf();
        let data = data.to_vec();
        tokio::task::spawn_blocking(move || Self::write_blocking(&path, &data))
            .await
            .map_err(|e| TaskboardError::Internal(format!("Write task failed: {}", e)))?
    }

    fn write_blocking(path: &Path, data: &[u8]) -> TaskboardResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
        temp_file.write_all(data)?;
        temp_file.as_file().sync_all()?;
        temp_file.persist(path).map_err(|e| TaskboardError::Io(e.error))?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Read the whole file, or `None` if it does not exist.
    pub async fn read_optional(path: &Path) -> TaskboardResult<Option<Vec<u8>>> {
        match tokio::fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
