//! Saving the converted payload: the "download" half of a submission.
//!
//! A browser would wrap the bytes in a temporary object URL, click a hidden
//! link and revoke the URL. Here the temporary object is a
//! [`tempfile::NamedTempFile`] created next to the destination: bytes are
//! written to it, then it is atomically renamed to the requested name. If
//! anything fails before the rename, dropping the temp file deletes it, so a
//! half-written download never appears under the final name.

use crate::error::ConvertifyError;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Something that can hand converted bytes to the user as a file.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Save `bytes` under `filename` and return where it ended up.
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ConvertifyError>;
}

/// [`DownloadSink`] that writes into a directory on disk.
#[derive(Debug, Clone)]
pub struct FileDownloadSink {
    dir: PathBuf,
}

impl FileDownloadSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DownloadSink for FileDownloadSink {
    async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf, ConvertifyError> {
        let target = self.dir.join(filename);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ConvertifyError::DownloadFailed {
                path: target.clone(),
                source: e,
            })?;

        let dir = self.dir.clone();
        let dest = target.clone();
        let bytes = bytes.to_vec();
        tokio::task::spawn_blocking(move || write_atomic(&dir, &dest, &bytes))
            .await
            .map_err(|e| ConvertifyError::Internal(format!("save task failed: {e}")))?
            .map_err(|e| ConvertifyError::DownloadFailed {
                path: target.clone(),
                source: e,
            })?;

        debug!("Saved {}", target.display());
        Ok(target)
    }
}

fn write_atomic(dir: &Path, dest: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_bytes_under_filename() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileDownloadSink::new(dir.path());
        let path = tokio_test::assert_ok!(sink.save("new-archive.bin", &[0x89, 0x50, 0x4e, 0x47]).await);

        assert_eq!(path, dir.path().join("new-archive.bin"));
        assert_eq!(std::fs::read(&path).unwrap(), vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileDownloadSink::new(dir.path());
        sink.save("out.txt", b"first").await.unwrap();
        let path = sink.save("out.txt", b"second").await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"second");
    }

    #[tokio::test]
    async fn creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let sink = FileDownloadSink::new(&nested);
        let path = sink.save("x.bin", b"x").await.unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileDownloadSink::new(dir.path());
        sink.save("only.bin", b"data").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["only.bin".to_string()]);
    }

    #[tokio::test]
    async fn unwritable_target_is_download_failed() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be.
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let sink = FileDownloadSink::new(&blocker);

        let err = tokio_test::assert_err!(sink.save("x.bin", b"x").await);
        assert!(matches!(err, ConvertifyError::DownloadFailed { .. }), "{err}");
    }
}
