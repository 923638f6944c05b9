//! Input resolution: turn a user-supplied path into a [`SelectedFile`].
//!
//! This is the file picker's job in a desktop form. Any readable file is
//! accepted; type, size and extension are left for the conversion service to
//! judge. The whole file is read into memory because the multipart body needs
//! the raw content.

use crate::error::ConvertifyError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file chosen for conversion: display name plus raw content.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    bytes: Vec<u8>,
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl SelectedFile {
    /// Wrap bytes already in memory.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk. The display name is the path's final component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ConvertifyError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|e| read_error(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Selected {} ({} bytes)", path.display(), bytes.len());
        Ok(Self { name, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// MIME type guessed from the file name, `application/octet-stream` if unknown.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

fn read_error(path: &Path, e: std::io::Error) -> ConvertifyError {
    let path: PathBuf = path.to_path_buf();
    match e.kind() {
        std::io::ErrorKind::NotFound => ConvertifyError::FileNotFound { path },
        std::io::ErrorKind::PermissionDenied => ConvertifyError::PermissionDenied { path },
        _ => ConvertifyError::FileReadFailed { path, source: e },
    }
}
