//! Filesystem-backed file reader.

use async_trait::async_trait;
use parrot_core::host::FileReader;
use parrot_core::reference::Uri;
use std::io;

/// Reads `file://` URIs (or bare paths) from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileReader;

impl FsFileReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileReader for FsFileReader {
    async fn read_file(&self, uri: &Uri) -> io::Result<Vec<u8>> {
        let path = uri.to_file_path().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::Unsupported,
                format!("not a file URI: {uri}"),
            )
        })?;
        tracing::debug!(path = %path.display(), "Reading file");
        tokio::fs::read(&path).await
    }
}
