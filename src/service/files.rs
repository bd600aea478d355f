use std::path::PathBuf;

use bytes::Bytes;

use crate::Error;

/// A single document returned for every request, regardless of path or query.
/// The file is read again on each request so edits show up without a restart.
#[derive(Debug)]
pub struct StaticFile {
    doc_path: PathBuf,
}

impl StaticFile {
    pub fn new(doc_path: impl Into<PathBuf>) -> Self {
        Self {
            doc_path: doc_path.into(),
        }
    }

    /// Full contents of the document.
    pub async fn render(&self) -> Result<Bytes, Error> {
        tracing::debug!("Send file {}", self.doc_path.display());

        // TODO: stream large files instead of buffering them.
        match tokio::fs::read(&self.doc_path).await {
            Ok(content) => Ok(Bytes::from(content)),
            Err(source) => Err(Error::Read {
                path: self.doc_path.clone(),
                source,
            }),
        }
    }
}
