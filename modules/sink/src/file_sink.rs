use crate::{PositionSink, PositionUpdate, SinkError, SinkTarget};
use std::{
    fs::DirBuilder,
    path::{Path, PathBuf},
};
use tracing::{error, info};

/// Keeps one JSON document per target in a directory.
///
/// Every update replaces `<root_dir>/<target>.json` completely. The document is
/// written to a temporary file first and renamed, readers never see a partial
/// document.
///
/// ## Important
///
/// `DocumentFileSink` **does not implement any locking**, only one instance should
/// write into a `root_dir` at any time.
pub struct DocumentFileSink {
    root_dir: PathBuf,
}

impl DocumentFileSink {
    pub fn new(root_dir: &Path) -> Self {
        if let Err(e) = DirBuilder::new().recursive(true).create(root_dir) {
            error!(
                "Failed to create document folder {}. Error: {}",
                root_dir.to_string_lossy(),
                e
            );
        }
        info!("Using document folder: {}", root_dir.to_string_lossy());
        DocumentFileSink {
            root_dir: root_dir.to_path_buf(),
        }
    }

    /// Path of the document that belongs to `target`.
    pub fn document_path(&self, target: &SinkTarget) -> PathBuf {
        self.root_dir.join(format!("{target}.json"))
    }
}

#[async_trait::async_trait]
impl PositionSink for DocumentFileSink {
    async fn update(&self, target: &SinkTarget, update: &PositionUpdate) -> Result<(), SinkError> {
        let document = serde_json::to_vec_pretty(update)?;
        let path = self.document_path(target);
        let tmp_path = self.root_dir.join(format!("{target}.json.tmp"));
        tokio::fs::write(&tmp_path, &document).await?;
        tokio::fs::rename(&tmp_path, &path).await?;
        Ok(())
    }
}
