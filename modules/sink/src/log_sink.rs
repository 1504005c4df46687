use crate::{PositionSink, PositionUpdate, SinkError, SinkTarget};
use tracing::info;

/// A sink that only logs the document it would write.
///
/// Used when no output is configured, e.g. to check a source before wiring a
/// real destination.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait::async_trait]
impl PositionSink for LogSink {
    async fn update(&self, target: &SinkTarget, update: &PositionUpdate) -> Result<(), SinkError> {
        let document = serde_json::to_string(update)?;
        info!("Document {target}: {document}");
        Ok(())
    }
}
