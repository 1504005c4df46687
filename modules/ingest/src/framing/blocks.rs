use super::LineFramer;
use bytes::BytesMut;
use tokio_util::codec::Decoder;
use tracing::debug;

/// Line that closes a block.
pub const BLOCK_DELIMITER: &str = "---";

/// Groups lines into blocks that are closed by a [`BLOCK_DELIMITER`] line.
///
/// The delimiter is compared after trimming and is not part of the block. A
/// block that is still open when the stream ends is dropped.
#[derive(Debug, Clone, Default)]
pub struct BlockFramer {
    lines: LineFramer,
    pending: Vec<String>,
}

impl BlockFramer {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, line: String) -> Option<String> {
        if line.trim() == BLOCK_DELIMITER {
            let block = self.pending.join("\n");
            self.pending.clear();
            return Some(block);
        }
        self.pending.push(line);
        None
    }
}

impl Decoder for BlockFramer {
    type Item = String;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(line) = self.lines.decode(src)? {
            if let Some(block) = self.push(line) {
                return Ok(Some(block));
            }
        }
        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(line) = self.lines.decode_eof(src)? {
            if let Some(block) = self.push(line) {
                return Ok(Some(block));
            }
        }
        if !self.pending.is_empty() {
            debug!(
                "Dropping unterminated block of {} lines at end of stream",
                self.pending.len()
            );
            self.pending.clear();
        }
        Ok(None)
    }
}
