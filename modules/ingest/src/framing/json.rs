use super::FramingError;
use bytes::{Buf, BytesMut};
use serde_json::Value;
use tokio_util::codec::Decoder;
use tracing::debug;

/// Default upper bound for a single incomplete JSON frame.
pub const DEFAULT_MAX_FRAME_LEN: usize = 1024 * 1024;

/// Cuts self-delimited JSON values out of a concatenated byte stream.
///
/// Values may be split over several reads or several values may arrive in one
/// read, both yield the same frames. An incomplete tail is kept until more
/// bytes arrive. Whitespace between values is dropped.
///
/// Bytes are only released without a frame together with a [`FramingError`]:
/// - on a syntax error the bytes up to the next `{` are dropped and framing resumes there
/// - an incomplete tail that grows past `max_frame_len` clears the buffer
/// - a value that is still open at the end of the stream is dropped
#[derive(Debug, Clone)]
pub struct JsonFramer {
    max_frame_len: usize,
}

impl JsonFramer {
    pub fn new() -> Self {
        Self::with_max_frame_len(DEFAULT_MAX_FRAME_LEN)
    }

    pub fn with_max_frame_len(max_frame_len: usize) -> Self {
        JsonFramer { max_frame_len }
    }

    pub fn max_frame_len(&self) -> usize {
        self.max_frame_len
    }

    fn next_value(
        &self,
        src: &mut BytesMut,
        eof: bool,
    ) -> Option<Result<Value, FramingError>> {
        skip_whitespace(src);
        if src.is_empty() {
            return None;
        }
        let parsed = {
            let mut values = serde_json::Deserializer::from_slice(&src[..]).into_iter::<Value>();
            values.next().map(|r| (r, values.byte_offset()))
        };
        match parsed {
            Some((Ok(value), consumed)) => {
                // A number at the very end may still continue with the next read.
                if !eof && consumed == src.len() && value.is_number() {
                    return None;
                }
                src.advance(consumed);
                skip_whitespace(src);
                Some(Ok(value))
            }
            Some((Err(e), _)) if e.is_eof() => {
                if eof {
                    let len = src.len();
                    src.clear();
                    return Some(Err(FramingError::Malformed {
                        discarded: len,
                        reason: "stream ended inside a frame".to_owned(),
                    }));
                }
                if src.len() > self.max_frame_len {
                    let len = src.len();
                    src.clear();
                    return Some(Err(FramingError::Overflow {
                        len,
                        cap: self.max_frame_len,
                    }));
                }
                None
            }
            Some((Err(e), _)) => {
                let discarded = resync_offset(src);
                debug!("Dropping {discarded} bytes of malformed JSON: {e}");
                src.advance(discarded);
                Some(Err(FramingError::Malformed {
                    discarded,
                    reason: e.to_string(),
                }))
            }
            None => None,
        }
    }
}

impl Default for JsonFramer {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for JsonFramer {
    type Item = Result<Value, FramingError>;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.next_value(src, false))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        Ok(self.next_value(src, true))
    }
}

fn skip_whitespace(src: &mut BytesMut) {
    let ws = src.iter().take_while(|b| b.is_ascii_whitespace()).count();
    src.advance(ws);
}

/// Offset of the next candidate object start after the broken one.
fn resync_offset(src: &[u8]) -> usize {
    src.iter()
        .skip(1)
        .position(|b| *b == b'{')
        .map_or(src.len(), |pos| pos + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resync_to_next_object() {
        assert_eq!(resync_offset(b"{x{\"a\":1}"), 2);
        assert_eq!(resync_offset(b"garbage"), 7);
        assert_eq!(resync_offset(b"{"), 1);
    }

    #[test]
    fn whitespace_only_buffer_is_consumed() {
        let mut framer = JsonFramer::new();
        let mut buf = BytesMut::from(&b" \r\n\t "[..]);
        assert!(framer.decode(&mut buf).unwrap().is_none());
        assert!(buf.is_empty());
    }

    #[test]
    fn trailing_number_waits_for_more_input() {
        let mut framer = JsonFramer::new();
        let mut buf = BytesMut::from(&b"12"[..]);
        assert!(framer.decode(&mut buf).unwrap().is_none());
        buf.extend_from_slice(b"3 ");
        let value = framer.decode(&mut buf).unwrap().unwrap().unwrap();
        assert_eq!(value, serde_json::json!(123));
    }
}
