use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// Splits a byte stream into lines on `\n`.
///
/// The terminator and a `\r` in front of it are stripped, nothing else is
/// trimmed because indentation matters for block documents. Invalid UTF-8 is
/// replaced instead of failing, content checks belong to the decoders.
#[derive(Debug, Clone, Default)]
pub struct LineFramer {
    /// Bytes of the buffer already scanned for a terminator.
    next_index: usize,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for LineFramer {
    type Item = String;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
            self.next_index = src.len();
            return Ok(None);
        };
        let line = src.split_to(self.next_index + offset + 1);
        self.next_index = 0;
        Ok(Some(to_line(&line[..line.len() - 1])))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        self.next_index = 0;
        if src.is_empty() {
            return Ok(None);
        }
        let rest = src.split();
        Ok(Some(to_line(&rest)))
    }
}

fn to_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
