//! Stream framers
//!
//! Every framer is a [`tokio_util::codec::Decoder`], so it can drive a
//! [`tokio_util::codec::FramedRead`] directly on a socket or on stdin.
//! [`FrameBuffer`] owns a framer together with its stream buffer for
//! callers that receive chunks by other means.

use bytes::BytesMut;
use tokio_util::codec::Decoder;

mod blocks;
mod json;
mod lines;

pub use blocks::{BLOCK_DELIMITER, BlockFramer};
pub use json::{DEFAULT_MAX_FRAME_LEN, JsonFramer};
pub use lines::LineFramer;

/// One complete unit handed from a framer to a fix decoder.
#[derive(Clone, Debug, PartialEq)]
pub enum RawFrame {
    /// One JSON value cut out of a concatenated JSON stream.
    Json(serde_json::Value),
    /// One text line without its terminator.
    Line(String),
    /// The lines between two block delimiters, joined with `\n`.
    Block(String),
}

/// Buffer content that can't be turned into a frame.
///
/// The offending bytes are already dropped from the buffer when this is
/// reported, framing continues with the remaining input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FramingError {
    #[error("malformed frame, discarded {discarded} bytes: {reason}")]
    Malformed { discarded: usize, reason: String },
    #[error("incomplete frame exceeds {cap} bytes, discarded {len} bytes")]
    Overflow { len: usize, cap: usize },
}

/// Item produced by [`FrameCodec`], framing errors are items and not stream errors
/// so a [`tokio_util::codec::FramedRead`] keeps reading after one.
pub type FrameResult = Result<RawFrame, FramingError>;

/// The framer used for one wire format.
#[derive(Debug)]
pub enum FrameCodec {
    Json(JsonFramer),
    Lines(LineFramer),
    Blocks(BlockFramer),
}

impl Decoder for FrameCodec {
    type Item = FrameResult;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self {
            FrameCodec::Json(framer) => Ok(framer.decode(src)?.map(|r| r.map(RawFrame::Json))),
            FrameCodec::Lines(framer) => Ok(framer.decode(src)?.map(|l| Ok(RawFrame::Line(l)))),
            FrameCodec::Blocks(framer) => Ok(framer.decode(src)?.map(|b| Ok(RawFrame::Block(b)))),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self {
            FrameCodec::Json(framer) => {
                Ok(framer.decode_eof(src)?.map(|r| r.map(RawFrame::Json)))
            }
            FrameCodec::Lines(framer) => {
                Ok(framer.decode_eof(src)?.map(|l| Ok(RawFrame::Line(l))))
            }
            FrameCodec::Blocks(framer) => {
                Ok(framer.decode_eof(src)?.map(|b| Ok(RawFrame::Block(b))))
            }
        }
    }
}

/// A framer bundled with the buffer holding the not yet framed tail of the stream.
///
/// The buffer never keeps bytes of an emitted frame, only the unconsumed rest.
#[derive(Debug)]
pub struct FrameBuffer<D> {
    framer: D,
    buffer: BytesMut,
}

impl<D: Decoder> FrameBuffer<D> {
    pub fn new(framer: D) -> Self {
        FrameBuffer {
            framer,
            buffer: BytesMut::new(),
        }
    }

    /// Appends `bytes` and returns every frame that is complete now.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<Vec<D::Item>, D::Error> {
        self.buffer.extend_from_slice(bytes);
        let mut frames = Vec::new();
        while let Some(frame) = self.framer.decode(&mut self.buffer)? {
            frames.push(frame);
        }
        Ok(frames)
    }

    /// Signals the end of the stream and returns the frames the framer still
    /// releases for the remaining tail.
    pub fn finish(&mut self) -> Result<Vec<D::Item>, D::Error> {
        let mut frames = Vec::new();
        while let Some(frame) = self.framer.decode_eof(&mut self.buffer)? {
            frames.push(frame);
        }
        Ok(frames)
    }

    /// Number of buffered bytes that don't form a frame yet.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
