//! Fix decoders
//!
//! One strategy per wire format. Each turns a complete [`RawFrame`] into a
//! [`Fix`] or reports why the frame was rejected. A rejected frame never
//! affects the frames after it.

use crate::framing::RawFrame;
use common::position::{Fix, FixError};

pub mod bridge;
pub mod document;
pub mod nmea;

/// Reasons a complete frame doesn't yield a fix.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("expected a JSON object")]
    NotAnObject,
    #[error("unexpected op {0:?}")]
    UnexpectedOp(String),
    #[error("topic {actual:?} doesn't match {expected:?}")]
    TopicMismatch { expected: String, actual: String },
    #[error("missing field {0}")]
    MissingField(&'static str),
    #[error("field {0} is not numeric")]
    NotNumeric(&'static str),
    #[error("{field} {value:?} is not an unsigned DDMM.MMMM value")]
    InvalidMagnitude { field: &'static str, value: String },
    #[error("sentence has {0} fields, at least 6 are required")]
    TooFewFields(usize),
    #[error("invalid hemisphere {0:?}")]
    InvalidHemisphere(String),
    #[error("malformed document: {0}")]
    MalformedDocument(String),
    #[error(transparent)]
    OutOfRange(#[from] FixError),
    #[error("{decoder} decoder can't handle {frame} frames")]
    UnexpectedFrame {
        decoder: &'static str,
        frame: &'static str,
    },
}

/// The decoding strategy of one source.
#[derive(Debug, Clone, PartialEq)]
pub enum FixDecoder {
    /// rosbridge publish events of `topic` carrying a NavSatFix message.
    BridgeJson { topic: String },
    /// `$GPGGA` sentences, every other sentence is skipped.
    Nmea,
    /// YAML documents with top level `latitude` and `longitude` keys.
    StructuredBlock,
}

impl FixDecoder {
    /// Decodes one frame.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Fix))` - The frame carried a position.
    /// * `Ok(None)` - The frame is irrelevant for this decoder and skipped silently.
    /// * `Err(DecodeError)` - The frame is malformed or not the expected message.
    pub fn decode(&self, frame: &RawFrame) -> Result<Option<Fix>, DecodeError> {
        match (self, frame) {
            (FixDecoder::BridgeJson { topic }, RawFrame::Json(value)) => {
                bridge::decode(value, topic).map(Some)
            }
            (FixDecoder::Nmea, RawFrame::Line(line)) => nmea::decode(line),
            (FixDecoder::StructuredBlock, RawFrame::Block(block)) => {
                document::decode(block).map(Some)
            }
            (decoder, frame) => Err(DecodeError::UnexpectedFrame {
                decoder: decoder.name(),
                frame: frame_name(frame),
            }),
        }
    }

    /// Short name used in log messages.
    pub fn name(&self) -> &'static str {
        match self {
            FixDecoder::BridgeJson { .. } => "bridge",
            FixDecoder::Nmea => "nmea",
            FixDecoder::StructuredBlock => "block",
        }
    }
}

fn frame_name(frame: &RawFrame) -> &'static str {
    match frame {
        RawFrame::Json(_) => "json",
        RawFrame::Line(_) => "line",
        RawFrame::Block(_) => "block",
    }
}
