use crate::{
    decoder::{FixDecoder, bridge::SubscribeRequest},
    framing::{BlockFramer, FrameCodec, JsonFramer, LineFramer},
};

/// Wire format of a position source.
///
/// Selects the framer, the decoder and the handshake of a source so one
/// pipeline serves every format.
#[derive(Debug, Clone, PartialEq)]
pub enum Format {
    /// Concatenated rosbridge JSON messages of one subscribed topic.
    BridgeJson { topic: String },
    /// NMEA 0183 sentences, one per line.
    Nmea,
    /// YAML documents separated by `---` lines.
    StructuredBlock,
}

impl Format {
    /// A fresh framer for one stream, `max_frame_len` bounds incomplete JSON frames.
    pub fn codec(&self, max_frame_len: usize) -> FrameCodec {
        match self {
            Format::BridgeJson { .. } => {
                FrameCodec::Json(JsonFramer::with_max_frame_len(max_frame_len))
            }
            Format::Nmea => FrameCodec::Lines(LineFramer::new()),
            Format::StructuredBlock => FrameCodec::Blocks(BlockFramer::new()),
        }
    }

    pub fn decoder(&self) -> FixDecoder {
        match self {
            Format::BridgeJson { topic } => FixDecoder::BridgeJson {
                topic: topic.clone(),
            },
            Format::Nmea => FixDecoder::Nmea,
            Format::StructuredBlock => FixDecoder::StructuredBlock,
        }
    }

    /// Bytes written right after connecting, if the format needs a handshake.
    pub fn handshake(&self) -> Result<Option<Vec<u8>>, serde_json::Error> {
        match self {
            Format::BridgeJson { topic } => {
                Ok(Some(SubscribeRequest::new(topic).to_line()?.into_bytes()))
            }
            Format::Nmea | Format::StructuredBlock => Ok(None),
        }
    }
}
