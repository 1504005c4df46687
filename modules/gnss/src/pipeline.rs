use futures::StreamExt;
use ingest::Format;
use module_core::FixSender;
use std::io;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;
use tracing::{debug, warn};

/// Failures below the framer that end a stream.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connecting to {address} failed: {source}")]
    Connect {
        address: String,
        #[source]
        source: io::Error,
    },
    #[error("handshake failed: {0}")]
    Handshake(#[source] io::Error),
    #[error("read failed: {0}")]
    Read(#[source] io::Error),
    #[error("stream closed by peer")]
    Closed,
}

/// Frames and decodes `reader` until it is exhausted and hands every fix to `fixes`.
///
/// Framing and decode errors only drop the affected frame. Fixes are sent in
/// the order they arrived, reading pauses while the channel is full.
///
/// # Returns
///
/// * `Ok(usize)` - The number of forwarded fixes once the reader reports end of stream.
/// * `Err(io::Error)` - The read error that ended the stream.
pub async fn pump<R>(
    reader: R,
    format: &Format,
    max_frame_len: usize,
    fixes: &FixSender,
) -> Result<usize, io::Error>
where
    R: AsyncRead + Unpin,
{
    let decoder = format.decoder();
    let mut frames = FramedRead::new(reader, format.codec(max_frame_len));
    let mut forwarded = 0;
    while let Some(frame) = frames.next().await {
        let frame = match frame? {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Framing error: {e}");
                continue;
            }
        };
        match decoder.decode(&frame) {
            Ok(Some(fix)) => {
                debug!(
                    "Decoded fix lat {:.6}, lng {:.6}",
                    fix.latitude(),
                    fix.longitude()
                );
                if fixes.send(fix).await.is_err() {
                    debug!("No sink receives fixes anymore, dropping fix");
                    continue;
                }
                forwarded += 1;
            }
            Ok(None) => (),
            Err(e) => warn!("Discarding {} frame: {e}", decoder.name()),
        }
    }
    Ok(forwarded)
}
