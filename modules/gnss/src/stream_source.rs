use crate::pipeline::pump;
use ingest::Format;
use module_core::{Event, EventKind, FixSender, Module, ModuleCtx};
use tokio::{io::AsyncRead, sync::broadcast::error::RecvError};
use tracing::{debug, error, info};

/// Reads positions once from a local byte stream such as stdin.
///
/// There is nothing to reconnect to, the module publishes a
/// [`EventKind::QuitEvent`] when the stream is exhausted or fails so the
/// remaining modules shut down. Every fix is already in the fix channel at
/// that point.
pub struct StreamSourceModule<R> {
    ctx: ModuleCtx,
    fixes: FixSender,
    reader: Option<R>,
    format: Format,
    max_frame_len: usize,
}

impl<R> StreamSourceModule<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(
        ctx: ModuleCtx,
        fixes: FixSender,
        reader: R,
        format: Format,
        max_frame_len: usize,
    ) -> Self {
        StreamSourceModule {
            ctx,
            fixes,
            reader: Some(reader),
            format,
            max_frame_len,
        }
    }
}

#[async_trait::async_trait]
impl<R> Module for StreamSourceModule<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn run(&mut self) -> Result<(), ()> {
        let Some(reader) = self.reader.take() else {
            error!("Stream source was already consumed");
            return Err(());
        };
        let sender = self.ctx.sender.clone();
        let stream = pump(reader, &self.format, self.max_frame_len, &self.fixes);
        tokio::pin!(stream);
        loop {
            tokio::select! {
                result = &mut stream => {
                    match result {
                        Ok(fixes) => info!("Input exhausted after {fixes} positions"),
                        Err(e) => error!("Reading input failed: {e}"),
                    }
                    let _ = sender.send(Event {
                        kind: EventKind::QuitEvent,
                    });
                    return Ok(());
                }
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            if let EventKind::QuitEvent = event.kind {
                                return Ok(());
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            debug!("Stream source skipped {skipped} events");
                        }
                        Err(RecvError::Closed) => return Ok(()),
                    }
                }
            }
        }
    }
}
