use crate::{PositionSink, PositionUpdate, SinkTarget};
use async_trait::async_trait;
use common::{position::Fix, status::Status};
use module_core::{EventKind, FixReceiver, Module, ModuleCtx};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

/// Writes every fix received on the fix channel to a [`PositionSink`].
///
/// Fixes are written one after the other in the order they were sent. Sink
/// failures are logged and the next fix is processed normally. On
/// [`EventKind::QuitEvent`] the fixes still buffered in the channel are written
/// before the module stops.
pub struct SinkModule<S> {
    ctx: ModuleCtx,
    fixes: FixReceiver,
    sink: S,
    target: SinkTarget,
    status: Status,
    last_fix: Option<Fix>,
}

impl<S: PositionSink> SinkModule<S> {
    pub fn new(
        ctx: ModuleCtx,
        fixes: FixReceiver,
        sink: S,
        target: SinkTarget,
        status: Status,
    ) -> Self {
        SinkModule {
            ctx,
            fixes,
            sink,
            target,
            status,
            last_fix: None,
        }
    }

    async fn on_fix(&mut self, fix: Fix) {
        let update = PositionUpdate {
            position: fix,
            status: self.status,
        };
        if let Some(last_fix) = &self.last_fix {
            debug!("Moved {:.1} m", last_fix.distance_km(&fix) * 1000.0);
        }
        self.last_fix = Some(fix);
        match self.sink.update(&self.target, &update).await {
            Ok(()) => info!(
                "Position updated: Lat {:.6}, Lng {:.6}",
                fix.latitude(),
                fix.longitude()
            ),
            Err(e) => error!("Failed to update position of {}: {e}", self.target),
        }
    }

    async fn drain(&mut self) {
        while let Ok(fix) = self.fixes.try_recv() {
            self.on_fix(fix).await;
        }
    }
}

#[async_trait]
impl<S: PositionSink> Module for SinkModule<S> {
    async fn run(&mut self) -> Result<(), ()> {
        let mut run = true;
        while run {
            tokio::select! {
                fix = self.fixes.recv() => {
                    match fix {
                        Some(fix) => self.on_fix(fix).await,
                        None => {
                            debug!("All position sources are gone");
                            run = false;
                        }
                    }
                }
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            if let EventKind::QuitEvent = event.kind {
                                self.drain().await;
                                run = false;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!("Sink missed {skipped} events");
                        }
                        Err(RecvError::Closed) => run = false,
                    }
                }
            }
        }
        Ok(())
    }
}
