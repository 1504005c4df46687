use clap::Parser;
use common::backoff::FixedBackoff;
use config::{Cli, IngestConfig, SourceConfig};
use gnss::{network_source::NetworkSourceModule, stream_source::StreamSourceModule};
use module_core::{Event, EventBus, EventKind, FixReceiver, FixSender, Module, fix_channel};
use sink::{DocumentFileSink, LogSink, SinkModule};
use std::future::Future;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;

/// Fixes a source may decode ahead of the sink before it stops reading.
const FIX_CHANNEL_CAPACITY: usize = 64;

fn create_source_module(eb: &EventBus, fixes: FixSender, source: SourceConfig) -> Box<dyn Module> {
    match source {
        SourceConfig::Network {
            session,
            retry_delay,
        } => Box::new(NetworkSourceModule::new(
            eb.context(),
            fixes,
            session,
            FixedBackoff::new(retry_delay),
        )),
        SourceConfig::Stdin {
            format,
            max_frame_len,
        } => {
            info!("Reading positions from stdin");
            Box::new(StreamSourceModule::new(
                eb.context(),
                fixes,
                tokio::io::stdin(),
                format,
                max_frame_len,
            ))
        }
    }
}

fn create_sink_module(eb: &EventBus, fixes: FixReceiver, config: &IngestConfig) -> Box<dyn Module> {
    match &config.output_dir {
        Some(dir) => Box::new(SinkModule::new(
            eb.context(),
            fixes,
            DocumentFileSink::new(dir),
            config.target.clone(),
            config.status,
        )),
        None => Box::new(SinkModule::new(
            eb.context(),
            fixes,
            LogSink,
            config.target.clone(),
            config.status,
        )),
    }
}

/// Runs `future` to completion on a new runtime without waiting for blocking tasks.
///
/// A pending stdin read occupies a blocking thread that can't be cancelled. It
/// is left behind so an interrupt ends the process right away.
fn block_on_detached<F: Future>(future: F) -> Result<F::Output, ()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| error!("Failed to start the runtime. Error: {e}"))?;
    let output = runtime.block_on(future);
    runtime.shutdown_background();
    Ok(output)
}

async fn run(config: IngestConfig) -> Result<(), ()> {
    let eb = EventBus::default();

    let quit_sender = eb.context().sender;
    ctrlc::set_handler(move || {
        info!("Interrupted, shutting down...");
        let _ = quit_sender.send(Event {
            kind: EventKind::QuitEvent,
        });
    })
    .map_err(|e| error!("Failed to install the interrupt handler. Error: {e}"))?;

    info!(
        "Sending positions of {} with status \"{}\"",
        config.target, config.status
    );
    let (fix_sender, fix_receiver) = fix_channel(FIX_CHANNEL_CAPACITY);
    let mut sink = create_sink_module(&eb, fix_receiver, &config);
    let mut source = create_source_module(&eb, fix_sender, config.source);

    info!("Starting modules...");
    let (source_result, sink_result) = tokio::join!(source.run(), sink.run());
    source_result.and(sink_result)
}

fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = IngestConfig::try_from(cli).map_err(|e| {
        error!("Invalid configuration: {e}");
    })?;
    block_on_detached(run(config))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::status::Status;
    use ingest::{Format, framing::DEFAULT_MAX_FRAME_LEN};
    use sink::{PositionSink, PositionUpdate, SinkError, SinkTarget};
    use std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::{Duration, Instant},
    };

    /// Counts updates and takes a while for each of them.
    #[derive(Clone, Default)]
    struct SlowSink {
        updates: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl PositionSink for SlowSink {
        async fn update(&self, _: &SinkTarget, _: &PositionUpdate) -> Result<(), SinkError> {
            tokio::time::sleep(Duration::from_micros(200)).await;
            self.updates.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn slow_sink_gets_every_block_from_the_stream_source() {
        const BLOCKS: usize = 3000;
        let input: String = (0..BLOCKS)
            .map(|i| format!("latitude: {}\nlongitude: 139.7\n---\n", i % 90))
            .collect();
        let eb = EventBus::default();
        let (fix_sender, fix_receiver) = fix_channel(FIX_CHANNEL_CAPACITY);
        let sink = SlowSink::default();
        let updates = sink.updates.clone();
        let mut source = StreamSourceModule::new(
            eb.context(),
            fix_sender,
            std::io::Cursor::new(input.into_bytes()),
            Format::StructuredBlock,
            DEFAULT_MAX_FRAME_LEN,
        );
        let mut sink = SinkModule::new(
            eb.context(),
            fix_receiver,
            sink,
            SinkTarget::new("robot-1").unwrap(),
            Status::InMotion,
        );

        let (source_result, sink_result) = tokio::join!(source.run(), sink.run());
        assert_eq!(source_result, Ok(()));
        assert_eq!(sink_result, Ok(()));
        assert_eq!(updates.load(Ordering::SeqCst), BLOCKS);
    }

    #[test]
    fn detached_runtime_does_not_wait_for_blocking_reads() {
        let start = Instant::now();
        let output = block_on_detached(async {
            tokio::task::spawn_blocking(|| std::thread::sleep(Duration::from_secs(5)));
            42
        });
        assert_eq!(output, Ok(42));
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}
