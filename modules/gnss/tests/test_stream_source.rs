// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::position::Fix;
use gnss::stream_source::StreamSourceModule;
use ingest::{Format, framing::DEFAULT_MAX_FRAME_LEN};
use module_core::{
    EventBus, EventKindType, FixReceiver, Module, ModuleCtx, fix_channel,
    test_helper::{stop_module, wait_for_event},
};
use std::time::Duration;
use tokio::{
    io::{AsyncRead, AsyncWriteExt},
    time::timeout,
};

const TIMEOUT_MS: u64 = 100;
const FIX_CHANNEL_CAPACITY: usize = 16;

const ECHO_OUTPUT: &[u8] = b"header:
  seq: 1
latitude: 36.5598
longitude: 139.9088
---
latitude: [broken
---
latitude: 36.5601
longitude: 139.9092
---
latitude: 36.6
";

fn start_module<R>(
    ctx: ModuleCtx,
    reader: R,
    format: Format,
) -> (tokio::task::JoinHandle<Result<(), ()>>, FixReceiver)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (fixes, receiver) = fix_channel(FIX_CHANNEL_CAPACITY);
    let handle = tokio::spawn(async move {
        let mut source = StreamSourceModule::new(ctx, fixes, reader, format, DEFAULT_MAX_FRAME_LEN);
        source.run().await
    });
    (handle, receiver)
}

#[tokio::test]
#[test_log::test]
async fn forward_blocks_and_quit_at_end_of_input() {
    let event_bus = EventBus::default();
    let mut rx = event_bus.subscribe();
    let (handle, mut fixes) =
        start_module(event_bus.context(), ECHO_OUTPUT, Format::StructuredBlock);

    wait_for_event(
        &mut rx,
        Duration::from_millis(TIMEOUT_MS),
        EventKindType::QuitEvent,
    )
    .await;
    assert_eq!(
        timeout(Duration::from_millis(TIMEOUT_MS), handle)
            .await
            .expect("Stream source didn't stop")
            .unwrap(),
        Ok(())
    );

    let mut received = Vec::new();
    while let Some(fix) = fixes.recv().await {
        received.push(fix);
    }
    assert_eq!(
        received,
        vec![
            Fix::new(36.5598, 139.9088).unwrap(),
            Fix::new(36.5601, 139.9092).unwrap()
        ]
    );
}

#[tokio::test]
#[test_log::test]
async fn slow_consumer_receives_every_block() {
    const BLOCKS: usize = 3000;
    let input: String = (0..BLOCKS)
        .map(|i| format!("latitude: {}\nlongitude: 139.7\n---\n", i % 90))
        .collect();
    let event_bus = EventBus::default();
    let (handle, mut fixes) = start_module(
        event_bus.context(),
        std::io::Cursor::new(input.into_bytes()),
        Format::StructuredBlock,
    );

    let mut received = 0;
    while let Some(fix) = fixes.recv().await {
        assert_eq!(fix.latitude(), (received % 90) as f64);
        received += 1;
        if received % 100 == 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    }
    assert_eq!(received, BLOCKS);
    assert_eq!(handle.await.unwrap(), Ok(()));
}

#[tokio::test]
#[test_log::test]
async fn stop_on_quit_while_waiting_for_input() {
    let event_bus = EventBus::default();
    let (mut writer, reader) = tokio::io::duplex(64);
    let (mut handle, mut fixes) = start_module(event_bus.context(), reader, Format::Nmea);

    writer
        .write_all(b"$GPGGA,1,3542.000,N,13942.000,E\n")
        .await
        .unwrap();
    let fix = timeout(Duration::from_millis(TIMEOUT_MS), fixes.recv())
        .await
        .expect("No fix received in time")
        .expect("Fix channel closed");
    assert_eq!(fix, Fix::new(35.7, 139.7).unwrap());
    stop_module(&event_bus, &mut handle).await;
}
