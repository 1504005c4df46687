// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::{position::Fix, session_state::SessionState};
use module_core::{test_helper::wait_for_event, *};

#[tokio::test]
#[test_log::test]
pub async fn events_delivered() {
    let event_bus = EventBus::new();
    let mut receiver = event_bus.subscribe();
    let event = Event {
        kind: EventKind::QuitEvent,
    };
    event_bus.publish(&event);
    let received_event =
        tokio::time::timeout(std::time::Duration::from_millis(100), receiver.recv())
            .await
            .expect("Failed to receive event in required time")
            .unwrap();
    assert_eq!(received_event.event_type(), event.event_type());
}

#[tokio::test]
#[test_log::test]
pub async fn test_wait_for_event_skips_other_kinds() {
    let event_bus = EventBus::new();
    let mut receiver = event_bus.subscribe();
    let ctx = event_bus.context();
    ctx.publish_event(EventKind::QuitEvent)
        .expect("Failed to publish quit event");
    ctx.publish_event(EventKind::SessionStateEvent(SessionState::Connected))
        .expect("Failed to publish state event");

    let event = wait_for_event(
        &mut receiver,
        std::time::Duration::from_millis(100),
        EventKindType::SessionStateEvent,
    )
    .await;
    assert_eq!(
        event.kind,
        EventKind::SessionStateEvent(SessionState::Connected)
    );
}

#[tokio::test]
#[test_log::test]
pub async fn fix_channel_keeps_every_fix_in_order() {
    let (sender, mut receiver) = fix_channel(2);
    let producer = tokio::spawn(async move {
        for i in 0..10 {
            sender
                .send(Fix::new(f64::from(i), 0.0).unwrap())
                .await
                .expect("Fix channel closed");
        }
    });

    let mut latitudes = Vec::new();
    while let Some(fix) = receiver.recv().await {
        latitudes.push(fix.latitude());
    }
    producer.await.unwrap();
    assert_eq!(latitudes, (0..10).map(f64::from).collect::<Vec<_>>());
}

#[test]
pub fn event_type_matches_kind() {
    let event = Event {
        kind: EventKind::SessionStateEvent(SessionState::BackingOff),
    };
    assert_eq!(event.event_type(), EventKindType::SessionStateEvent);
}
