// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use common::{position::Fix, session_state::SessionState};
use strum_macros::EnumDiscriminants;

/// Represents a high-level event in the system.
///
/// Each `Event` wraps an [`EventKind`], which defines the actual type
/// and data carried by the event.
///
/// This structure is designed to be passed through an [`EventBus`]
/// between asynchronous modules.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// The inner event type and associated data.
    pub kind: EventKind,
}

/// Sending half of the channel carrying decoded fixes from a source to the sink.
pub type FixSender = tokio::sync::mpsc::Sender<Fix>;

/// Receiving half of the channel carrying decoded fixes from a source to the sink.
pub type FixReceiver = tokio::sync::mpsc::Receiver<Fix>;

/// Creates the bounded channel between the position source and the sink.
///
/// Unlike the [`EventBus`] the channel never drops a fix. A source that gets
/// ahead of the sink waits until `capacity` fixes are free again.
pub fn fix_channel(capacity: usize) -> (FixSender, FixReceiver) {
    tokio::sync::mpsc::channel(capacity)
}

/// Enumerates the different kinds of events that can be emitted
/// and transmitted via the [`EventBus`].
///
/// [`EventKindType`] is the payload free discriminant of every variant and is
/// used to wait for or filter a specific kind of event.
#[derive(Clone, Debug, PartialEq, EnumDiscriminants)]
#[strum_discriminants(name(EventKindType), derive(Hash))]
pub enum EventKind {
    /// Indicates that a module shall terminate.
    QuitEvent,

    /// A network session changed its connection state.
    SessionStateEvent(SessionState),
}

impl Event {
    /// Returns the discriminant of the carried [`EventKind`].
    pub fn event_type(&self) -> EventKindType {
        EventKindType::from(&self.kind)
    }
}

/// A simple asynchronous event bus for publishing and subscribing to [`Event`]s.
///
/// The event bus uses a [`tokio::sync::broadcast::channel`] under the hood,
/// allowing multiple receivers to listen for the same stream of events.
///
/// Each published event is cloned and distributed to all active subscribers.
/// If no subscribers exist at the time of publication, the event is discarded silently.
pub struct EventBus {
    /// The broadcast sender used internally to distribute events.
    sender: tokio::sync::broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new [`EventBus`] with a fixed buffer capacity of 100 messages.
    ///
    /// When the buffer is full, the oldest messages are dropped automatically
    /// as new ones are published.
    pub fn new() -> Self {
        let (sender, _) = tokio::sync::broadcast::channel(100);
        EventBus { sender }
    }

    /// Subscribes to the event bus and returns a [`tokio::sync::broadcast::Receiver`].
    ///
    /// The returned receiver will receive all future events published after the
    /// subscription is created.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    /// Publishes an [`Event`] to all active subscribers.
    ///
    /// If no subscribers exist, the event is discarded silently.
    pub fn publish(&self, event: &Event) {
        let _ = self.sender.send(event.clone());
    }

    /// Creates a [`ModuleCtx`] bound to this [`EventBus`].
    pub fn context(&self) -> ModuleCtx {
        ModuleCtx::new(self)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Defines the common interface for an asynchronous module
/// that can be executed and communicate via the [`EventBus`].
#[async_trait::async_trait]
pub trait Module {
    /// Runs the module asynchronously until completion.
    ///
    /// This function typically contains the module's main event loop,
    /// reacting to messages received through the [`ModuleCtx`].
    async fn run(&mut self) -> Result<(), ()>;
}

/// Provides a module-scoped context for interacting with the [`EventBus`].
///
/// Each `ModuleCtx` owns both a sender and a receiver, allowing the module
/// to both publish and listen for events concurrently.
pub struct ModuleCtx {
    /// The broadcast sender used to publish events.
    pub sender: tokio::sync::broadcast::Sender<Event>,

    /// The broadcast receiver used to listen for events.
    pub receiver: tokio::sync::broadcast::Receiver<Event>,
}

impl ModuleCtx {
    /// Constructs a new [`ModuleCtx`] from the given [`EventBus`].
    ///
    /// Clones the internal broadcast sender and creates a new receiver.
    pub fn new(event_bus: &EventBus) -> Self {
        ModuleCtx {
            sender: event_bus.sender.clone(),
            receiver: event_bus.subscribe(),
        }
    }

    /// Publishes `kind` wrapped into an [`Event`].
    ///
    /// Returns `Err(())` when no module listens on the bus anymore.
    pub fn publish_event(&self, kind: EventKind) -> Result<(), ()> {
        self.sender.send(Event { kind }).map(|_| ()).map_err(|_| ())
    }
}

pub mod test_helper;
