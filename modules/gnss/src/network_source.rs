use crate::pipeline::{TransportError, pump};
use common::{backoff::Backoff, session_state::SessionState};
use ingest::Format;
use module_core::{Event, EventKind, FixSender, Module, ModuleCtx};
use std::io;
use tokio::{
    io::AsyncWriteExt,
    net::TcpStream,
    sync::broadcast::{Sender, error::RecvError},
};
use tracing::{debug, error, info, warn};

/// Connection settings of a network position source.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// `host:port` of the rosbridge or NMEA server.
    pub address: String,
    /// Wire format spoken by the server.
    pub format: Format,
    /// Upper bound of a single incomplete frame.
    pub max_frame_len: usize,
}

/// Keeps a TCP position stream alive.
///
/// Every failure (refused connect, failed handshake, read error or a peer
/// closing the stream) moves the session to [`SessionState::BackingOff`]. After the
/// backoff the session starts over from [`SessionState::Disconnected`], there is no
/// retry limit. Each transition is published as a
/// [`EventKind::SessionStateEvent`].
pub struct ReconnectingSession<B> {
    config: SessionConfig,
    backoff: B,
    state: SessionState,
    sender: Sender<Event>,
    fixes: FixSender,
}

impl<B: Backoff> ReconnectingSession<B> {
    pub fn new(config: SessionConfig, backoff: B, sender: Sender<Event>, fixes: FixSender) -> Self {
        ReconnectingSession {
            config,
            backoff,
            state: SessionState::Disconnected,
            sender,
            fixes,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Connects, streams and reconnects until the surrounding task is aborted.
    pub async fn run(&mut self) {
        loop {
            let error = self.connect_and_stream().await;
            warn!(
                "Error: {error}. Retrying in {:?}",
                self.backoff.delay()
            );
            self.transition(SessionState::BackingOff);
            self.backoff.wait().await;
            self.transition(SessionState::Disconnected);
        }
    }

    /// One connection cycle, returns the error that ended it.
    async fn connect_and_stream(&mut self) -> TransportError {
        let address = self.config.address.clone();
        let mut stream = match TcpStream::connect(&address).await {
            Ok(stream) => stream,
            Err(source) => return TransportError::Connect { address, source },
        };
        info!("Connected to {address}");
        self.transition(SessionState::Connected);

        match self.config.format.handshake() {
            Ok(Some(request)) => {
                if let Err(e) = stream.write_all(&request).await {
                    return TransportError::Handshake(e);
                }
                if let Format::BridgeJson { topic } = &self.config.format {
                    info!("Subscribed to topic {topic}");
                }
            }
            Ok(None) => (),
            Err(e) => return TransportError::Handshake(io::Error::other(e)),
        }

        self.transition(SessionState::Streaming);
        match pump(
            stream,
            &self.config.format,
            self.config.max_frame_len,
            &self.fixes,
        )
        .await
        {
            Ok(fixes) => {
                debug!("Stream of {address} ended after {fixes} fixes");
                TransportError::Closed
            }
            Err(e) => TransportError::Read(e),
        }
    }

    fn transition(&mut self, state: SessionState) {
        debug!("Session state {:?} -> {:?}", self.state, state);
        self.state = state;
        let _ = self.sender.send(Event {
            kind: EventKind::SessionStateEvent(state),
        });
    }
}

/// Runs a [`ReconnectingSession`] as a module on the event bus.
pub struct NetworkSourceModule<B> {
    ctx: ModuleCtx,
    session: Option<ReconnectingSession<B>>,
}

impl<B: Backoff + 'static> NetworkSourceModule<B> {
    pub fn new(ctx: ModuleCtx, fixes: FixSender, config: SessionConfig, backoff: B) -> Self {
        let session = ReconnectingSession::new(config, backoff, ctx.sender.clone(), fixes);
        NetworkSourceModule {
            ctx,
            session: Some(session),
        }
    }
}

#[async_trait::async_trait]
impl<B: Backoff + 'static> Module for NetworkSourceModule<B> {
    async fn run(&mut self) -> Result<(), ()> {
        let Some(mut session) = self.session.take() else {
            error!("Network source was already started");
            return Err(());
        };
        info!("Connecting to {}...", session.config.address);
        let session_handle = tokio::spawn(async move { session.run().await });
        let mut run = true;
        while run {
            tokio::select! {
                event = self.ctx.receiver.recv() => {
                    match event {
                        Ok(event) => {
                            if let EventKind::QuitEvent = event.kind {
                                session_handle.abort();
                                run = false;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            debug!("Network source skipped {skipped} events");
                        }
                        Err(RecvError::Closed) => {
                            session_handle.abort();
                            run = false;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
