/// Lifecycle state of a reconnecting network session.
///
/// ```text
/// Disconnected -> Connected -> Streaming
///       ^             |            |
///       +-------- BackingOff <-----+
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No connection, the next step is a connect attempt.
    Disconnected,
    /// The transport is connected but the handshake is not done yet.
    Connected,
    /// The read loop is running and frames are decoded.
    Streaming,
    /// The last attempt failed, waiting for the backoff to elapse.
    BackingOff,
}
