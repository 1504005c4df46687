use std::time::Duration;

/// Policy that decides how long a session waits before reconnecting.
///
/// Sessions call [`wait`](Self::wait) every time they enter the backing off
/// state. Implementations must not fail, a session retries forever.
#[async_trait::async_trait]
pub trait Backoff: Send {
    /// Suspends the caller until the next connection attempt may start.
    async fn wait(&mut self);

    /// The delay that [`wait`](Self::wait) applies.
    fn delay(&self) -> Duration;
}

/// A [`Backoff`] that always sleeps the same amount of time on the tokio timer.
#[derive(Clone, Debug)]
pub struct FixedBackoff {
    delay: Duration,
}

impl FixedBackoff {
    pub fn new(delay: Duration) -> Self {
        FixedBackoff { delay }
    }
}

impl Default for FixedBackoff {
    /// Five seconds between two connection attempts.
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

#[async_trait::async_trait]
impl Backoff for FixedBackoff {
    async fn wait(&mut self) {
        tokio::time::sleep(self.delay).await;
    }

    fn delay(&self) -> Duration {
        self.delay
    }
}
