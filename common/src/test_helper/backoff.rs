use crate::backoff::Backoff;
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

/// A test implementation of [`Backoff`] that keeps test runs short and
/// lets the test observe how often a session backed off.
///
/// The wait counter is shared, so a clone obtained with [`waits`](Self::waits)
/// still reports after the backoff was moved into a session.
pub struct CountingBackoff {
    delay: Duration,
    waits: Arc<AtomicUsize>,
}

impl CountingBackoff {
    /// Creates a backoff that sleeps `delay` on every wait.
    pub fn new(delay: Duration) -> Self {
        CountingBackoff {
            delay,
            waits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns a handle to the shared wait counter.
    pub fn waits(&self) -> Arc<AtomicUsize> {
        self.waits.clone()
    }
}

impl Default for CountingBackoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(10))
    }
}

#[async_trait::async_trait]
impl Backoff for CountingBackoff {
    async fn wait(&mut self) {
        self.waits.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
    }

    fn delay(&self) -> Duration {
        self.delay
    }
}
