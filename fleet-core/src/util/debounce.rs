//!  src/util/debounce.rs
//!  ===================================================================
//!  Trailing-edge debouncer
//!
//!  Each `submit` aborts the pending sleeper and spawns a fresh one, so only
//!  the last value inside a quiet window is delivered. Settled values arrive
//!  on an unbounded channel the event loop selects on.

use std::time::Duration;

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, sleep_until},
};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct DebounceConfig {
    pub delay: Duration,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::search_input()
    }
}

impl DebounceConfig {
    /// Quick config for search input debouncing
    #[must_use]
    pub const fn search_input() -> Self {
        Self {
            delay: Duration::from_millis(300),
        }
    }

    #[must_use]
    pub const fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

/// Single-slot debouncer. Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct Debouncer<T> {
    cfg: DebounceConfig,
    sleeper: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a new debouncer and its Rx endpoint
    #[must_use]
    pub fn new(cfg: DebounceConfig) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                cfg,
                sleeper: None,
                tx,
            },
            rx,
        )
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.cfg.delay
    }

    /// Restart the quiet window with `value` as the pending event.
    pub fn submit(&mut self, value: T) {
        self.cancel();

        // deadline is fixed at submit time, not when the task is first polled
        let deadline = Instant::now() + self.cfg.delay;
        let tx = self.tx.clone();
        self.sleeper = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            trace!(marker = "DEBOUNCE_FIRED", "Debounced value settled");
            // receiver gone means the loop is shutting down
            let _ = tx.send(value);
        }));
    }

    /// Drop the pending event, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.sleeper.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.sleeper.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.sleeper.take() {
            handle.abort();
        }
    }
}
