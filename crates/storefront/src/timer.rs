//! Replaceable timers for search-as-you-type and toast notifications.
//!
//! Each timer kind holds at most one pending task. Scheduling a new one
//! aborts the previous task before it fires, so a burst of keystrokes
//! yields a single search and a new toast always gets its full display
//! time.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A single-slot timer: scheduling replaces whatever was pending.
///
/// Must be used from within a tokio runtime. Dropping the timer aborts the
/// pending task.
#[derive(Debug, Default)]
pub struct ReplaceableTimer {
    pending: Option<JoinHandle<()>>,
}

impl ReplaceableTimer {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Run `task` after `delay`, cancelling any pending task.
    pub fn schedule<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    /// Cancel the pending task.
    ///
    /// Returns whether a task was still waiting to fire.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some_and(|handle| {
            let waiting = !handle.is_finished();
            handle.abort();
            waiting
        })
    }

    /// Whether a task is scheduled and has not finished.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for ReplaceableTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Delivers only the last value of a burst, after a quiet period.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    timer: ReplaceableTimer,
    tx: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its settled values arrive on.
    #[must_use]
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                timer: ReplaceableTimer::new(),
                tx,
            },
            rx,
        )
    }

    /// Submit a value, replacing any value still waiting.
    pub fn call(&mut self, value: T) {
        let tx = self.tx.clone();
        self.timer.schedule(self.delay, async move {
            // Receiver gone means the overlay was torn down
            let _ = tx.send(value);
        });
    }

    /// Drop the value still waiting, if any.
    pub fn cancel(&mut self) -> bool {
        self.timer.cancel()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    generation: u64,
}

/// Shows one toast at a time and hides it after a fixed duration.
#[derive(Debug)]
pub struct Toaster {
    duration: Duration,
    current: Arc<Mutex<Option<Toast>>>,
    generation: u64,
    timer: ReplaceableTimer,
}

impl Toaster {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: Arc::new(Mutex::new(None)),
            generation: 0,
            timer: ReplaceableTimer::new(),
        }
    }

    /// Show `message`, replacing the visible toast and restarting the
    /// auto-dismiss timer.
    pub fn show(&mut self, message: impl Into<String>) {
        self.generation += 1;
        let toast = Toast {
            message: message.into(),
            generation: self.generation,
        };
        debug!(message = %toast.message, "Showing toast");

        if let Ok(mut current) = self.current.lock() {
            *current = Some(toast);
        }

        let current = Arc::clone(&self.current);
        let generation = self.generation;
        self.timer.schedule(self.duration, async move {
            if let Ok(mut current) = current.lock()
                && current.as_ref().is_some_and(|t| t.generation == generation)
            {
                *current = None;
            }
        });
    }

    /// The message currently on screen.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.current
            .lock()
            .ok()
            .and_then(|current| current.as_ref().map(|t| t.message.clone()))
    }

    /// Hide the toast now.
    pub fn dismiss(&mut self) {
        self.timer.cancel();
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
    }
}
