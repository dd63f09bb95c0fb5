//! Collapse rapid calls into one after a quiet window.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default quiet window for search input.
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Delivers only the last value of a burst, once no new value has arrived for
/// `window`.
///
/// Values are handed to a background task; `on_settle` runs on that task.
/// Dropping the debouncer (or calling [`shutdown`](Self::shutdown)) delivers
/// a pending value immediately instead of losing it.
#[derive(Debug)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debouncing task. Must be called inside a tokio runtime.
    pub fn new<F>(window: Duration, mut on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            while let Some(mut pending) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => pending = value,
                            None => {
                                on_settle(pending);
                                return;
                            }
                        },
                        _ = tokio::time::sleep(window) => {
                            on_settle(pending);
                            break;
                        }
                    }
                }
            }
        });

        Self { tx, task }
    }

    /// Submit a value; it replaces any value still waiting in the window.
    pub fn call(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::warn!("debouncer task has stopped; dropping value");
        }
    }

    /// Flush any pending value and wait for the task to finish.
    pub async fn shutdown(self) {
        let Self { tx, task } = self;
        drop(tx);
        if let Err(err) = task.await {
            tracing::error!("debouncer task failed: {err:?}");
        }
    }
}
