//! Deferred execution of artifact deliveries.
//!
//! The batch exporter does not sleep or spawn on its own; it hands each
//! delivery to a [`DeliveryScheduler`] together with the delay, measured
//! from the moment the batch was started.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::runtime::Handle;

use crate::error::{TimetableError, TimetableResult};

/// A deferred unit of work.
pub type DeliveryTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks after a delay.
pub trait DeliveryScheduler: Send + Sync {
    /// Run `task` once `delay` has elapsed. Must not block.
    fn schedule(&self, delay: Duration, task: DeliveryTask);
}

/// Scheduler backed by tokio timers. Tasks run on the blocking pool once
/// their delay has elapsed.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Scheduler bound to the runtime of the calling context.
    pub fn current() -> TimetableResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| TimetableError::configuration(format!("no tokio runtime: {}", e)))
    }
}

impl DeliveryScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: DeliveryTask) {
        let handle = self.handle.clone();
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // sinks may do blocking I/O
            if let Err(e) = handle.spawn_blocking(task).await {
                log::warn!("delivery task panicked: {}", e);
            }
        });
    }
}

/// Scheduler that queues tasks until told to run them.
///
/// Runs are deterministic: tasks execute in delay order, ties in scheduling
/// order, on the calling thread.
#[derive(Default)]
pub struct QueuedScheduler {
    queue: Mutex<Vec<(Duration, DeliveryTask)>>,
}

impl QueuedScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.lock().len()
    }

    /// Delays of the waiting tasks, in scheduling order.
    pub fn delays(&self) -> Vec<Duration> {
        self.queue.lock().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run every queued task. Returns how many ran.
    pub fn run_all(&self) -> usize {
        let mut tasks = std::mem::take(&mut *self.queue.lock());
        tasks.sort_by_key(|(delay, _)| *delay);
        let count = tasks.len();
        for (_, task) in tasks {
            task();
        }
        count
    }
}

impl DeliveryScheduler for QueuedScheduler {
    fn schedule(&self, delay: Duration, task: DeliveryTask) {
        self.queue.lock().push((delay, task));
    }
}

impl std::fmt::Debug for QueuedScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueuedScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
