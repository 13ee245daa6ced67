//! Background tick driver and the lock-protected shared queue.
//!
//! [`TickClock`] models the monitor process: a worker thread that invokes a
//! callback once per interval until it receives a one-shot stop signal.
//! [`SharedCaffeineQueue`] wraps a [`CaffeineQueue`] in a single mutex so the
//! caller thread and the background aging tick never observe a partial
//! update; every read-modify-write sequence happens under one lock
//! acquisition, and the aging pass holds the lock for the whole scan.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use uuid::Uuid;

use crate::caffeine::{CaffeineConfig, CaffeineQueue, DrainOutcome, QueueSnapshot, TickSummary};
use crate::error::QueueError;

/// Periodic background driver with deterministic shutdown.
#[derive(Debug)]
pub struct TickClock {
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl TickClock {
    /// Spawn a worker that calls `on_tick` once per `interval` until stopped.
    ///
    /// The stop channel doubles as the timer: the worker waits on it with a
    /// timeout, so a stop signal interrupts the wait immediately instead of
    /// being noticed one interval late.
    pub fn spawn<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel();
        let handle = std::thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => on_tick(),
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });
        Self {
            stop_tx,
            handle: Some(handle),
        }
    }

    /// Signal the worker to stop and join it. No tick callback runs after
    /// this returns.
    pub fn stop(mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for TickClock {
    fn drop(&mut self) {
        // Best effort: a dropped clock still tells the worker to exit.
        let _ = self.stop_tx.send(());
    }
}

/// A [`CaffeineQueue`] behind a single mutex, safe to share with a
/// background aging tick.
pub struct SharedCaffeineQueue<T> {
    inner: Arc<Mutex<CaffeineQueue<T>>>,
}

impl<T> Clone for SharedCaffeineQueue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> SharedCaffeineQueue<T> {
    pub fn new() -> Result<Self, QueueError> {
        Ok(Self::from_queue(CaffeineQueue::new()?))
    }

    pub fn with_config(config: CaffeineConfig) -> Result<Self, QueueError> {
        Ok(Self::from_queue(CaffeineQueue::with_config(config)?))
    }

    pub fn from_queue(queue: CaffeineQueue<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(queue)),
        }
    }

    /// Start the background aging tick against this queue.
    pub fn spawn_aging(&self, interval: Duration) -> TickClock {
        let shared = self.clone();
        TickClock::spawn(interval, move || {
            // Survivor re-enqueue cannot exceed capacity, so the tick cannot
            // actually fail; a poisoned-lock recovery is the only edge here.
            let _ = shared.lock().age_tick();
        })
    }

    pub fn submit(&self, payload: T) -> Result<Uuid, QueueError> {
        self.lock().submit(payload)
    }

    pub fn add_caffeine(&self, units: u32) {
        self.lock().add_caffeine(units);
    }

    pub fn age_tick(&self) -> Result<TickSummary, QueueError> {
        self.lock().age_tick()
    }

    pub fn take_next(&self) -> Result<T, QueueError>
    where
        T: Clone,
    {
        self.lock().take_next()
    }

    pub fn drain_all(&self) -> DrainOutcome<T>
    where
        T: Clone,
    {
        self.lock().drain_all()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        self.lock().snapshot()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending_len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, CaffeineQueue<T>> {
        // A panicked holder leaves the queue in a consistent state (every
        // operation completes its pass before returning), so recover rather
        // than propagate the poison.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
