//! Core error types for crunchq-core.
//!
//! Every failure in this library is a local, recoverable condition surfaced
//! as a `Result` value. Nothing here is expected to abort the process.

use thiserror::Error;

/// Core error type for crunchq-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Queue-related errors
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// Scheduler-related errors
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),

    /// Refrigerator-related errors
    #[error("Pantry error: {0}")]
    Pantry(#[from] PantryError),
}

/// Ring-buffer and task-queue errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// A ring buffer of capacity `C` holds at most `C - 1` live items, so a
    /// capacity of 0 or 1 can never hold anything.
    #[error("Invalid ring buffer capacity {capacity}: must be at least 2")]
    InvalidCapacity { capacity: usize },

    /// Enqueue attempted on a full buffer. The buffer is left unchanged and
    /// the caller may retry after a dequeue.
    #[error("Queue is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    /// Dequeue or peek attempted on an empty buffer.
    #[error("Queue is empty")]
    Empty,
}

/// Daily-scheduler errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerError {
    /// The scheduler has taken leave. Terminal: no task operation may resume.
    #[error("Scheduler is on leave; no further processing will occur")]
    OnLeave,
}

/// Refrigerator stack errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PantryError {
    /// Pop or peek attempted on an empty refrigerator.
    #[error("The refrigerator is empty")]
    Empty,

    /// Random lookup fault. Recoverable: the caller may simply retry the
    /// lookup; the stack contents are untouched.
    #[error("Someone ate it already -- try looking again")]
    Eaten,

    /// A lookup matched an item whose adjusted shelf life has elapsed. The
    /// item stays in place until the next expiry sweep removes it.
    #[error("Found it, but it expired -- time for a sweep")]
    Expired,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
