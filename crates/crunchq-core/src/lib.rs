//! # Crunchq Core Library
//!
//! Core logic for crunchq, a set of playful scheduling simulations built on
//! one fixed-capacity circular queue. Everything is synchronous library code;
//! the CLI binary is a thin driver over this crate.
//!
//! ## Architecture
//!
//! - **RingBuffer**: bounded FIFO with wrap-around indices, one slot
//!   sacrificed to disambiguate full from empty
//! - **CaffeineQueue**: pending tasks age per tick and face a probabilistic
//!   bounce-or-escalate trial once they cross a caffeine threshold
//! - **TickClock**: background worker that drives the aging tick against a
//!   mutex-shared queue, with a one-shot stop for deterministic shutdown
//! - **DailyScheduler**: simulated assignment calendar with the
//!   leave/coast/process-two daily policy
//! - **RefrigeratorStack**: bounded LIFO collaborator with shelf-life expiry
//!   and freshness decay
//!
//! ## Key Components
//!
//! - [`RingBuffer`]: the circular-queue substrate
//! - [`CaffeineQueue`] / [`SharedCaffeineQueue`]: the aging task queue
//! - [`DailyScheduler`]: the day-by-day deadline policy
//! - [`TickClock`]: the periodic monitor process

pub mod caffeine;
pub mod clock;
pub mod error;
pub mod pantry;
pub mod ring;
pub mod scheduler;

pub use caffeine::{
    AgingMode, CaffeineConfig, CaffeineQueue, DrainOutcome, ItemSnapshot, QueueItem,
    QueueSnapshot, TickSummary,
};
pub use clock::{SharedCaffeineQueue, TickClock};
pub use error::{CoreError, PantryError, QueueError, Result, SchedulerError};
pub use pantry::{PantryConfig, RefrigeratorStack, MAX_FRESHNESS};
pub use ring::RingBuffer;
pub use scheduler::{
    Assignment, AssignmentStatus, DailyScheduler, DayOutcome, DayReport, DueDay, SchedulerConfig,
};
