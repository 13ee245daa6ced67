//! Caffeine-driven task queue.
//!
//! Pending tasks wait in a ring buffer and accumulate a synthetic caffeine
//! level while they sit there. Each aging tick raises every live item's level;
//! an item that reaches the configured threshold is put through an independent
//! Bernoulli trial: with `eviction_probability` it bounces (permanently
//! discarded into the bounce log), otherwise it is escalated into a
//! priority-serve set that `take_next` drains before the ring.
//!
//! ## Item lifecycle
//!
//! ```text
//! Pending ──────> Escalated ──────> Completed
//!    |    (tick)      |    (take_next / drain)
//!    |                +───────────> Bounced
//!    |                     (drain trial)
//!    +─────────────────────────────> Completed | Bounced
//!                (take_next / drain_all)
//! ```
//!
//! `Completed` and `Bounced` are terminal.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QueueError;
use crate::ring::RingBuffer;

/// How queued items accumulate caffeine on each aging tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingMode {
    /// Each tick adds the queue's current ambient caffeine level to every item.
    Ambient,
    /// Each tick adds exactly 1 to every item, ignoring the ambient level.
    SelfAging,
}

/// Construction parameters for a [`CaffeineQueue`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaffeineConfig {
    /// Ring buffer slot count (holds at most `capacity - 1` pending items).
    pub capacity: usize,
    /// Caffeine level at which an item faces the bounce-or-escalate trial.
    pub threshold: u32,
    /// Probability that a threshold-crossing item bounces (0.0-1.0).
    pub eviction_probability: f64,
    /// Random seed for reproducibility (None = entropy).
    pub seed: Option<u64>,
    /// Aging policy.
    pub aging: AgingMode,
}

impl Default for CaffeineConfig {
    fn default() -> Self {
        Self {
            capacity: 16,
            threshold: 30,
            eviction_probability: 0.3,
            seed: None,
            aging: AgingMode::Ambient,
        }
    }
}

/// A queued task plus its aging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueItem<T> {
    pub id: Uuid,
    pub payload: T,
    /// Non-negative, monotonically non-decreasing until the item is removed.
    pub caffeine_level: u32,
    pub enqueued_at: DateTime<Utc>,
}

impl<T> QueueItem<T> {
    fn new(payload: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
            caffeine_level: 0,
            enqueued_at: Utc::now(),
        }
    }
}

/// What one aging tick did.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickSummary {
    /// Items whose caffeine level was raised this tick.
    pub aged: usize,
    /// Items moved to the escalation set this tick.
    pub escalated: usize,
    /// Items discarded into the bounce log this tick.
    pub bounced: usize,
}

/// Result of a synchronous combined drain.
#[derive(Debug, Clone)]
pub struct DrainOutcome<T> {
    pub completed: Vec<T>,
    pub bounced: Vec<T>,
}

impl<T> Default for DrainOutcome<T> {
    fn default() -> Self {
        Self {
            completed: Vec::new(),
            bounced: Vec::new(),
        }
    }
}

/// Read-only projection of the queue. Building one never mutates the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub ambient_level: u32,
    pub pending: Vec<ItemSnapshot>,
    pub escalated: Vec<ItemSnapshot>,
    pub completed_count: usize,
    pub bounced_count: usize,
}

/// Per-item view within a [`QueueSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: Uuid,
    pub caffeine_level: u32,
}

/// Bounded, aging task queue with probabilistic eviction.
pub struct CaffeineQueue<T> {
    config: CaffeineConfig,
    ring: RingBuffer<QueueItem<T>>,
    /// Items promoted past the threshold, served before the ring, FIFO.
    escalated: VecDeque<QueueItem<T>>,
    completed: Vec<T>,
    bounced: Vec<T>,
    ambient_level: u32,
    rng: Mcg128Xsl64,
}

impl<T> CaffeineQueue<T> {
    /// Create a queue with default parameters.
    pub fn new() -> Result<Self, QueueError> {
        Self::with_config(CaffeineConfig::default())
    }

    /// Create a queue with custom parameters.
    pub fn with_config(config: CaffeineConfig) -> Result<Self, QueueError> {
        let ring = RingBuffer::new(config.capacity)?;
        let rng = match config.seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Ok(Self {
            config,
            ring,
            escalated: VecDeque::new(),
            completed: Vec::new(),
            bounced: Vec::new(),
            ambient_level: 0,
            rng,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &CaffeineConfig {
        &self.config
    }

    /// Pending items in the ring (excludes the escalation set).
    pub fn pending_len(&self) -> usize {
        self.ring.len()
    }

    /// Items awaiting expedited service.
    pub fn escalated_len(&self) -> usize {
        self.escalated.len()
    }

    /// Total items awaiting service, pending and escalated together.
    pub fn len(&self) -> usize {
        self.ring.len() + self.escalated.len()
    }

    /// True when both the ring and the escalation set are empty.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty() && self.escalated.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    pub fn ambient_level(&self) -> u32 {
        self.ambient_level
    }

    /// Payloads that completed, in completion order.
    pub fn completed(&self) -> &[T] {
        &self.completed
    }

    /// Payloads that bounced, in bounce order.
    pub fn bounced(&self) -> &[T] {
        &self.bounced
    }

    /// Build a non-destructive status projection. Idempotent: calling this
    /// any number of times yields identical output and leaves dequeue order
    /// untouched.
    pub fn snapshot(&self) -> QueueSnapshot {
        let view = |item: &QueueItem<T>| ItemSnapshot {
            id: item.id,
            caffeine_level: item.caffeine_level,
        };
        QueueSnapshot {
            ambient_level: self.ambient_level,
            pending: self.ring.iter().map(view).collect(),
            escalated: self.escalated.iter().map(view).collect(),
            completed_count: self.completed.len(),
            bounced_count: self.bounced.len(),
        }
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Enqueue a task with a fresh caffeine level of 0.
    ///
    /// A full ring reports `CapacityExceeded`; the task is dropped and the
    /// caller may retry after the queue drains.
    pub fn submit(&mut self, payload: T) -> Result<Uuid, QueueError> {
        if self.ring.is_full() {
            return Err(QueueError::CapacityExceeded {
                capacity: self.config.capacity,
            });
        }
        let item = QueueItem::new(payload);
        let id = item.id;
        self.ring.enqueue(item)?;
        Ok(id)
    }

    /// Raise the shared ambient caffeine level consumed by `Ambient` aging.
    pub fn add_caffeine(&mut self, units: u32) {
        self.ambient_level = self.ambient_level.saturating_add(units);
    }

    /// Age every pending item once and classify threshold-crossers.
    ///
    /// Each item at or above the threshold draws an independent Bernoulli
    /// trial: a hit bounces it, a miss escalates it. The whole scan runs as
    /// one pass, so callers holding a lock around this call see no partial
    /// update.
    pub fn age_tick(&mut self) -> Result<TickSummary, QueueError> {
        let increment = self.tick_increment();
        let mut summary = TickSummary::default();

        let survivors: Vec<QueueItem<T>> = self
            .ring
            .drain()
            .into_iter()
            .filter_map(|mut item| {
                item.caffeine_level = item.caffeine_level.saturating_add(increment);
                summary.aged += 1;
                if item.caffeine_level >= self.config.threshold {
                    if self.rng.gen::<f64>() < self.config.eviction_probability {
                        summary.bounced += 1;
                        self.bounced.push(item.payload);
                    } else {
                        summary.escalated += 1;
                        self.escalated.push_back(item);
                    }
                    None
                } else {
                    Some(item)
                }
            })
            .collect();

        // Survivors never outnumber what was just drained, so these re-enqueues
        // cannot hit capacity.
        for item in survivors {
            self.ring.enqueue(item)?;
        }
        Ok(summary)
    }

    /// Serve the next task: the escalation set first (insertion order), then
    /// the ring. A successfully taken task counts as completed.
    pub fn take_next(&mut self) -> Result<T, QueueError>
    where
        T: Clone,
    {
        let item = match self.escalated.pop_front() {
            Some(item) => item,
            None => self.ring.dequeue()?,
        };
        self.completed.push(item.payload.clone());
        Ok(item.payload)
    }

    /// Synchronous combined drain: age every queued item once with the current
    /// increment, then classify everything (escalated items included) as
    /// completed or bounced via the same Bernoulli rule. The ring and the
    /// escalation set are left empty.
    pub fn drain_all(&mut self) -> DrainOutcome<T>
    where
        T: Clone,
    {
        let increment = self.tick_increment();
        let mut outcome = DrainOutcome::default();

        let escalated: Vec<QueueItem<T>> = self.escalated.drain(..).collect();
        let pending = self.ring.drain();

        for item in escalated {
            self.classify(item, &mut outcome);
        }
        for mut item in pending {
            item.caffeine_level = item.caffeine_level.saturating_add(increment);
            self.classify(item, &mut outcome);
        }
        outcome
    }

    fn classify(&mut self, item: QueueItem<T>, outcome: &mut DrainOutcome<T>)
    where
        T: Clone,
    {
        if item.caffeine_level >= self.config.threshold
            && self.rng.gen::<f64>() < self.config.eviction_probability
        {
            self.bounced.push(item.payload.clone());
            outcome.bounced.push(item.payload);
        } else {
            self.completed.push(item.payload.clone());
            outcome.completed.push(item.payload);
        }
    }

    fn tick_increment(&self) -> u32 {
        match self.config.aging {
            AgingMode::Ambient => self.ambient_level,
            AgingMode::SelfAging => 1,
        }
    }
}
