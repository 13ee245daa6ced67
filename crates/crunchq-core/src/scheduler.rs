//! Day-by-day assignment scheduler.
//!
//! The scheduler owns a ring buffer of deadline-bearing assignments and
//! advances a simulated calendar one day at a time under a fixed policy:
//!
//! 1. Once on leave, nothing ever runs again (terminal).
//! 2. On a trigger weekday (Tue/Wed/Fri) a new assignment is auto-added
//!    before anything else is decided.
//! 3. An empty queue just advances the date by one day.
//! 4. Otherwise all queued assignments are drained into a working list.
//! 5. Three or more pending assignments mean taking leave: everything is
//!    requeued unchanged and the date freezes.
//! 6. A single assignment with four or more days of slack is requeued and
//!    the date coasts ahead three days.
//! 7. Otherwise the list is stably sorted by days remaining, up to two
//!    assignments are completed, the rest are requeued in sorted order, and
//!    the date advances one day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::ring::RingBuffer;

/// Weekday category an assignment was handed out on. The category fixes the
/// deadline: Tuesday and Wednesday assignments are due in a week, Friday
/// assignments in two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueDay {
    Tuesday,
    Wednesday,
    Friday,
}

impl DueDay {
    /// Days from hand-out to deadline.
    pub fn lead_days(self) -> i64 {
        match self {
            DueDay::Tuesday | DueDay::Wednesday => 7,
            DueDay::Friday => 14,
        }
    }

    /// The category for a calendar weekday, if it is a trigger day.
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Tue => Some(DueDay::Tuesday),
            Weekday::Wed => Some(DueDay::Wednesday),
            Weekday::Fri => Some(DueDay::Friday),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DueDay::Tuesday => "Tuesday",
            DueDay::Wednesday => "Wednesday",
            DueDay::Friday => "Friday",
        }
    }
}

/// A deadline-bearing assignment. Immutable after creation; days remaining
/// are always derived against a caller-supplied current date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: String,
    pub day: DueDay,
    pub created_on: NaiveDate,
    pub deadline: NaiveDate,
}

impl Assignment {
    pub fn new(name: impl Into<String>, day: DueDay, created_on: NaiveDate) -> Self {
        Self {
            name: name.into(),
            day,
            created_on,
            deadline: created_on + Duration::days(day.lead_days()),
        }
    }

    /// Days from `current` to the deadline; negative once overdue.
    pub fn days_left(&self, current: NaiveDate) -> i64 {
        (self.deadline - current).num_days()
    }
}

/// Scheduler construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Ring slot count for the assignment queue.
    pub queue_capacity: usize,
    /// Auto-generate an assignment on trigger weekdays.
    pub auto_add: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 16,
            auto_add: true,
        }
    }
}

/// How a processed day ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOutcome {
    /// Queue was empty; the date advanced one day.
    Idle,
    /// A lone far-off assignment let the date skip ahead three days.
    Coasted,
    /// Three or more assignments piled up; the scheduler took leave.
    TookLeave,
    /// Up to two assignments were completed; the date advanced one day.
    Processed,
}

/// Record of one simulated day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayReport {
    /// The date that was processed.
    pub date: NaiveDate,
    /// Assignment auto-added for this weekday, if any.
    pub auto_added: Option<Assignment>,
    /// Assignments completed today, nearest deadline first.
    pub completed: Vec<Assignment>,
    /// Assignments put back into the queue, in their requeue order.
    pub requeued: Vec<Assignment>,
    pub outcome: DayOutcome,
}

/// Sorted, non-destructive view of one queued assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentStatus {
    pub name: String,
    pub deadline: NaiveDate,
    pub days_left: i64,
}

/// The day-by-day assignment scheduler. Single-threaded: driven synchronously
/// by the caller one simulated day at a time.
#[derive(Debug)]
pub struct DailyScheduler {
    config: SchedulerConfig,
    queue: RingBuffer<Assignment>,
    current_date: NaiveDate,
    on_leave: bool,
}

impl DailyScheduler {
    pub fn new(start: NaiveDate) -> Result<Self> {
        Self::with_config(start, SchedulerConfig::default())
    }

    pub fn with_config(start: NaiveDate, config: SchedulerConfig) -> Result<Self> {
        let queue = RingBuffer::new(config.queue_capacity)?;
        Ok(Self {
            config,
            queue,
            current_date: start,
            on_leave: false,
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn on_leave(&self) -> bool {
        self.on_leave
    }

    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Queued assignments sorted by days remaining, nearest deadline first.
    /// Pure projection: never reorders or mutates the queue.
    pub fn status(&self) -> Vec<AssignmentStatus> {
        let mut entries: Vec<AssignmentStatus> = self
            .queue
            .iter()
            .map(|a| AssignmentStatus {
                name: a.name.clone(),
                deadline: a.deadline,
                days_left: a.days_left(self.current_date),
            })
            .collect();
        entries.sort_by_key(|e| e.days_left);
        entries
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Add an assignment handed out today.
    pub fn add_assignment(&mut self, name: impl Into<String>, day: DueDay) -> Result<()> {
        if self.on_leave {
            return Err(SchedulerError::OnLeave.into());
        }
        let assignment = Assignment::new(name, day, self.current_date);
        self.queue.enqueue(assignment)?;
        Ok(())
    }

    /// Run one simulated day of the fixed policy.
    pub fn process_day(&mut self) -> Result<DayReport> {
        if self.on_leave {
            return Err(SchedulerError::OnLeave.into());
        }
        let today = self.current_date;

        // Auto-add happens before the emptiness check.
        let auto_added = match DueDay::from_weekday(today.weekday()) {
            Some(day) if self.config.auto_add => {
                let assignment =
                    Assignment::new(format!("{} assignment {}", day.label(), today), day, today);
                self.queue.enqueue(assignment.clone())?;
                Some(assignment)
            }
            _ => None,
        };

        if self.queue.is_empty() {
            self.current_date += Duration::days(1);
            return Ok(DayReport {
                date: today,
                auto_added,
                completed: Vec::new(),
                requeued: Vec::new(),
                outcome: DayOutcome::Idle,
            });
        }

        let mut working = self.queue.drain();

        if working.len() >= 3 {
            self.on_leave = true;
            for assignment in &working {
                self.queue.enqueue(assignment.clone())?;
            }
            // Date frozen: leave is terminal.
            return Ok(DayReport {
                date: today,
                auto_added,
                completed: Vec::new(),
                requeued: working,
                outcome: DayOutcome::TookLeave,
            });
        }

        if working.len() == 1 && working[0].days_left(today) >= 4 {
            if let Some(assignment) = working.last() {
                self.queue.enqueue(assignment.clone())?;
            }
            self.current_date += Duration::days(3);
            return Ok(DayReport {
                date: today,
                auto_added,
                completed: Vec::new(),
                requeued: working,
                outcome: DayOutcome::Coasted,
            });
        }

        // Stable sort keeps the original relative order between equal
        // days-left values.
        working.sort_by_key(|a| a.days_left(today));
        let cut = working.len().min(2);
        let leftover = working.split_off(cut);
        let completed = working;
        for assignment in &leftover {
            self.queue.enqueue(assignment.clone())?;
        }
        self.current_date += Duration::days(1);

        Ok(DayReport {
            date: today,
            auto_added,
            completed,
            requeued: leftover,
            outcome: DayOutcome::Processed,
        })
    }

    /// Process up to `days` simulated days, stopping early if leave is taken.
    pub fn fast_forward(&mut self, days: usize) -> Result<Vec<DayReport>> {
        let mut reports = Vec::new();
        for _ in 0..days {
            let report = self.process_day()?;
            let took_leave = report.outcome == DayOutcome::TookLeave;
            reports.push(report);
            if took_leave {
                break;
            }
        }
        Ok(reports)
    }
}
