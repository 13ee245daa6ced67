//! End-to-end lifecycle tests across the ring buffer, the caffeine queue with
//! its background aging tick, and the daily scheduler.

use std::time::Duration;

use chrono::NaiveDate;
use crunchq_core::{
    AgingMode, CaffeineConfig, CaffeineQueue, DailyScheduler, DayOutcome, QueueError,
    SharedCaffeineQueue,
};

fn deterministic_config(threshold: u32, probability: f64) -> CaffeineConfig {
    CaffeineConfig {
        capacity: 8,
        threshold,
        eviction_probability: probability,
        seed: Some(2024),
        aging: AgingMode::SelfAging,
    }
}

#[test]
fn background_aging_escalates_everything_then_stops_cleanly() {
    let shared: SharedCaffeineQueue<String> =
        SharedCaffeineQueue::with_config(deterministic_config(2, 0.0)).unwrap();
    for name in ["report", "essay", "lab"] {
        shared.submit(name.to_string()).unwrap();
    }

    let clock = shared.spawn_aging(Duration::from_millis(5));
    // Plenty of intervals for every item to cross threshold 2.
    std::thread::sleep(Duration::from_millis(100));
    clock.stop();

    let snapshot = shared.snapshot();
    assert!(snapshot.pending.is_empty(), "items stuck pending");
    assert_eq!(snapshot.escalated.len(), 3);
    assert_eq!(snapshot.bounced_count, 0);

    // Stop is one-shot and final: the state no longer changes.
    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(shared.snapshot(), snapshot);

    // Escalated items come out in insertion order.
    assert_eq!(shared.take_next().unwrap(), "report");
    assert_eq!(shared.take_next().unwrap(), "essay");
    assert_eq!(shared.take_next().unwrap(), "lab");
    assert_eq!(shared.take_next().unwrap_err(), QueueError::Empty);
}

#[test]
fn background_aging_bounces_everything_at_probability_one() {
    let shared: SharedCaffeineQueue<u32> =
        SharedCaffeineQueue::with_config(deterministic_config(3, 1.0)).unwrap();
    for i in 0..4 {
        shared.submit(i).unwrap();
    }

    let clock = shared.spawn_aging(Duration::from_millis(5));
    std::thread::sleep(Duration::from_millis(100));
    clock.stop();

    let snapshot = shared.snapshot();
    assert_eq!(snapshot.bounced_count, 4);
    assert!(snapshot.pending.is_empty());
    assert!(snapshot.escalated.is_empty());
}

#[test]
fn caller_thread_keeps_submitting_while_ticks_run() {
    // Lock-protected queue stays consistent under concurrent submit + tick.
    let shared: SharedCaffeineQueue<usize> =
        SharedCaffeineQueue::with_config(CaffeineConfig {
            capacity: 64,
            threshold: 1_000_000,
            eviction_probability: 0.3,
            seed: Some(5),
            aging: AgingMode::SelfAging,
        })
        .unwrap();

    let clock = shared.spawn_aging(Duration::from_millis(1));
    for i in 0..40 {
        shared.submit(i).unwrap();
        std::thread::sleep(Duration::from_millis(1));
    }
    clock.stop();

    // Nothing crossed the huge threshold, so all 40 are still pending and
    // still in FIFO order.
    assert_eq!(shared.pending_len(), 40);
    for i in 0..40 {
        assert_eq!(shared.take_next().unwrap(), i);
    }
}

#[test]
fn synchronous_drain_all_classifies_a_full_backlog() {
    let mut queue = CaffeineQueue::with_config(CaffeineConfig {
        capacity: 5,
        threshold: 3,
        eviction_probability: 0.3,
        seed: Some(11),
        aging: AgingMode::SelfAging,
    })
    .unwrap();
    for i in 0..4 {
        queue.submit(i).unwrap();
    }
    for _ in 0..2 {
        queue.age_tick().unwrap();
    }

    let outcome = queue.drain_all();
    assert!(queue.is_empty());
    assert_eq!(outcome.completed.len() + outcome.bounced.len(), 4);
}

#[test]
fn scheduler_semester_until_leave() {
    // With auto-add on every Tue/Wed/Fri, a start on Monday accumulates
    // assignments until a day sees three pending and the scheduler quits.
    let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(); // Monday
    let mut scheduler = DailyScheduler::new(start).unwrap();

    let reports = scheduler.fast_forward(60).unwrap();
    let last = reports.last().expect("at least one day processed");

    if scheduler.on_leave() {
        assert_eq!(last.outcome, DayOutcome::TookLeave);
        assert!(scheduler.pending_len() >= 3);
        // The date froze on the day leave was taken.
        assert_eq!(scheduler.current_date(), last.date);
        // Terminal: nothing processes afterwards.
        assert!(scheduler.process_day().is_err());
    } else {
        // Never hit the wall in 60 days: every report advanced or coasted.
        assert_eq!(reports.len(), 60);
    }
}

#[test]
fn scheduler_status_never_perturbs_processing() {
    let start = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(); // Tuesday
    let mut with_status = DailyScheduler::new(start).unwrap();
    let mut without = DailyScheduler::new(start).unwrap();

    for _ in 0..5 {
        let _ = with_status.status();
        let _ = with_status.status();
        let a = with_status.process_day();
        let b = without.process_day();
        match (a, b) {
            (Ok(ra), Ok(rb)) => assert_eq!(ra.outcome, rb.outcome),
            (Err(_), Err(_)) => {}
            _ => panic!("status() changed scheduling behavior"),
        }
    }
    assert_eq!(with_status.current_date(), without.current_date());
    assert_eq!(with_status.status(), without.status());
}
