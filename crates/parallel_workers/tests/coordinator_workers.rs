//! Worker lifecycle and concurrency tests for WorkerCoordinator.
//!
//! Tests cover:
//! - Worker termination accounting (all N threads exit, counts go quiet)
//! - Worker failure handling (task errors, panics, blocked producers)
//! - Stop timeout reporting and recovery
//! - Shutdown hook exactly-once semantics

mod common;
use common::enqueue_worker;

use anyhow::{anyhow, Result};
use parallel_workers::{
    coordinator::current_worker_id, BlobsQueue, CoordinatorConfig, CoordinatorState,
    WorkerCoordinator,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Worker that bumps a counter each iteration, with a small delay to keep the
/// loop from spinning hot.
fn counting_worker(counter: Arc<AtomicUsize>) -> impl Fn(usize) -> Result<()> + Send + 'static {
    move |_worker_id| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(1));
        Ok(())
    }
}

#[test]
fn test_all_workers_terminate() -> Result<()> {
    let num_workers = 4;
    let iterations = Arc::new(AtomicUsize::new(0));

    let mut coordinator = WorkerCoordinator::new();
    for _ in 0..num_workers {
        coordinator.register(counting_worker(iterations.clone()))?;
    }
    coordinator.start()?;
    assert!(coordinator.is_active());
    assert_eq!(coordinator.num_tasks(), num_workers);

    thread::sleep(Duration::from_millis(50));
    assert!(coordinator.stop()?);
    assert_eq!(coordinator.state(), CoordinatorState::Stopped);
    assert!(!coordinator.is_active());

    // No worker may iterate after a successful stop.
    let after_stop = iterations.load(Ordering::SeqCst);
    assert!(after_stop > 0, "workers never ran");
    thread::sleep(Duration::from_millis(100));
    assert_eq!(
        iterations.load(Ordering::SeqCst),
        after_stop,
        "a worker kept iterating after stop() returned true"
    );
    Ok(())
}

#[test]
fn test_worker_ids_are_assigned_in_registration_order() -> Result<()> {
    let num_workers = 3;
    let seen: Arc<Mutex<HashSet<(usize, usize)>>> = Arc::new(Mutex::new(HashSet::new()));

    let mut coordinator = WorkerCoordinator::new();
    for _ in 0..num_workers {
        let seen = seen.clone();
        coordinator.register(move |worker_id: usize| -> Result<()> {
            seen.lock()
                .unwrap()
                .insert((worker_id, current_worker_id()));
            thread::sleep(Duration::from_millis(1));
            Ok(())
        })?;
    }
    coordinator.start()?;
    thread::sleep(Duration::from_millis(100));
    assert!(coordinator.stop()?);

    let seen = seen.lock().unwrap();
    for &(task_arg, thread_local_id) in seen.iter() {
        assert_eq!(
            task_arg, thread_local_id,
            "task argument and thread-local worker ID disagree"
        );
    }
    let ids: HashSet<usize> = seen.iter().map(|&(task_arg, _)| task_arg).collect();
    assert_eq!(
        ids,
        (0..num_workers).collect::<HashSet<_>>(),
        "every registered task must run under its own index"
    );
    Ok(())
}

#[test]
fn test_failing_worker_is_isolated() -> Result<()> {
    let iterations = Arc::new(AtomicUsize::new(0));

    let mut coordinator = WorkerCoordinator::new();
    coordinator.register(|_worker_id: usize| -> Result<()> { Err(anyhow!("worker broke")) })?;
    coordinator.register(counting_worker(iterations.clone()))?;
    coordinator.start()?;

    thread::sleep(Duration::from_millis(100));
    assert!(
        iterations.load(Ordering::SeqCst) > 0,
        "healthy worker must keep running after its sibling failed"
    );

    assert!(coordinator.stop()?, "stop must still account for the failed worker");
    Ok(())
}

#[test]
fn test_panicking_worker_is_isolated() -> Result<()> {
    let iterations = Arc::new(AtomicUsize::new(0));

    let mut coordinator = WorkerCoordinator::new();
    coordinator.register(|_worker_id: usize| -> Result<()> { panic!("worker exploded") })?;
    coordinator.register(counting_worker(iterations.clone()))?;
    coordinator.start()?;

    thread::sleep(Duration::from_millis(100));
    assert!(
        iterations.load(Ordering::SeqCst) > 0,
        "healthy worker must keep running after its sibling panicked"
    );

    assert!(coordinator.stop()?, "stop must still account for the panicked worker");
    Ok(())
}

#[test]
fn test_stop_timeout_reports_failure_then_recovers() -> Result<()> {
    let hook_runs = Arc::new(AtomicUsize::new(0));

    let config = CoordinatorConfig::builder()
        .stop_timeout(Duration::from_millis(100))
        .build();
    let mut coordinator = WorkerCoordinator::with_config(config).with_shutdown_hook({
        let hook_runs = hook_runs.clone();
        move || {
            hook_runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });

    // Each iteration outlasts the stop timeout by a wide margin.
    coordinator.register(|_worker_id: usize| -> Result<()> {
        thread::sleep(Duration::from_millis(800));
        Ok(())
    })?;
    coordinator.start()?;

    thread::sleep(Duration::from_millis(50));
    assert!(
        !coordinator.stop()?,
        "stop must report failure while the worker is mid-iteration"
    );
    assert_eq!(
        hook_runs.load(Ordering::SeqCst),
        0,
        "shutdown hook must not run before every worker has terminated"
    );

    // The worker finishes its iteration, observes the stop flag, and exits;
    // a retried stop can then collect it and run the hook.
    thread::sleep(Duration::from_millis(1000));
    assert!(coordinator.stop()?, "retried stop must succeed once the worker exited");
    assert_eq!(coordinator.state(), CoordinatorState::Stopped);
    assert_eq!(hook_runs.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_shutdown_hook_runs_exactly_once() -> Result<()> {
    let hook_runs = Arc::new(AtomicUsize::new(0));
    let iterations = Arc::new(AtomicUsize::new(0));

    let mut coordinator = WorkerCoordinator::new().with_shutdown_hook({
        let hook_runs = hook_runs.clone();
        move || {
            hook_runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    });
    for _ in 0..2 {
        coordinator.register(counting_worker(iterations.clone()))?;
    }
    coordinator.start()?;

    assert!(coordinator.stop()?);
    assert!(coordinator.stop()?, "stop on a stopped coordinator is a no-op");
    assert_eq!(hook_runs.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_worker_blocked_on_full_queue_exits_after_close() -> Result<()> {
    let queue = Arc::new(BlobsQueue::new(2)?);

    let mut coordinator = WorkerCoordinator::new();
    coordinator.register(enqueue_worker(queue.clone(), |_| "value".to_string()))?;
    coordinator.start()?;

    // Wait until the producer has filled the queue and is blocked on it.
    let deadline = Instant::now() + Duration::from_secs(1);
    while queue.len() < 2 {
        assert!(Instant::now() < deadline, "producer never filled the queue");
        thread::sleep(Duration::from_millis(5));
    }

    queue.close();
    assert!(
        coordinator.stop()?,
        "closing the queue must unblock the producer so stop can join it"
    );
    Ok(())
}
