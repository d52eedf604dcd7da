//! Worker pool implementation for the coordinator.
//!
//! Spawns one named thread per registered task and supervises the canonical
//! worker loop: check the stop flag, run one task iteration, exit on error.
//!
//! # Key features
//! - Cooperative shutdown via a shared `AtomicBool` flag
//! - Bounded join: worker exits are observed on a completion channel, so
//!   `stop()` can give up after a timeout instead of blocking forever
//! - Graceful shutdown on drop
//! - Thread-local worker IDs for debugging

use anyhow::{Context, Result};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error};

use super::task::WorkerTask;
use crate::common::thread::WORKER_ID;

/// Thread pool running registered worker tasks.
///
/// Communication with worker threads:
/// - Stop flag: written once by `signal_shutdown`, polled by workers between
///   task iterations
/// - Completion channel: each worker sends its ID as its final action, so the
///   pool can wait for termination with a deadline. Disconnection of the
///   channel means every worker is gone, sent or not (a panicking worker
///   drops its sender without sending).
pub(crate) struct WorkerPool {
    workers: Vec<thread::JoinHandle<()>>,
    done_rx: Receiver<usize>,
    shutdown: Arc<AtomicBool>,
}

impl WorkerPool {
    /// Spawns one worker thread per task, named `"{worker_name}-{worker_id}"`.
    pub(crate) fn spawn(tasks: Vec<Box<dyn WorkerTask>>, worker_name: &str) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let (done_tx, done_rx) = unbounded();
        let mut workers = Vec::with_capacity(tasks.len());

        for (worker_id, task) in tasks.into_iter().enumerate() {
            let shutdown_clone = shutdown.clone();
            let done_tx: Sender<usize> = done_tx.clone();

            let handle = thread::Builder::new()
                .name(format!("{}-{}", worker_name, worker_id))
                .spawn(move || {
                    WORKER_ID.with(|id| *id.borrow_mut() = worker_id);
                    run_worker_loop(worker_id, task.as_ref(), &shutdown_clone);
                    let _ = done_tx.send(worker_id);
                })
                .with_context(|| format!("Failed to spawn worker thread {}", worker_id))?;

            workers.push(handle);
        }

        // Workers hold the only remaining senders; dropping ours makes channel
        // disconnection equivalent to "all workers exited".
        drop(done_tx);

        Ok(Self {
            workers,
            done_rx,
            shutdown,
        })
    }

    /// Raises the stop flag. Workers observe it between task iterations.
    pub(crate) fn signal_shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    pub(crate) fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Signals shutdown and waits for every worker thread to terminate.
    ///
    /// Returns false if the deadline passes first; unfinished threads are left
    /// detached and a later call may collect them once they exit.
    pub(crate) fn join_with_timeout(&mut self, timeout: Duration) -> bool {
        self.signal_shutdown();

        let deadline = Instant::now() + timeout;
        let mut remaining = self.workers.len();

        while remaining > 0 {
            let wait = match deadline.checked_duration_since(Instant::now()) {
                Some(wait) => wait,
                None => return false,
            };
            match self.done_rx.recv_timeout(wait) {
                Ok(worker_id) => {
                    debug!(worker_id, "worker thread exited");
                    remaining -= 1;
                }
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        // Every worker has exited; joining the handles is immediate and lets
        // us report panics.
        for worker in self.workers.drain(..) {
            if let Err(panic) = worker.join() {
                error!("worker thread panicked: {}", panic_message(&*panic));
            }
        }

        true
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Signal shutdown to all workers
        self.shutdown.store(true, Ordering::Relaxed);

        // Wait for workers to finish
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

/// Repeatedly runs `task` until the stop flag is raised or the task fails.
fn run_worker_loop(worker_id: usize, task: &dyn WorkerTask, shutdown: &AtomicBool) {
    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        if let Err(err) = task.run(worker_id) {
            error!(worker_id, "worker task failed, stopping this worker: {:#}", err);
            break;
        }
    }

    debug!(worker_id, "worker loop finished");
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}
