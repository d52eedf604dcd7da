//! src/queue.rs
//!
//! Bounded FIFO queue with explicit close semantics.
//!
//! `BlobsQueue` is the channel workers use to hand values to a downstream
//! consumer. Operations report a `QueueStatus` instead of erroring: closing
//! the queue is a normal part of shutdown, and a worker blocked on a full
//! queue must be able to observe the close and back out.
//!
//! Built on a crossbeam bounded channel; blocked operations poll the closed
//! flag on a short timeout, the same pattern the worker loop uses for its
//! stop flag.

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, SendTimeoutError, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// How often blocked queue operations re-check the closed flag (milliseconds).
const CLOSE_POLL_MS: u64 = 10;

/// Outcome of a queue operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueStatus {
    /// The value was transferred.
    Success,
    /// Nothing buffered right now (non-blocking reads only).
    Empty,
    /// The queue is closed: enqueues are rejected, and every buffered value
    /// has already been drained.
    Closed,
}

impl QueueStatus {
    pub fn is_success(self) -> bool {
        self == QueueStatus::Success
    }
}

/// Bounded FIFO channel with success/closed status on enqueue/dequeue.
///
/// Shared across threads via `Arc`; all operations take `&self`.
pub struct BlobsQueue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
    closed: AtomicBool,
}

impl<T> BlobsQueue<T> {
    /// Creates a queue holding at most `capacity` values.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(anyhow!(
                "Cannot create BlobsQueue with capacity 0. \
                Capacity must be > 0 to prevent deadlocks."
            ));
        }
        let (tx, rx) = bounded(capacity);
        Ok(Self {
            tx,
            rx,
            closed: AtomicBool::new(false),
        })
    }

    /// Adds a value, blocking while the queue is full.
    ///
    /// Returns `Closed` (dropping the value) if the queue is closed, including
    /// when the close happens while this call is blocked on a full queue.
    pub fn enqueue(&self, value: T) -> QueueStatus {
        let mut value = value;
        loop {
            if self.closed.load(Ordering::Acquire) {
                return QueueStatus::Closed;
            }
            match self
                .tx
                .send_timeout(value, Duration::from_millis(CLOSE_POLL_MS))
            {
                Ok(()) => return QueueStatus::Success,
                Err(SendTimeoutError::Timeout(rejected)) => value = rejected,
                Err(SendTimeoutError::Disconnected(_)) => return QueueStatus::Closed,
            }
        }
    }

    /// Removes the oldest value, blocking while the queue is empty.
    ///
    /// After `close()`, buffered values are still drained with `Success`;
    /// once the queue is closed and empty this returns `(None, Closed)`.
    pub fn dequeue(&self) -> (Option<T>, QueueStatus) {
        loop {
            match self.rx.recv_timeout(Duration::from_millis(CLOSE_POLL_MS)) {
                Ok(value) => return (Some(value), QueueStatus::Success),
                Err(RecvTimeoutError::Timeout) => {
                    if self.closed.load(Ordering::Acquire) {
                        // Drain anything that raced in just before the close.
                        return match self.rx.try_recv() {
                            Ok(value) => (Some(value), QueueStatus::Success),
                            Err(_) => (None, QueueStatus::Closed),
                        };
                    }
                }
                Err(RecvTimeoutError::Disconnected) => return (None, QueueStatus::Closed),
            }
        }
    }

    /// Non-blocking dequeue. Returns `Empty` when nothing is buffered on an
    /// open queue.
    pub fn try_dequeue(&self) -> (Option<T>, QueueStatus) {
        match self.rx.try_recv() {
            Ok(value) => (Some(value), QueueStatus::Success),
            Err(TryRecvError::Empty) => {
                if self.closed.load(Ordering::Acquire) {
                    (None, QueueStatus::Closed)
                } else {
                    (None, QueueStatus::Empty)
                }
            }
            Err(TryRecvError::Disconnected) => (None, QueueStatus::Closed),
        }
    }

    /// Closes the queue. Idempotent. Blocked enqueues observe `Closed`;
    /// dequeues drain what is buffered and then observe `Closed`.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of values currently buffered.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.tx.capacity().unwrap_or(0)
    }
}
