//! Thread-local storage for worker identification.
//!
//! Provides a thread-local worker ID that allows workers to identify themselves
//! for debugging and error messages.

use std::cell::RefCell;

thread_local! {
    /// Thread-local worker ID.
    ///
    /// Each worker thread is assigned a unique ID (0 to num_workers-1) when
    /// spawned. Code running outside a worker thread observes the default of 0.
    pub static WORKER_ID: RefCell<usize> = RefCell::new(0);
}

/// Returns the worker ID of the calling thread.
pub fn current_worker_id() -> usize {
    WORKER_ID.with(|id| *id.borrow())
}
