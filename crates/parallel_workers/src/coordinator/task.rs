//! src/coordinator/task.rs
//!
//! The unit of repeated background work.

use anyhow::Result;

/// A unit of repeated background work identified by an index.
///
/// The coordinator invokes `run` in a loop on a dedicated thread until a stop
/// signal is observed, so a single call should represent one bounded
/// iteration of work (produce one item, poll one source, ...), not an
/// open-ended loop of its own.
///
/// Returning an error ends the calling worker thread; sibling workers and the
/// coordinator are unaffected.
///
/// Implemented for any `Fn(usize) -> Result<()>` closure. Workers that share
/// state capture it via `Arc`:
///
/// ```ignore
/// let queue = Arc::new(BlobsQueue::new(1000)?);
/// for _ in 0..2 {
///     let queue = queue.clone();
///     coordinator.register(move |worker_id: usize| -> Result<()> {
///         match queue.enqueue(worker_id.to_string()) {
///             QueueStatus::Success => Ok(()),
///             status => Err(anyhow!("queue rejected value: {:?}", status)),
///         }
///     })?;
/// }
/// ```
pub trait WorkerTask: Send + 'static {
    /// Runs one iteration of work for the worker identified by `worker_id`.
    fn run(&self, worker_id: usize) -> Result<()>;
}

impl<F> WorkerTask for F
where
    F: Fn(usize) -> Result<()> + Send + 'static,
{
    fn run(&self, worker_id: usize) -> Result<()> {
        self(worker_id)
    }
}
