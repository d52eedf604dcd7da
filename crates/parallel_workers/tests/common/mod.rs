use anyhow::{anyhow, Result};
use parallel_workers::{BlobsQueue, QueueStatus};
use std::sync::Arc;

/// Worker task that enqueues `make_value(worker_id)` once per iteration.
///
/// Treats a closed queue as the end of useful work: the returned error ends
/// the worker's loop, mirroring a producer whose downstream has shut down.
pub fn enqueue_worker<F>(
    queue: Arc<BlobsQueue<String>>,
    make_value: F,
) -> impl Fn(usize) -> Result<()> + Send + 'static
where
    F: Fn(usize) -> String + Send + 'static,
{
    move |worker_id| match queue.enqueue(make_value(worker_id)) {
        QueueStatus::Success => Ok(()),
        status => Err(anyhow!(
            "enqueue from worker {} rejected: {:?}",
            worker_id,
            status
        )),
    }
}
