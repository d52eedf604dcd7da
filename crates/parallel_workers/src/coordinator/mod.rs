//! src/coordinator/mod.rs
//!
//! This module implements the `WorkerCoordinator`.
//!
//! The `WorkerCoordinator` manages a fixed pool of background worker threads
//! plus optional lifecycle hooks. Tasks are registered up front, an init hook
//! runs once before the first worker iteration, and a shutdown hook runs once
//! after every worker thread has terminated.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌─────────────────┐
//!                  │  WorkerTask(s)  │ (run(worker_id), repeated per iteration)
//!                  └────────┬────────┘
//!                           │ registered before start
//!                           ↓
//!                 ┌───────────────────┐
//!                 │ WorkerCoordinator │ ←──── CoordinatorConfig
//!                 └────────┬──────────┘       (worker_name, stop_timeout)
//!                          │
//!          start(): init hook, then spawn
//!                          ↓
//!                   [Worker Threads]  (one per task, cooperative stop flag)
//!                          │
//!           stop(): flag + bounded join, then
//!                          ↓
//!                   shutdown hook (exactly once)
//! ```
//!
//! # Module Structure
//!
//! ```text
//! src/coordinator/
//! ├── mod.rs          # Public API exports + module-level docs
//! ├── config.rs       # CoordinatorConfig and builder
//! ├── lifecycle.rs    # WorkerCoordinator state machine and hooks
//! ├── pool.rs         # WorkerPool: thread spawning, stop flag, bounded join
//! └── task.rs         # WorkerTask trait
//! ```
//!
//! # Example Usage
//!
//! ```ignore
//! let mut coordinator = WorkerCoordinator::new()
//!     .with_init_hook(|_c: &WorkerCoordinator| {
//!         // runs once, before any worker iteration
//!         Ok(())
//!     });
//!
//! for _ in 0..2 {
//!     let queue = queue.clone();
//!     coordinator.register(move |worker_id: usize| -> Result<()> {
//!         queue.enqueue(worker_id.to_string());
//!         Ok(())
//!     })?;
//! }
//!
//! coordinator.start()?;    // non-blocking
//! // ... consume whatever the workers produce ...
//! assert!(coordinator.stop()?);
//! ```
//!
//! # Notes
//! - Cancellation is cooperative: a task that blocks indefinitely inside
//!   `run` will hold up `stop()` until the stop timeout elapses.
//! - A task that returns an error (or panics) ends only its own worker
//!   thread; siblings and the coordinator keep running.

mod config;
mod lifecycle;
mod pool;
mod task;

pub use config::{CoordinatorConfig, CoordinatorConfigBuilder};
pub use lifecycle::{CoordinatorState, WorkerCoordinator};
pub use task::WorkerTask;

pub use crate::common::thread::{current_worker_id, WORKER_ID};
