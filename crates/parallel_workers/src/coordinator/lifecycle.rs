//! src/coordinator/lifecycle.rs
//!
//! WorkerCoordinator: the register/start/stop state machine around the
//! worker pool, plus the init and shutdown hooks.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::config::CoordinatorConfig;
use super::pool::WorkerPool;
use super::task::WorkerTask;
use crate::error::CoordinatorError;

type InitHook = Box<dyn FnOnce(&WorkerCoordinator) -> Result<()> + Send>;
type ShutdownHook = Box<dyn FnOnce() -> Result<()> + Send>;

/// Lifecycle state of a coordinator. `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoordinatorState {
    /// Accepting task registrations; no threads running.
    Created,
    /// Worker threads launched.
    Running,
    /// All workers terminated and the shutdown hook (if any) has run.
    Stopped,
}

/// Lifecycle manager for a pool of worker tasks plus init/shutdown hooks.
///
/// # Lifecycle
///
/// 1. Create (optionally attaching hooks), then `register` tasks
/// 2. `start()`: runs the init hook, then launches one thread per task and
///    returns immediately
/// 3. `stop()`: raises the stop flag, joins all workers (bounded by
///    `stop_timeout`), then runs the shutdown hook exactly once
///
/// Dropping a running coordinator signals shutdown and joins the workers
/// without a timeout; hooks are not run from drop.
pub struct WorkerCoordinator {
    config: CoordinatorConfig,
    state: CoordinatorState,
    tasks: Vec<Box<dyn WorkerTask>>,
    launched_tasks: usize,
    init_hook: Option<InitHook>,
    shutdown_hook: Option<ShutdownHook>,
    pool: Option<WorkerPool>,
}

impl WorkerCoordinator {
    pub fn new() -> Self {
        Self::with_config(CoordinatorConfig::default())
    }

    pub fn with_config(config: CoordinatorConfig) -> Self {
        Self {
            config,
            state: CoordinatorState::Created,
            tasks: Vec::new(),
            launched_tasks: 0,
            init_hook: None,
            shutdown_hook: None,
            pool: None,
        }
    }

    /// Attach a hook that `start()` runs to completion before any worker
    /// iteration. On hook failure `start()` propagates the error and launches
    /// nothing; the hook itself is consumed by the attempt.
    pub fn with_init_hook<F>(mut self, hook: F) -> Self
    where
        F: FnOnce(&WorkerCoordinator) -> Result<()> + Send + 'static,
    {
        self.init_hook = Some(Box::new(hook));
        self
    }

    /// Attach a hook that runs exactly once, after every worker thread has
    /// terminated. It is skipped when `stop()` times out (workers are still
    /// alive then) and runs on a later successful `stop()` instead.
    pub fn with_shutdown_hook<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        self.shutdown_hook = Some(Box::new(hook));
        self
    }

    /// Adds a task to the pool. Only valid before `start()`.
    pub fn register<T: WorkerTask>(&mut self, task: T) -> Result<()> {
        if self.state != CoordinatorState::Created {
            return Err(CoordinatorError::RegisterAfterStart.into());
        }
        self.tasks.push(Box::new(task));
        Ok(())
    }

    /// Runs the init hook, then launches one worker thread per registered
    /// task. Returns immediately after launch.
    ///
    /// Fails without launching anything if the init hook errors (state stays
    /// `Created`), if no tasks are registered, or if the coordinator was
    /// already started.
    pub fn start(&mut self) -> Result<()> {
        if self.state != CoordinatorState::Created {
            return Err(CoordinatorError::AlreadyStarted.into());
        }
        if self.tasks.is_empty() {
            return Err(CoordinatorError::NoRegisteredTasks.into());
        }

        if let Some(init_hook) = self.init_hook.take() {
            init_hook(&*self).context("init hook failed")?;
        }

        let tasks = std::mem::take(&mut self.tasks);
        self.launched_tasks = tasks.len();
        debug!(num_workers = self.launched_tasks, "starting worker pool");

        self.pool = Some(WorkerPool::spawn(tasks, &self.config.worker_name)?);
        self.state = CoordinatorState::Running;
        Ok(())
    }

    /// Signals all workers to stop and waits for them to terminate, bounded
    /// by `stop_timeout`.
    ///
    /// Returns `Ok(true)` once every worker has terminated (and the shutdown
    /// hook, if any, has run). Returns `Ok(false)` on timeout: threads are
    /// left detached, the shutdown hook does not run, and a later call can
    /// finish the job. Calling before `start()`, or again after a successful
    /// stop, is a no-op returning `Ok(true)`.
    pub fn stop(&mut self) -> Result<bool> {
        match self.state {
            CoordinatorState::Created | CoordinatorState::Stopped => return Ok(true),
            CoordinatorState::Running => {}
        }

        let all_exited = match self.pool.as_mut() {
            Some(pool) => pool.join_with_timeout(self.config.stop_timeout),
            None => true,
        };

        if !all_exited {
            warn!(
                timeout = ?self.config.stop_timeout,
                "stop timed out waiting for workers; leaving threads detached"
            );
            return Ok(false);
        }

        self.pool = None;
        self.state = CoordinatorState::Stopped;
        debug!("all workers terminated");

        if let Some(shutdown_hook) = self.shutdown_hook.take() {
            shutdown_hook().context("shutdown hook failed")?;
        }

        Ok(true)
    }

    /// True while workers are running and no stop has been signalled.
    pub fn is_active(&self) -> bool {
        self.state == CoordinatorState::Running
            && self.pool.as_ref().is_some_and(|pool| !pool.is_shutting_down())
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Number of registered tasks (equals the number of worker threads once
    /// started).
    pub fn num_tasks(&self) -> usize {
        match self.state {
            CoordinatorState::Created => self.tasks.len(),
            _ => self.launched_tasks,
        }
    }
}

impl Default for WorkerCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
