//! src/error.rs
//!
//! Typed configuration errors for the coordinator lifecycle.
//!
//! These cover misuse of the `register`/`start`/`stop` state machine. Worker
//! task failures are never surfaced here: they are logged and contained to the
//! failing worker thread.

use thiserror::Error;

/// Lifecycle misuse errors returned by `WorkerCoordinator`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    /// `register` called once the coordinator has left the `Created` state.
    #[error("cannot register a worker task after the coordinator has started")]
    RegisterAfterStart,

    /// `start` called on a coordinator that is running or already stopped.
    #[error("coordinator has already been started")]
    AlreadyStarted,

    /// `start` called with an empty task pool.
    #[error("cannot start a coordinator with no registered worker tasks")]
    NoRegisteredTasks,
}
