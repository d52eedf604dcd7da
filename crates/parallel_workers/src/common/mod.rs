//! Shared utilities for worker threads.

pub mod thread;
