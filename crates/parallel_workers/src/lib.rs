pub mod common;
pub mod coordinator;
pub mod error;
pub mod queue;
pub mod workspace;

pub use coordinator::{
    CoordinatorConfig, CoordinatorConfigBuilder, CoordinatorState, WorkerCoordinator, WorkerTask,
};
pub use error::CoordinatorError;
pub use queue::{BlobsQueue, QueueStatus};
pub use workspace::Workspace;
