//! Scheduled background jobs: the job table, the task bodies, the registry
//! that runs them under the logging protocol, and the cron wiring.

pub mod context;
pub mod definitions;
pub mod registry;
pub mod scheduler;
pub mod tasks;

pub use context::{JobContext, JobOutcome};
pub use definitions::{JobDefinition, JOB_TABLE};
pub use registry::JobRegistry;
