pub mod batch_summary;
pub mod job_dispatcher;

pub use batch_summary::BatchSummary;
pub use job_dispatcher::{JobDispatcher, default_workers};

#[cfg(test)]
mod job_dispatcher_test;
