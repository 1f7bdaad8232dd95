//! Background job registry - asynchronous units of work with progress polling.

mod job_model;
mod job_registry;

pub use job_model::*;
pub use job_registry::*;
