//! Concurrency layer for lexindex
//!
//! This crate provides the fixed-size worker pool used to parallelize
//! index construction and query evaluation:
//! - WorkQueue: FIFO task list drained by a fixed set of OS threads
//! - PendingCounter: wait-group barrier tracking outstanding tasks

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pending;
pub mod work_queue;

pub use pending::PendingCounter;
pub use work_queue::{WorkQueue, WorkQueueError};
