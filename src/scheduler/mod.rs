//! Chunked parallel interpolation.
//!
//! - [`ChunkPlan`]: split of a grid into contiguous chunks
//! - [`SchedulerConfig`]: chunk count and worker pool
//! - [`interpolate`]: fork-join export of every chunk into one buffer
//!
//! Chunks write to disjoint windows of the result, so they run without
//! locking and the merged buffer does not depend on completion order.

mod driver;
mod plan;

pub use driver::{SchedulerConfig, interpolate};
pub use plan::{Chunk, ChunkPlan};
