// src/dag/mod.rs

//! Dependency resolution.
//!
//! - [`filter`] decides which top-level tasks are in the frame range.
//! - [`job`] holds job descriptors and the run-scoped id allocator.
//! - [`resolver`] walks the task tree and computes hold-sets.
//! - [`plan`] is the emission-ordered result of a run.

pub mod filter;
pub mod job;
pub mod plan;
pub mod resolver;

pub use filter::{FrameFilter, parse_frame_bound};
pub use job::{JobDescriptor, JobId, JobIdAllocator};
pub use plan::JobPlan;
pub use resolver::{DependencyResolver, resolve_document, resolve_tasks};
