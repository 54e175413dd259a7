// src/exec/mod.rs

//! Command rendering and job submission.
//!
//! - [`command`] renders a job's command line for direct or distributed mode.
//! - [`backend`] provides the `Submitter` trait, the production
//!   `ProcessSubmitter` and the sequential `submit_plan` loop.
//! - [`task_runner`] spawns one command as a child process.

pub mod backend;
pub mod command;
pub mod task_runner;

pub use backend::{ProcessSubmitter, Submitter, submit_plan};
pub use command::CommandBuilder;
