// src/exec/mod.rs

//! Job execution layer.
//!
//! The scheduler only decides *what* runs in a frame and in which order;
//! this module is the seam to whatever actually runs it.
//!
//! - [`handler`] provides the `JobHandler` trait, one method per job kind,
//!   behind which the real clip loading / evaluation work lives, plus a
//!   `LoggingJobHandler` that only traces.
//! - [`backend`] provides the `ExecutorBackend` trait that the frame loop
//!   submits each frame to, and an `InlineExecutor` that runs the jobs in
//!   list order. Tests can replace it with a recording implementation.

pub mod backend;
pub mod handler;

pub use backend::{ExecutorBackend, InlineExecutor};
pub use handler::{JobHandler, LoggingJobHandler};
