// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The frame loop talks to an `ExecutorBackend` instead of running jobs
//! itself. This makes it easy to swap in a recording executor in tests, or a
//! thread-pool executor in an engine, while the scheduler stays unaware of
//! how jobs are run.
//!
//! - `InlineExecutor` is the default implementation used by `animdag`. It
//!   runs every job of a frame on the calling task, in list order, which the
//!   scheduler guarantees is a valid dependency order.

use std::future::Future;
use std::pin::Pin;

use tracing::trace;

use crate::dag::FrameJobs;
use crate::errors::Result;
use crate::exec::handler::JobHandler;

/// Trait abstracting how a frame's jobs are executed.
///
/// The returned future completing is the frame barrier: the frame loop does
/// not build the next frame until it resolves. An implementation may run
/// jobs with no dependency relation concurrently, but must never start a job
/// before all of its dependencies have finished.
pub trait ExecutorBackend: Send {
    fn execute_frame<'a>(
        &'a mut self,
        frame: FrameJobs<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// Executor that runs jobs one after another on the current task.
#[derive(Debug)]
pub struct InlineExecutor<H> {
    handler: H,
    frames_executed: u64,
}

impl<H: JobHandler + Send> InlineExecutor<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            frames_executed: 0,
        }
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn frames_executed(&self) -> u64 {
        self.frames_executed
    }

    pub fn into_handler(self) -> H {
        self.handler
    }
}

impl<H: JobHandler + Send> ExecutorBackend for InlineExecutor<H> {
    fn execute_frame<'a>(
        &'a mut self,
        frame: FrameJobs<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            for job in frame.iter() {
                trace!(job = %job.id, deps = ?job.deps, "running job");
                job.job.run(&mut self.handler);
            }
            self.frames_executed += 1;
            Ok(())
        })
    }
}
