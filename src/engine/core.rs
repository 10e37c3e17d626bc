// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`FrameEvent`]s and produces:
//! - an updated scheduler state
//! - at most one command describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from channels
//! - building frames and handing them to the executor
//! - handling Ctrl+C / shutdown
//!
//! The core can be unit tested without any Tokio, channels or executor.

use tracing::debug;

use crate::dag::{AnimationScheduler, FrameJobs};
use crate::engine::{FrameEvent, RuntimeOptions};
use crate::resources::ResourceLookup;

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreCommand {
    /// Build the frame at `time` and send it to the executor.
    ExecuteFrame { time: f64 },
}

/// Decision returned by the core after handling a single `FrameEvent`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoreStep {
    pub command: Option<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    fn proceed() -> Self {
        Self {
            command: None,
            keep_running: true,
        }
    }
}

/// Pure core runtime state.
///
/// This owns the animation scheduler and the runtime options. It has **no**
/// channels, no Tokio types, and does not run any job.
#[derive(Debug)]
pub struct CoreRuntime<L> {
    scheduler: AnimationScheduler<L>,
    options: RuntimeOptions,
}

impl<L: ResourceLookup> CoreRuntime<L> {
    pub fn new(scheduler: AnimationScheduler<L>, options: RuntimeOptions) -> Self {
        Self { scheduler, options }
    }

    pub fn options(&self) -> RuntimeOptions {
        self.options
    }

    pub fn scheduler(&self) -> &AnimationScheduler<L> {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut AnimationScheduler<L> {
        &mut self.scheduler
    }

    /// Handle a single frame event, updating scheduler state and returning
    /// what the IO shell should do.
    pub fn step(&mut self, event: FrameEvent) -> CoreStep {
        match event {
            FrameEvent::MarkDirty { flag, node } => {
                self.scheduler.mark_dirty(flag, node);
                CoreStep::proceed()
            }
            FrameEvent::SetClipAnimatorRunning { node, running } => {
                let handle = self.scheduler.resources_mut().lookup_clip_animator(node);
                if !self.scheduler.set_clip_animator_running(handle, running) {
                    debug!(%node, running, "clip animator already in requested state");
                }
                CoreStep::proceed()
            }
            FrameEvent::SetBlendedClipAnimatorRunning { node, running } => {
                let handle = self
                    .scheduler
                    .resources_mut()
                    .lookup_blended_clip_animator(node);
                if !self
                    .scheduler
                    .set_blended_clip_animator_running(handle, running)
                {
                    debug!(%node, running, "blended clip animator already in requested state");
                }
                CoreStep::proceed()
            }
            FrameEvent::FrameRequested { time } => CoreStep {
                command: Some(CoreCommand::ExecuteFrame { time }),
                keep_running: true,
            },
            FrameEvent::ShutdownRequested => CoreStep {
                command: None,
                keep_running: false,
            },
        }
    }

    /// Build the frame at `time`.
    pub fn build_frame(&mut self, time: f64) -> FrameJobs<'_> {
        self.scheduler.jobs_to_execute(time)
    }
}
