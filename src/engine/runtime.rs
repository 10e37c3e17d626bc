// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use crate::dag::FrameGraph;
use crate::errors::Result;
use crate::exec::ExecutorBackend;
use crate::resources::ResourceLookup;

use super::core::{CoreCommand, CoreRuntime};
use super::FrameEvent;

/// Drives the animation scheduler in response to `FrameEvent`s,
/// and delegates job execution to an `ExecutorBackend`.
///
/// This is a pure IO shell around `CoreRuntime`, which contains all the
/// runtime semantics. This struct handles async IO: reading events from
/// channels and awaiting the executor once per frame.
pub struct Runtime<L, E: ExecutorBackend> {
    core: CoreRuntime<L>,
    event_rx: mpsc::Receiver<FrameEvent>,
    executor: E,
}

impl<L, E: ExecutorBackend> fmt::Debug for Runtime<L, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime").finish_non_exhaustive()
    }
}

impl<L: ResourceLookup, E: ExecutorBackend> Runtime<L, E> {
    pub fn new(core: CoreRuntime<L>, event_rx: mpsc::Receiver<FrameEvent>, executor: E) -> Self {
        Self {
            core,
            event_rx,
            executor,
        }
    }

    /// Main event loop.
    ///
    /// - Consumes `FrameEvent`s from `event_rx`.
    /// - Feeds them into the core runtime.
    /// - Builds and executes frames when the core asks for it.
    ///
    /// Returns the core so callers can inspect the final scheduler state.
    pub async fn run(mut self) -> Result<CoreRuntime<L>> {
        info!("animdag runtime started");

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("frame event channel closed; exiting");
                    break;
                }
            };

            trace!(?event, "runtime received event");

            let step = self.core.step(event);

            if let Some(command) = step.command {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        info!(
            frames = self.core.scheduler().frames_built(),
            "runtime exiting"
        );
        Ok(self.core)
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::ExecuteFrame { time } => self.execute_frame(time).await,
        }
    }

    async fn execute_frame(&mut self, time: f64) -> Result<()> {
        let validate = self.core.options().validate_frames;
        let frame = self.core.build_frame(time);

        if frame.is_empty() {
            trace!(frame = frame.frame(), time, "empty frame; nothing to execute");
            return Ok(());
        }

        if validate {
            FrameGraph::validate(&frame)?;
        }

        debug!(
            frame = frame.frame(),
            time,
            jobs = frame.len(),
            "executing frame"
        );

        self.executor.execute_frame(frame).await
    }
}
