// src/engine/mod.rs

//! Frame-driving engine for animdag.
//!
//! This module ties together:
//! - the animation scheduler
//! - the main frame loop that reacts to:
//!   - dirty notifications
//!   - play / stop requests
//!   - frame requests
//!   - shutdown signals
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use crate::resources::NodeId;
use crate::types::DirtyFlag;

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Validate each frame's dependency graph before executing it.
    pub validate_frames: bool,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            validate_frames: true,
        }
    }
}

/// Events flowing into the runtime from change notification, playback
/// control and the frame clock.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// A resource changed.
    MarkDirty { flag: DirtyFlag, node: NodeId },
    /// Play (`running = true`) or stop a clip animator.
    SetClipAnimatorRunning { node: NodeId, running: bool },
    /// Play or stop a blended clip animator.
    SetBlendedClipAnimatorRunning { node: NodeId, running: bool },
    /// Build and execute a frame at this simulation time.
    FrameRequested { time: f64 },
    /// Graceful shutdown requested (e.g. Ctrl-C or end of script).
    ShutdownRequested,
}

pub mod core;
pub mod runtime;

pub use core::{CoreCommand, CoreRuntime, CoreStep};
pub use runtime::Runtime;
