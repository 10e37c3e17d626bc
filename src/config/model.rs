// src/config/model.rs

use serde::Deserialize;

use crate::resources::NodeId;
use crate::types::{AnimatorKind, DirtyDedup, DirtyFlag};

/// Replay script as read from a TOML file, before validation.
///
/// ```toml
/// [scheduler]
/// dirty_dedup = "keep"
/// blend_build_waits_for_clip_load = false
///
/// [runtime]
/// validate_frames = true
///
/// [[frame]]
/// time = 0.0
/// dirty = [{ flag = "clip", node = 1 }]
/// start = [{ animator = "clip", node = 10 }]
///
/// [[frame]]
/// time = 16.0
/// stop = [{ animator = "clip", node = 10 }]
/// ```
///
/// Only `[[frame]]` entries are required.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScriptFile {
    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub runtime: RuntimeSection,

    /// Frames in playback order, from `[[frame]]`.
    #[serde(default, rename = "frame")]
    pub frames: Vec<FrameScript>,
}

/// Validated replay script. Build one via `ScriptFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ScriptFile {
    pub scheduler: SchedulerConfig,
    pub runtime: RuntimeSection,
    pub frames: Vec<FrameScript>,
}

impl ScriptFile {
    pub(crate) fn new_unchecked(
        scheduler: SchedulerConfig,
        runtime: RuntimeSection,
        frames: Vec<FrameScript>,
    ) -> Self {
        Self {
            scheduler,
            runtime,
            frames,
        }
    }
}

/// `[scheduler]` section; also the options `AnimationScheduler` is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// `"keep"` (default) or `"on_insert"`.
    pub dirty_dedup: DirtyDedup,

    /// Make blend-tree building wait for clip loading when both are dirty in
    /// the same frame. Off by default.
    pub blend_build_waits_for_clip_load: bool,
}

/// `[runtime]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeSection {
    /// Check every frame's dependency graph before handing it to the executor.
    pub validate_frames: bool,
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            validate_frames: true,
        }
    }
}

/// One `[[frame]]` entry: what happens before the frame is built at `time`.
///
/// Within a frame, dirty marks are applied first, then starts, then stops.
/// Starts are stamped with the time of the *previous* frame, since that is
/// the scheduler's simulation time when they are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameScript {
    pub time: f64,

    #[serde(default)]
    pub dirty: Vec<DirtyEntry>,

    #[serde(default)]
    pub start: Vec<AnimatorEntry>,

    #[serde(default)]
    pub stop: Vec<AnimatorEntry>,
}

/// `{ flag = "clip", node = 1 }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DirtyEntry {
    pub flag: DirtyFlag,
    pub node: NodeId,
}

/// `{ animator = "blended", node = 7 }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct AnimatorEntry {
    pub animator: AnimatorKind,
    pub node: NodeId,
}
