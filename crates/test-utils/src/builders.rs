#![allow(dead_code)]

use animdag::config::{
    AnimatorEntry, DirtyEntry, FrameScript, RawScriptFile, RuntimeSection, SchedulerConfig,
    ScriptFile,
};
use animdag::resources::NodeId;
use animdag::types::{AnimatorKind, DirtyDedup, DirtyFlag};

/// Builder for `ScriptFile` to simplify test setup.
pub struct ScriptBuilder {
    script: RawScriptFile,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            script: RawScriptFile {
                scheduler: SchedulerConfig::default(),
                runtime: RuntimeSection::default(),
                frames: Vec::new(),
            },
        }
    }

    pub fn dirty_dedup(mut self, dedup: DirtyDedup) -> Self {
        self.script.scheduler.dirty_dedup = dedup;
        self
    }

    pub fn blend_build_waits_for_clip_load(mut self, val: bool) -> Self {
        self.script.scheduler.blend_build_waits_for_clip_load = val;
        self
    }

    pub fn validate_frames(mut self, val: bool) -> Self {
        self.script.runtime.validate_frames = val;
        self
    }

    pub fn with_frame(mut self, frame: FrameScript) -> Self {
        self.script.frames.push(frame);
        self
    }

    /// The unvalidated script, for tests that exercise validation itself.
    pub fn build_raw(self) -> RawScriptFile {
        self.script
    }

    pub fn build(self) -> ScriptFile {
        ScriptFile::try_from(self.script).expect("Failed to build valid script from builder")
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a single `[[frame]]` entry.
pub struct FrameBuilder {
    frame: FrameScript,
}

impl FrameBuilder {
    pub fn at(time: f64) -> Self {
        Self {
            frame: FrameScript {
                time,
                dirty: vec![],
                start: vec![],
                stop: vec![],
            },
        }
    }

    pub fn dirty(mut self, flag: DirtyFlag, node: u64) -> Self {
        self.frame.dirty.push(DirtyEntry {
            flag,
            node: NodeId(node),
        });
        self
    }

    pub fn start(mut self, animator: AnimatorKind, node: u64) -> Self {
        self.frame.start.push(AnimatorEntry {
            animator,
            node: NodeId(node),
        });
        self
    }

    pub fn stop(mut self, animator: AnimatorKind, node: u64) -> Self {
        self.frame.stop.push(AnimatorEntry {
            animator,
            node: NodeId(node),
        });
        self
    }

    pub fn build(self) -> FrameScript {
        self.frame
    }
}
