// src/exec/handler.rs

//! Job bodies.

use tracing::debug;

use crate::dag::{EvaluateBlendedClipAnimatorJob, EvaluateClipAnimatorJob};
use crate::resources::{BlendedClipAnimatorHandle, ClipAnimatorHandle, ClipHandle};

/// What each job kind does when it runs.
///
/// Implementations must tolerate stale or null handles: the scheduler passes
/// through whatever the lookup produced.
pub trait JobHandler {
    fn load_clips(&mut self, clips: &[ClipHandle]);

    fn find_running_clip_animators(&mut self, animators: &[ClipAnimatorHandle]);

    fn build_blend_trees(&mut self, animators: &[BlendedClipAnimatorHandle]);

    fn evaluate_clip_animator(&mut self, job: &EvaluateClipAnimatorJob);

    fn evaluate_blended_clip_animator(&mut self, job: &EvaluateBlendedClipAnimatorJob);
}

/// Handler that does no work and logs every job it is given.
#[derive(Debug, Default)]
pub struct LoggingJobHandler {
    jobs_run: u64,
}

impl LoggingJobHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of jobs run through this handler.
    pub fn jobs_run(&self) -> u64 {
        self.jobs_run
    }
}

impl JobHandler for LoggingJobHandler {
    fn load_clips(&mut self, clips: &[ClipHandle]) {
        self.jobs_run += 1;
        debug!(?clips, "load clips");
    }

    fn find_running_clip_animators(&mut self, animators: &[ClipAnimatorHandle]) {
        self.jobs_run += 1;
        debug!(?animators, "find running clip animators");
    }

    fn build_blend_trees(&mut self, animators: &[BlendedClipAnimatorHandle]) {
        self.jobs_run += 1;
        debug!(?animators, "build blend trees");
    }

    fn evaluate_clip_animator(&mut self, job: &EvaluateClipAnimatorJob) {
        self.jobs_run += 1;
        debug!(
            animator = ?job.animator(),
            elapsed = job.elapsed(),
            "evaluate clip animator"
        );
    }

    fn evaluate_blended_clip_animator(&mut self, job: &EvaluateBlendedClipAnimatorJob) {
        self.jobs_run += 1;
        debug!(
            animator = ?job.animator(),
            elapsed = job.elapsed(),
            "evaluate blended clip animator"
        );
    }
}
