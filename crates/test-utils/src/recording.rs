use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use animdag::dag::{
    EvaluateBlendedClipAnimatorJob, EvaluateClipAnimatorJob, FrameJobs, JobId,
};
use animdag::errors::Result;
use animdag::exec::{ExecutorBackend, JobHandler};
use animdag::resources::{BlendedClipAnimatorHandle, ClipAnimatorHandle, ClipHandle};

/// What a `RecordingExecutor` saw for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub frame: u64,
    pub time: f64,
    /// `(job, dependencies)` in submission order.
    pub jobs: Vec<(JobId, Vec<JobId>)>,
}

impl RecordedFrame {
    pub fn ids(&self) -> Vec<JobId> {
        self.jobs.iter().map(|(id, _)| *id).collect()
    }
}

/// A fake executor that:
/// - records every submitted frame
/// - runs nothing
/// - yields once per frame
pub struct RecordingExecutor {
    frames: Arc<Mutex<Vec<RecordedFrame>>>,
}

impl RecordingExecutor {
    pub fn new(frames: Arc<Mutex<Vec<RecordedFrame>>>) -> Self {
        Self { frames }
    }
}

impl ExecutorBackend for RecordingExecutor {
    fn execute_frame<'a>(
        &'a mut self,
        frame: FrameJobs<'a>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        let frames = Arc::clone(&self.frames);

        Box::pin(async move {
            tokio::task::yield_now().await;

            let recorded = RecordedFrame {
                frame: frame.frame(),
                time: frame.time(),
                jobs: frame
                    .scheduled()
                    .iter()
                    .map(|s| (s.id, s.deps.iter().collect()))
                    .collect(),
            };
            frames.lock().unwrap().push(recorded);
            Ok(())
        })
    }
}

/// One call received by a `RecordingHandler`.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerCall {
    LoadClips(Vec<ClipHandle>),
    FindRunningClipAnimators(Vec<ClipAnimatorHandle>),
    BuildBlendTrees(Vec<BlendedClipAnimatorHandle>),
    EvaluateClipAnimator {
        animator: ClipAnimatorHandle,
        start_time: f64,
        current_time: f64,
    },
    EvaluateBlendedClipAnimator {
        animator: BlendedClipAnimatorHandle,
        start_time: f64,
        current_time: f64,
    },
}

/// Job handler that records every call into a shared list.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    calls: Arc<Mutex<Vec<HandlerCall>>>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of the calls, still readable after the handler has been
    /// moved into an executor.
    pub fn calls(&self) -> Arc<Mutex<Vec<HandlerCall>>> {
        Arc::clone(&self.calls)
    }
}

impl JobHandler for RecordingHandler {
    fn load_clips(&mut self, clips: &[ClipHandle]) {
        self.calls
            .lock()
            .unwrap()
            .push(HandlerCall::LoadClips(clips.to_vec()));
    }

    fn find_running_clip_animators(&mut self, animators: &[ClipAnimatorHandle]) {
        self.calls
            .lock()
            .unwrap()
            .push(HandlerCall::FindRunningClipAnimators(animators.to_vec()));
    }

    fn build_blend_trees(&mut self, animators: &[BlendedClipAnimatorHandle]) {
        self.calls
            .lock()
            .unwrap()
            .push(HandlerCall::BuildBlendTrees(animators.to_vec()));
    }

    fn evaluate_clip_animator(&mut self, job: &EvaluateClipAnimatorJob) {
        self.calls
            .lock()
            .unwrap()
            .push(HandlerCall::EvaluateClipAnimator {
                animator: job.animator(),
                start_time: job.start_time(),
                current_time: job.current_time(),
            });
    }

    fn evaluate_blended_clip_animator(&mut self, job: &EvaluateBlendedClipAnimatorJob) {
        self.calls
            .lock()
            .unwrap()
            .push(HandlerCall::EvaluateBlendedClipAnimator {
                animator: job.animator(),
                start_time: job.start_time(),
                current_time: job.current_time(),
            });
    }
}
