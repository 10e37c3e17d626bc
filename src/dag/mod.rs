// src/dag/mod.rs

//! Per-frame job graph construction.
//!
//! - [`dirty`] buckets changed resources into one queue per [`DirtyFlag`](crate::types::DirtyFlag).
//! - [`running_set`] tracks which animators are playing and when they started.
//! - [`job_pool`] owns the grow-only pools of evaluation jobs.
//! - [`jobs`] defines the closed set of job kinds and their per-frame edges.
//! - [`scheduler`] is the orchestrator that turns all of the above into an
//!   ordered job list once per frame.
//! - [`frame_jobs`] is the borrowed result of one build.
//! - [`graph`] is a petgraph view of a frame, used for validation and dumps.

pub mod dirty;
pub mod frame_jobs;
pub mod graph;
pub mod job_pool;
pub mod jobs;
pub mod running_set;
pub mod scheduler;

pub use dirty::DirtyQueues;
pub use frame_jobs::{FrameJob, FrameJobs};
pub use graph::FrameGraph;
pub use job_pool::JobPool;
pub use jobs::{
    BuildBlendTreesJob, EvaluateAnimatorJob, EvaluateBlendedClipAnimatorJob,
    EvaluateClipAnimatorJob, FindRunningClipAnimatorsJob, JobDeps, JobId, JobRef, LoadClipsJob,
    ScheduledJob,
};
pub use running_set::RunningSet;
pub use scheduler::AnimationScheduler;
