#![allow(dead_code)]

pub use animdag_test_utils::builders;
pub use animdag_test_utils::init_tracing;
pub use animdag_test_utils::recording;

use animdag::dag::AnimationScheduler;
use animdag::resources::{
    BlendedClipAnimatorHandle, ClipAnimatorHandle, NodeId, ResourceLookup, ResourceManagers,
};

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Fresh scheduler over in-memory resource managers.
pub fn scheduler() -> AnimationScheduler<ResourceManagers> {
    AnimationScheduler::new(ResourceManagers::new())
}

pub fn clip_animator(
    scheduler: &mut AnimationScheduler<ResourceManagers>,
    node: u64,
) -> ClipAnimatorHandle {
    scheduler.resources_mut().lookup_clip_animator(NodeId(node))
}

pub fn blended_animator(
    scheduler: &mut AnimationScheduler<ResourceManagers>,
    node: u64,
) -> BlendedClipAnimatorHandle {
    scheduler
        .resources_mut()
        .lookup_blended_clip_animator(NodeId(node))
}
