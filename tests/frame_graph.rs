mod common;
use crate::common::{blended_animator, clip_animator, init_tracing, scheduler};

use animdag::dag::{FrameGraph, JobId};
use animdag::resources::NodeId;
use animdag::types::DirtyFlag;

#[test]
fn empty_frame_builds_empty_graph() {
    init_tracing();
    let mut s = scheduler();

    let graph = FrameGraph::from_frame(&s.jobs_to_execute(0.0)).unwrap();

    assert_eq!(graph.job_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.roots().is_empty());
}

#[test]
fn graph_mirrors_frame_dependencies() {
    init_tracing();
    let mut s = scheduler();
    let a = clip_animator(&mut s, 1);
    let b = blended_animator(&mut s, 2);
    s.set_clip_animator_running(a, true);
    s.set_blended_clip_animator_running(b, true);
    for flag in DirtyFlag::ALL {
        s.mark_dirty(flag, NodeId(3));
    }

    let frame = s.jobs_to_execute(0.0);
    FrameGraph::validate(&frame).unwrap();
    let graph = FrameGraph::from_frame(&frame).unwrap();

    assert_eq!(graph.job_count(), 5);
    // find <- load, eval clip <- {load, find}, eval blended <- {load, build}
    assert_eq!(graph.edge_count(), 5);
    assert_eq!(graph.jobs(), frame.ids().collect::<Vec<_>>().as_slice());
    assert_eq!(
        graph.roots(),
        vec![JobId::LoadClips, JobId::BuildBlendTrees]
    );

    let mut dependents = graph.dependents_of(JobId::LoadClips);
    dependents.sort();
    assert_eq!(
        dependents,
        vec![
            JobId::FindRunningClipAnimators,
            JobId::EvaluateClipAnimator(0),
            JobId::EvaluateBlendedClipAnimator(0),
        ]
    );

    let mut deps = graph.dependencies_of(JobId::EvaluateBlendedClipAnimator(0));
    deps.sort();
    assert_eq!(deps, vec![JobId::LoadClips, JobId::BuildBlendTrees]);
}

#[test]
fn steady_state_frame_has_no_edges() {
    init_tracing();
    let mut s = scheduler();
    for node in 0..3 {
        let h = clip_animator(&mut s, node);
        s.set_clip_animator_running(h, true);
    }

    let graph = FrameGraph::from_frame(&s.jobs_to_execute(0.0)).unwrap();

    assert_eq!(graph.job_count(), 3);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.roots().len(), 3);
}
