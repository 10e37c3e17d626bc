use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use animdag::dag::{AnimationScheduler, JobId, JobRef};
use animdag::resources::{NodeId, ResourceLookup, ResourceManagers};
use animdag::types::DirtyFlag;

#[derive(Debug, Clone)]
enum Op {
    Mark(DirtyFlag, u64),
    SetClip(u64, bool),
    SetBlended(u64, bool),
    Build,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize, 0..6u64).prop_map(|(flag, node)| Op::Mark(DirtyFlag::ALL[flag], node)),
        (0..6u64, any::<bool>()).prop_map(|(node, running)| Op::SetClip(node, running)),
        (0..6u64, any::<bool>()).prop_map(|(node, running)| Op::SetBlended(node, running)),
        Just(Op::Build),
    ]
}

/// What the scheduler should have done, tracked independently.
#[derive(Default)]
struct Model {
    clip_running: HashMap<u64, f64>,
    blended_running: HashMap<u64, f64>,
    pending: HashSet<DirtyFlag>,
    max_clip: usize,
    max_blended: usize,
    time: f64,
}

proptest! {
    #[test]
    fn frames_match_model(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let mut s = AnimationScheduler::new(ResourceManagers::new());
        let mut model = Model::default();

        for op in ops {
            match op {
                Op::Mark(flag, node) => {
                    s.mark_dirty(flag, NodeId(node));
                    model.pending.insert(flag);
                }
                Op::SetClip(node, running) => {
                    let h = s.resources_mut().lookup_clip_animator(NodeId(node));
                    let changed = s.set_clip_animator_running(h, running);
                    let expected = if running {
                        !model.clip_running.contains_key(&node)
                    } else {
                        model.clip_running.contains_key(&node)
                    };
                    prop_assert_eq!(changed, expected);
                    if running {
                        model.clip_running.entry(node).or_insert(model.time);
                    } else {
                        model.clip_running.remove(&node);
                    }
                }
                Op::SetBlended(node, running) => {
                    let h = s.resources_mut().lookup_blended_clip_animator(NodeId(node));
                    s.set_blended_clip_animator_running(h, running);
                    if running {
                        model.blended_running.entry(node).or_insert(model.time);
                    } else {
                        model.blended_running.remove(&node);
                    }
                }
                Op::Build => {
                    model.time += 16.0;
                    model.max_clip = model.max_clip.max(model.clip_running.len());
                    model.max_blended = model.max_blended.max(model.blended_running.len());

                    let time = model.time;
                    let frame = s.jobs_to_execute(time);

                    // Dependencies are in the frame and listed earlier.
                    let mut seen = HashSet::new();
                    for job in frame.iter() {
                        for dep in job.deps.iter() {
                            prop_assert!(seen.contains(&dep), "{} listed before {}", job.id, dep);
                        }
                        seen.insert(job.id);
                    }
                    prop_assert_eq!(seen.len(), frame.len());

                    // Dirty-triggered jobs appear exactly when their queue was fed.
                    prop_assert_eq!(
                        frame.contains(JobId::LoadClips),
                        model.pending.contains(&DirtyFlag::ClipDirty)
                    );
                    prop_assert_eq!(
                        frame.contains(JobId::FindRunningClipAnimators),
                        model.pending.contains(&DirtyFlag::AnimatorDirty)
                    );
                    prop_assert_eq!(
                        frame.contains(JobId::BuildBlendTrees),
                        model.pending.contains(&DirtyFlag::BlendedAnimatorDirty)
                    );

                    // One evaluation per running animator, with its start time.
                    let mut clip_starts = Vec::new();
                    let mut blended_starts = Vec::new();
                    for job in frame.iter() {
                        match job.job {
                            JobRef::EvaluateClipAnimator(eval) => {
                                prop_assert_eq!(eval.current_time(), time);
                                clip_starts.push(eval.start_time());
                            }
                            JobRef::EvaluateBlendedClipAnimator(eval) => {
                                prop_assert_eq!(eval.current_time(), time);
                                blended_starts.push(eval.start_time());
                            }
                            _ => {}
                        }
                    }
                    let mut expected_clip: Vec<f64> = model.clip_running.values().copied().collect();
                    let mut expected_blended: Vec<f64> =
                        model.blended_running.values().copied().collect();
                    for v in [&mut clip_starts, &mut blended_starts, &mut expected_clip, &mut expected_blended] {
                        v.sort_by(f64::total_cmp);
                    }
                    prop_assert_eq!(clip_starts, expected_clip);
                    prop_assert_eq!(blended_starts, expected_blended);

                    prop_assert!(s.dirty_queues().is_empty());
                    prop_assert_eq!(s.clip_evaluator_pool_size(), model.max_clip);
                    prop_assert_eq!(s.blended_evaluator_pool_size(), model.max_blended);

                    model.pending.clear();
                }
            }
        }
    }
}
