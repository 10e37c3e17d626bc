// tests/runtime_fake_executor.rs

mod common;
use crate::common::builders::{FrameBuilder, ScriptBuilder};
use crate::common::init_tracing;
use crate::common::recording::{HandlerCall, RecordedFrame, RecordingExecutor, RecordingHandler};
use crate::common::with_timeout;

use std::error::Error;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use animdag::config::ScriptFile;
use animdag::dag::{AnimationScheduler, JobId};
use animdag::engine::{CoreRuntime, FrameEvent, Runtime, RuntimeOptions};
use animdag::exec::{ExecutorBackend, InlineExecutor};
use animdag::resources::{NodeId, ResourceManagers};
use animdag::script_events;
use animdag::types::{AnimatorKind, DirtyFlag};

type TestResult = Result<(), Box<dyn Error>>;

/// Four frames: load + start, discover + blended start, stop everything,
/// then a frame with only channel mapper changes.
fn replay_script() -> ScriptFile {
    ScriptBuilder::new()
        .with_frame(
            FrameBuilder::at(0.0)
                .dirty(DirtyFlag::ClipDirty, 1)
                .start(AnimatorKind::Clip, 10)
                .build(),
        )
        .with_frame(
            FrameBuilder::at(16.0)
                .dirty(DirtyFlag::AnimatorDirty, 10)
                .start(AnimatorKind::Blended, 20)
                .build(),
        )
        .with_frame(
            FrameBuilder::at(32.0)
                .stop(AnimatorKind::Clip, 10)
                .stop(AnimatorKind::Blended, 20)
                .build(),
        )
        .with_frame(
            FrameBuilder::at(48.0)
                .dirty(DirtyFlag::MappingsDirty, 5)
                .build(),
        )
        .build()
}

fn core_for(script: &ScriptFile) -> CoreRuntime<ResourceManagers> {
    let scheduler = AnimationScheduler::with_config(ResourceManagers::new(), script.scheduler);
    CoreRuntime::new(
        scheduler,
        RuntimeOptions {
            validate_frames: script.runtime.validate_frames,
        },
    )
}

async fn replay<E: ExecutorBackend>(
    script: &ScriptFile,
    executor: E,
) -> Result<CoreRuntime<ResourceManagers>, Box<dyn Error>> {
    let events = script_events(script);
    let (tx, rx) = mpsc::channel::<FrameEvent>(events.len());
    for event in events {
        tx.send(event).await?;
    }
    drop(tx);

    let runtime = Runtime::new(core_for(script), rx, executor);
    Ok(with_timeout(runtime.run()).await?)
}

#[test]
fn script_events_are_ordered_per_frame() {
    let script = ScriptBuilder::new()
        .with_frame(
            FrameBuilder::at(1.0)
                .stop(AnimatorKind::Clip, 3)
                .start(AnimatorKind::Blended, 2)
                .dirty(DirtyFlag::ClipDirty, 1)
                .build(),
        )
        .build();

    let events = script_events(&script);

    assert_eq!(events.len(), 5);
    assert!(matches!(events[0], FrameEvent::MarkDirty { flag: DirtyFlag::ClipDirty, node: NodeId(1) }));
    assert!(matches!(
        events[1],
        FrameEvent::SetBlendedClipAnimatorRunning { node: NodeId(2), running: true }
    ));
    assert!(matches!(
        events[2],
        FrameEvent::SetClipAnimatorRunning { node: NodeId(3), running: false }
    ));
    assert!(matches!(events[3], FrameEvent::FrameRequested { time } if time == 1.0));
    assert!(matches!(events[4], FrameEvent::ShutdownRequested));
}

#[tokio::test]
async fn runtime_submits_only_non_empty_frames() -> TestResult {
    init_tracing();
    let script = replay_script();
    let recorded: Arc<Mutex<Vec<RecordedFrame>>> = Arc::new(Mutex::new(Vec::new()));

    let core = replay(&script, RecordingExecutor::new(Arc::clone(&recorded))).await?;

    let frames = recorded.lock().unwrap().clone();
    assert_eq!(frames.len(), 2, "frames: {frames:?}");

    assert_eq!(frames[0].frame, 1);
    assert_eq!(frames[0].time, 0.0);
    assert_eq!(
        frames[0].jobs,
        vec![
            (JobId::LoadClips, vec![]),
            (JobId::EvaluateClipAnimator(0), vec![JobId::LoadClips]),
        ]
    );

    assert_eq!(frames[1].frame, 2);
    assert_eq!(frames[1].time, 16.0);
    assert_eq!(
        frames[1].jobs,
        vec![
            (JobId::FindRunningClipAnimators, vec![]),
            (
                JobId::EvaluateClipAnimator(0),
                vec![JobId::FindRunningClipAnimators]
            ),
            (JobId::EvaluateBlendedClipAnimator(0), vec![]),
        ]
    );

    let scheduler = core.scheduler();
    assert_eq!(scheduler.frames_built(), 4);
    assert_eq!(scheduler.simulation_time(), 48.0);
    assert_eq!(scheduler.clip_evaluator_pool_size(), 1);
    assert_eq!(scheduler.blended_evaluator_pool_size(), 1);
    assert!(scheduler.dirty_queues().is_empty());
    assert_eq!(scheduler.running_clip_animators().count(), 0);

    Ok(())
}

#[tokio::test]
async fn inline_executor_runs_jobs_in_dependency_order() -> TestResult {
    init_tracing();
    let script = replay_script();
    let handler = RecordingHandler::new();
    let calls = handler.calls();

    let core = replay(&script, InlineExecutor::new(handler)).await?;

    let resources = core.scheduler().resources();
    let clip = resources.clips.get(NodeId(1)).ok_or("clip 1 never resolved")?;
    let animator = resources
        .clip_animators
        .get(NodeId(10))
        .ok_or("animator 10 never resolved")?;
    let blended = resources
        .blended_clip_animators
        .get(NodeId(20))
        .ok_or("blended animator 20 never resolved")?;

    let calls = calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            HandlerCall::LoadClips(vec![clip]),
            HandlerCall::EvaluateClipAnimator {
                animator,
                start_time: 0.0,
                current_time: 0.0,
            },
            HandlerCall::FindRunningClipAnimators(vec![animator]),
            HandlerCall::EvaluateClipAnimator {
                animator,
                start_time: 0.0,
                current_time: 16.0,
            },
            HandlerCall::EvaluateBlendedClipAnimator {
                animator: blended,
                start_time: 0.0,
                current_time: 16.0,
            },
        ]
    );

    Ok(())
}

#[tokio::test]
async fn shutdown_request_stops_before_later_frames() -> TestResult {
    init_tracing();
    let script = replay_script();
    let recorded: Arc<Mutex<Vec<RecordedFrame>>> = Arc::new(Mutex::new(Vec::new()));

    let (tx, rx) = mpsc::channel::<FrameEvent>(8);
    tx.send(FrameEvent::MarkDirty {
        flag: DirtyFlag::ClipDirty,
        node: NodeId(1),
    })
    .await?;
    tx.send(FrameEvent::FrameRequested { time: 0.0 }).await?;
    tx.send(FrameEvent::ShutdownRequested).await?;
    tx.send(FrameEvent::FrameRequested { time: 16.0 }).await?;

    let runtime = Runtime::new(
        core_for(&script),
        rx,
        RecordingExecutor::new(Arc::clone(&recorded)),
    );
    let core = with_timeout(runtime.run()).await?;

    assert_eq!(core.scheduler().frames_built(), 1);
    assert_eq!(recorded.lock().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn closed_channel_ends_the_runtime() -> TestResult {
    init_tracing();
    let script = replay_script();
    let recorded: Arc<Mutex<Vec<RecordedFrame>>> = Arc::new(Mutex::new(Vec::new()));

    let (tx, rx) = mpsc::channel::<FrameEvent>(8);
    tx.send(FrameEvent::FrameRequested { time: 0.0 }).await?;
    drop(tx);

    let runtime = Runtime::new(
        core_for(&script),
        rx,
        RecordingExecutor::new(Arc::clone(&recorded)),
    );
    let core = with_timeout(runtime.run()).await?;

    assert_eq!(core.scheduler().frames_built(), 1);
    assert!(recorded.lock().unwrap().is_empty());

    Ok(())
}

#[test]
fn core_turns_frame_requests_into_commands() {
    use animdag::engine::CoreCommand;

    let script = replay_script();
    let mut core = core_for(&script);

    let step = core.step(FrameEvent::SetClipAnimatorRunning {
        node: NodeId(4),
        running: true,
    });
    assert!(step.keep_running);
    assert!(step.command.is_none());

    let step = core.step(FrameEvent::FrameRequested { time: 8.0 });
    assert_eq!(step.command, Some(CoreCommand::ExecuteFrame { time: 8.0 }));

    let frame = core.build_frame(8.0);
    assert_eq!(frame.ids().collect::<Vec<_>>(), vec![JobId::EvaluateClipAnimator(0)]);

    let step = core.step(FrameEvent::ShutdownRequested);
    assert!(!step.keep_running);
}
