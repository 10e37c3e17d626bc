// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod resources;
pub mod types;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ScriptFile;
use crate::dag::{AnimationScheduler, FrameGraph};
use crate::engine::{CoreCommand, CoreRuntime, FrameEvent, Runtime, RuntimeOptions};
use crate::exec::{InlineExecutor, LoggingJobHandler};
use crate::resources::ResourceManagers;
use crate::types::AnimatorKind;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - script loading
/// - scheduler / core / runtime
/// - executor
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let script = load_and_validate(&args.script)?;

    if args.dry_run {
        print_dry_run(&script)?;
        return Ok(());
    }

    let scheduler = AnimationScheduler::with_config(ResourceManagers::new(), script.scheduler);
    let options = RuntimeOptions {
        validate_frames: script.runtime.validate_frames && !args.no_validate,
    };

    // Frame event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<FrameEvent>(64);

    // The channel is bounded; feed it from a task.
    let events = script_events(&script);
    info!(
        frames = script.frames.len(),
        events = events.len(),
        "replaying script"
    );
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });
    }

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(FrameEvent::ShutdownRequested).await;
        });
    }
    drop(rt_tx);

    let executor = InlineExecutor::new(LoggingJobHandler::new());
    let core = CoreRuntime::new(scheduler, options);
    let runtime = Runtime::new(core, rt_rx, executor);
    let core = runtime.run().await?;

    let scheduler = core.scheduler();
    info!(
        frames = scheduler.frames_built(),
        clip_evaluators = scheduler.clip_evaluator_pool_size(),
        blended_evaluators = scheduler.blended_evaluator_pool_size(),
        "replay finished"
    );

    Ok(())
}

/// Flatten a script into the event sequence the runtime consumes.
///
/// Per frame: dirty marks, then starts, then stops, then the frame request.
/// The sequence ends with a shutdown request.
pub fn script_events(script: &ScriptFile) -> Vec<FrameEvent> {
    let mut events = Vec::new();

    for frame in &script.frames {
        for entry in &frame.dirty {
            events.push(FrameEvent::MarkDirty {
                flag: entry.flag,
                node: entry.node,
            });
        }
        for entry in &frame.start {
            events.push(lifecycle_event(entry.animator, entry.node, true));
        }
        for entry in &frame.stop {
            events.push(lifecycle_event(entry.animator, entry.node, false));
        }
        events.push(FrameEvent::FrameRequested { time: frame.time });
    }

    events.push(FrameEvent::ShutdownRequested);
    events
}

fn lifecycle_event(kind: AnimatorKind, node: resources::NodeId, running: bool) -> FrameEvent {
    match kind {
        AnimatorKind::Clip => FrameEvent::SetClipAnimatorRunning { node, running },
        AnimatorKind::Blended => FrameEvent::SetBlendedClipAnimatorRunning { node, running },
    }
}

/// Dry-run output: build every frame and print its jobs and edges.
fn print_dry_run(script: &ScriptFile) -> Result<()> {
    println!("animdag dry-run");
    println!("  scheduler.dirty_dedup = {:?}", script.scheduler.dirty_dedup);
    println!(
        "  scheduler.blend_build_waits_for_clip_load = {}",
        script.scheduler.blend_build_waits_for_clip_load
    );
    println!();

    let scheduler = AnimationScheduler::with_config(ResourceManagers::new(), script.scheduler);
    let mut core = CoreRuntime::new(scheduler, RuntimeOptions::default());

    for event in script_events(script) {
        let step = core.step(event);
        let Some(CoreCommand::ExecuteFrame { time }) = step.command else {
            continue;
        };

        let frame = core.build_frame(time);
        let graph = FrameGraph::from_frame(&frame)?;

        println!(
            "frame {} @ {} ({} jobs, {} edges):",
            frame.frame(),
            time,
            graph.job_count(),
            graph.edge_count()
        );
        for job in frame.iter() {
            if job.deps.is_empty() {
                println!("  - {}", job.id);
            } else {
                let deps: Vec<String> = job.deps.iter().map(|d| d.to_string()).collect();
                println!("  - {} after [{}]", job.id, deps.join(", "));
            }
        }
    }

    let scheduler = core.scheduler();
    println!();
    println!(
        "pools: {} clip evaluators, {} blended evaluators",
        scheduler.clip_evaluator_pool_size(),
        scheduler.blended_evaluator_pool_size()
    );

    debug!("dry-run complete (no execution)");
    Ok(())
}
