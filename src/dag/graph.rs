// src/dag/graph.rs

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::frame_jobs::FrameJobs;
use crate::dag::jobs::JobId;
use crate::errors::{AnimdagError, Result};

/// Dependency graph of a single built frame.
///
/// Edge direction: dependency -> dependent. For an evaluation job that waits
/// on clip loading we add `LoadClips -> EvaluateClipAnimator(i)`.
///
/// The scheduler does not need this to do its job; the frame loop uses it to
/// double-check what it is about to submit, and `--dry-run` uses it to print
/// the graph.
#[derive(Debug, Clone)]
pub struct FrameGraph {
    graph: DiGraphMap<JobId, ()>,
    /// Jobs in the order the scheduler listed them.
    order: Vec<JobId>,
}

impl FrameGraph {
    /// Build the graph of `frame`, rejecting dependencies that point outside
    /// the frame or at a job listed later.
    pub fn from_frame(frame: &FrameJobs<'_>) -> Result<Self> {
        let mut graph: DiGraphMap<JobId, ()> = DiGraphMap::new();
        let mut order = Vec::with_capacity(frame.len());

        for scheduled in frame.scheduled() {
            for dep in scheduled.deps.iter() {
                if !frame.contains(dep) {
                    return Err(AnimdagError::DanglingDependency {
                        job: scheduled.id.to_string(),
                        dependency: dep.to_string(),
                    });
                }
                if !graph.contains_node(dep) {
                    return Err(AnimdagError::DependencyCycle(format!(
                        "job '{}' is listed before its dependency '{}'",
                        scheduled.id, dep
                    )));
                }
            }

            graph.add_node(scheduled.id);
            for dep in scheduled.deps.iter() {
                graph.add_edge(dep, scheduled.id, ());
            }
            order.push(scheduled.id);
        }

        // A topological sort will fail if there is a cycle.
        if let Err(cycle) = toposort(&graph, None) {
            return Err(AnimdagError::DependencyCycle(format!(
                "cycle detected in frame job graph involving '{}'",
                cycle.node_id()
            )));
        }

        Ok(Self { graph, order })
    }

    /// Convenience wrapper: validate a frame without keeping the graph.
    pub fn validate(frame: &FrameJobs<'_>) -> Result<()> {
        Self::from_frame(frame).map(|_| ())
    }

    pub fn job_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Jobs in scheduler order.
    pub fn jobs(&self) -> &[JobId] {
        &self.order
    }

    /// Jobs with no dependencies; these can start as soon as the frame does.
    pub fn roots(&self) -> Vec<JobId> {
        self.order
            .iter()
            .copied()
            .filter(|id| {
                self.graph
                    .neighbors_directed(*id, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .collect()
    }

    /// Immediate dependencies of `id`.
    pub fn dependencies_of(&self, id: JobId) -> Vec<JobId> {
        self.graph
            .neighbors_directed(id, Direction::Incoming)
            .collect()
    }

    /// Jobs that wait on `id`.
    pub fn dependents_of(&self, id: JobId) -> Vec<JobId> {
        self.graph
            .neighbors_directed(id, Direction::Outgoing)
            .collect()
    }
}
