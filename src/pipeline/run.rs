//! Pipeline run state management

use serde::Serialize;

use super::stage::Stage;

/// Lifecycle of one conversion attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    /// Created, no tick has fired yet
    Idle,

    /// The engine is advancing stages
    Running,

    /// Every stage reached 100, terminal until reset
    Complete,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RunStatus::Idle => "Idle",
            RunStatus::Running => "Running",
            RunStatus::Complete => "Complete",
        };
        write!(f, "{}", label)
    }
}

/// Point-in-time view of a run, emitted to observers on every tick
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub stages: Vec<Stage>,
    pub overall_progress: f64,
}

/// Aggregate state of one conversion attempt
///
/// Stages are totally ordered: the run advances a single cursor, so stage
/// `i + 1` cannot move before stage `i` is completed. The overall
/// percentage is always derived from the stages, never stored, so it
/// cannot drift from them.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    stages: Vec<Stage>,
    status: RunStatus,
}

impl PipelineRun {
    /// Create an idle run over the given stages
    pub fn new(stages: Vec<Stage>) -> Self {
        Self {
            stages,
            status: RunStatus::Idle,
        }
    }

    /// Get the current run status
    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Get the ordered stage list
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of stages in this run
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Index of the stage currently advancing, if any
    pub fn current_stage(&self) -> Option<usize> {
        self.stages.iter().position(|s| !s.completed)
    }

    /// Check if every stage has completed
    pub fn is_complete(&self) -> bool {
        self.status == RunStatus::Complete
    }

    /// Overall completion percentage in `[0, 100]`
    ///
    /// Derived as `100 * (completed + fraction_of_current) / total`, which
    /// lands on the exact boundary value `100 * (i + 1) / total` the moment
    /// stage `i` completes.
    pub fn overall_progress(&self) -> f64 {
        if self.stages.is_empty() {
            return 0.0;
        }
        let completed = self.stages.iter().filter(|s| s.completed).count();
        let fraction = self
            .current_stage()
            .map(|i| self.stages[i].progress / 100.0)
            .unwrap_or(0.0);
        100.0 * (completed as f64 + fraction) / self.stages.len() as f64
    }

    /// Mark the run as started
    pub(crate) fn begin(&mut self) {
        self.status = RunStatus::Running;
    }

    /// Advance the current stage by `step` percent
    ///
    /// Returns `Some(index)` when this tick completed a stage. Completing
    /// the last stage also marks the whole run `Complete`.
    pub(crate) fn tick(&mut self, step: f64) -> Option<usize> {
        let index = self.current_stage()?;
        self.stages[index].advance(step);
        if self.stages[index].completed {
            if self.stages.iter().all(|s| s.completed) {
                self.status = RunStatus::Complete;
            }
            return Some(index);
        }
        None
    }

    /// Return the run to the exact idle snapshot
    pub(crate) fn reset(&mut self) {
        for stage in &mut self.stages {
            stage.reset();
        }
        self.status = RunStatus::Idle;
    }

    /// Capture the current state for observers
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            stages: self.stages.clone(),
            overall_progress: self.overall_progress(),
        }
    }
}
