//! Stage progress engine
//!
//! Drives a `PipelineRun` through its stages on a fixed tick cadence and
//! reports snapshots to an observer channel. The workload is simulated:
//! each stage takes a fixed number of ticks regardless of machine speed,
//! so a run has a deterministic duration and no failure path.

use std::sync::{Arc, Mutex};

use anyhow::{Result, ensure};
use log::{debug, info};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::run::{PipelineRun, ProgressSnapshot, RunStatus};
use super::stage::Stage;
use crate::config::EngineConfig;

/// Observer events emitted by the engine
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Snapshot after a tick mutated the run
    Progress(ProgressSnapshot),

    /// A stage just reached 100
    StageCompleted { index: usize, name: String },

    /// The whole run finished, emitted exactly once
    Completed,
}

/// Drives one conversion run at a time
///
/// The run lives behind a mutex shared with the drive task; the
/// cancellation token is re-checked under that mutex before every mutation
/// and every event send, so `reset()` leaves no window in which a stale
/// tick could mutate the run or emit an event after it returns.
pub struct ConversionEngine {
    run: Arc<Mutex<PipelineRun>>,
    config: EngineConfig,
    events: mpsc::UnboundedSender<EngineEvent>,
    cancel: Option<CancellationToken>,
}

impl ConversionEngine {
    /// Create an engine and the receiving end of its event channel
    pub fn new(config: EngineConfig) -> (Self, mpsc::UnboundedReceiver<EngineEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let engine = Self {
            run: Arc::new(Mutex::new(PipelineRun::new(Vec::new()))),
            config,
            events,
            cancel: None,
        };
        (engine, rx)
    }

    /// Get the current run status
    pub fn status(&self) -> RunStatus {
        self.run.lock().unwrap().status()
    }

    /// Capture the current run state
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.run.lock().unwrap().snapshot()
    }

    /// Start advancing the given stages
    ///
    /// Fails fast on misuse: an empty stage list, stages that already
    /// carry progress, or a run still in flight are precondition
    /// violations, not recoverable outcomes.
    pub fn start(&mut self, stages: Vec<Stage>) -> Result<()> {
        ensure!(!stages.is_empty(), "cannot start a run without stages");
        ensure!(
            stages.iter().all(Stage::is_pristine),
            "every stage must start at zero progress"
        );
        ensure!(
            self.config.ticks_per_stage > 0,
            "ticks_per_stage must be at least 1"
        );

        {
            let mut run = self.run.lock().unwrap();
            ensure!(
                run.status() == RunStatus::Idle,
                "a conversion run is already in flight, reset it first"
            );
            info!("starting conversion run with {} stages", stages.len());
            *run = PipelineRun::new(stages);
            run.begin();
        }

        let cancel = CancellationToken::new();
        self.cancel = Some(cancel.clone());

        let run = Arc::clone(&self.run);
        let events = self.events.clone();
        let config = self.config;
        tokio::spawn(async move {
            Self::drive(run, config, events, cancel).await;
        });

        Ok(())
    }

    /// Cancel any in-flight run and restore the idle snapshot
    ///
    /// Safe to call whether or not a run is in flight. Cancellation and
    /// the state rollback happen under the run lock, so once this returns
    /// the drive task can neither mutate the run nor emit another event.
    pub fn reset(&mut self) {
        let mut run = self.run.lock().unwrap();
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
        run.reset();
        debug!("conversion run reset to idle");
    }

    /// Tick loop shared by every run
    async fn drive(
        run: Arc<Mutex<PipelineRun>>,
        config: EngineConfig,
        events: mpsc::UnboundedSender<EngineEvent>,
        cancel: CancellationToken,
    ) {
        let step = 100.0 / config.ticks_per_stage as f64;
        let total = run.lock().unwrap().stage_count();

        for index in 0..total {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(config.tick_interval) => {}
                }

                // Mutation, snapshot and emission happen under one lock
                // acquisition so observers see them in mutation order and
                // reset() can fence them out atomically.
                let completed = {
                    let mut run = run.lock().unwrap();
                    if cancel.is_cancelled() {
                        return;
                    }
                    let completed = run.tick(step);
                    let snapshot = run.snapshot();
                    if events.send(EngineEvent::Progress(snapshot)).is_err() {
                        // Observer gone, nobody is watching this run anymore
                        return;
                    }
                    if let Some(idx) = completed {
                        let name = run.stages()[idx].name.clone();
                        debug!("stage '{}' completed ({}/{})", name, idx + 1, total);
                        let _ = events.send(EngineEvent::StageCompleted { index: idx, name });
                    }
                    completed
                };

                if completed.is_some() {
                    break;
                }
            }

            // UX pacing: let the completed checkmark register before the
            // next stage starts moving. Kept out of the tick loop so it is
            // cancellable on its own.
            if index + 1 < total {
                tokio::select! {
                    _ = cancel.cancelled() => return,
                    _ = tokio::time::sleep(config.stage_pause) => {}
                }
            }
        }

        let run = run.lock().unwrap();
        if cancel.is_cancelled() || !run.is_complete() {
            return;
        }
        info!("conversion run complete");
        let _ = events.send(EngineEvent::Completed);
    }
}

impl Drop for ConversionEngine {
    fn drop(&mut self) {
        // Tearing down the engine mid-run must not leave a ticking task
        // behind to mutate a discarded run.
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }
}
