//! Simulated conversion pipeline for stereocast
//!
//! This module owns the staged progress machinery behind the processing
//! view, separating concerns between:
//! - State: `Stage` and `PipelineRun` value objects, testable without any
//!   rendering surface
//! - Scheduling: the engine's tick loop and inter-stage pause, both
//!   cancellable tasks
//! - Observation: snapshot events delivered over a channel in mutation
//!   order
//!
//! # Architecture
//!
//! The engine spawns one drive task per run. Every mutation of the run is
//! guarded by the run mutex and a cancellation check, so `reset()` can
//! stop a run mid-tick without a stale callback touching discarded state.

pub mod engine;
pub mod run;
pub mod stage;

pub use engine::{ConversionEngine, EngineEvent};
pub use run::{PipelineRun, ProgressSnapshot, RunStatus};
pub use stage::{Stage, default_stages};
