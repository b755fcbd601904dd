//! Conversion stage value object
//!
//! A stage is one named step of the simulated conversion pipeline,
//! tracked by percentage completion.

use serde::{Deserialize, Serialize};

/// One step of the conversion pipeline
///
/// `progress` is a percentage in `[0, 100]` and is monotonically
/// non-decreasing within a run. `completed` is true exactly when
/// `progress` has reached 100 and never reverts within the same run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Display label, immutable once defined
    pub name: String,

    /// Short description shown next to the label
    pub description: String,

    /// Completion percentage in `[0, 100]`
    pub progress: f64,

    /// Whether this stage has finished
    pub completed: bool,
}

impl Stage {
    /// Create a pristine stage at zero progress
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            progress: 0.0,
            completed: false,
        }
    }

    /// Advance progress by `step` percent, clamping at 100
    ///
    /// Marks the stage completed when the clamp is hit. Negative steps
    /// are ignored so progress can never regress.
    pub(crate) fn advance(&mut self, step: f64) {
        if step <= 0.0 || self.completed {
            return;
        }
        self.progress = (self.progress + step).min(100.0);
        // Tolerate float accumulation when the step does not divide 100
        // evenly, so a stage still completes in its fixed tick count.
        if self.progress + 1e-9 >= 100.0 {
            self.progress = 100.0;
            self.completed = true;
        }
    }

    /// Return the stage to its pristine state
    pub(crate) fn reset(&mut self) {
        self.progress = 0.0;
        self.completed = false;
    }

    /// Check if the stage has never advanced
    pub fn is_pristine(&self) -> bool {
        self.progress == 0.0 && !self.completed
    }
}

/// The four canonical stages of the simulated VR180 conversion
pub fn default_stages() -> Vec<Stage> {
    vec![
        Stage::new("Analyzing video", "Scanning frames and motion vectors"),
        Stage::new("Estimating depth", "Building per-frame depth maps"),
        Stage::new("Generating stereo views", "Synthesizing left and right eye views"),
        Stage::new("Encoding VR180", "Packaging the side-by-side output"),
    ]
}
