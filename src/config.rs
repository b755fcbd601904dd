//! Engine timing configuration and package metadata helpers

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing knobs of the simulated workload
///
/// The defaults pace a four stage run at 17.5 seconds: 50 ticks of 80ms
/// per stage, with a 500ms pause between stages so the completed
/// checkmark registers before the next stage starts moving.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cadence of progress snapshots within a stage
    pub tick_interval: Duration,

    /// Ticks to take one stage from 0 to 100
    pub ticks_per_stage: u32,

    /// Cancellable delay between one stage completing and the next starting
    pub stage_pause: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(80),
            ticks_per_stage: 50,
            stage_pause: Duration::from_millis(500),
        }
    }
}

/// Returns a version as specified in Cargo.toml
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub fn app_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let config = EngineConfig::default();
        assert_eq!(config.tick_interval, Duration::from_millis(80));
        assert_eq!(config.ticks_per_stage, 50);
        assert_eq!(config.stage_pause, Duration::from_millis(500));
    }
}
