//! Wizard shell routing
//!
//! Four static views make up the conversion flow. This is glue around the
//! core components: it owns the uploaded asset for the duration of one
//! attempt and validates view transitions, nothing more.

use anyhow::{Context, Result, ensure};
use log::info;
use serde::Serialize;

use crate::asset::SourceAsset;

/// The four views of the conversion flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WizardStep {
    /// Drop zone waiting for a 2D video
    Upload,

    /// Engine run in progress
    Processing,

    /// Synchronized dual-view preview
    Preview,

    /// Derived artifact ready to save
    Download,
}

impl WizardStep {
    /// Check if this view transition is valid
    pub fn can_transition_to(&self, target: &WizardStep) -> bool {
        use WizardStep::*;

        match (self, target) {
            (Upload, Processing) => true,
            (Processing, Preview) => true,
            (Preview, Download) => true,

            // "Convert another" restarts from any view
            (_, Upload) => true,

            // Self-transitions
            (a, b) if a == b => true,

            _ => false,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::Upload => "Upload",
            WizardStep::Processing => "Processing",
            WizardStep::Preview => "Preview",
            WizardStep::Download => "Download",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Shell state for one conversion attempt
///
/// Owns at most one asset at a time; the engine run and the playback pair
/// are created against it by the hosting views and discarded on restart.
pub struct Wizard {
    step: WizardStep,
    asset: Option<SourceAsset>,
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Upload,
            asset: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn asset(&self) -> Option<&SourceAsset> {
        self.asset.as_ref()
    }

    /// Accept a dropped file and move to the processing view
    pub fn accept_upload(&mut self, asset: SourceAsset) -> Result<()> {
        self.advance(WizardStep::Processing)?;
        info!("accepted '{}' ({})", asset.name(), asset.display_size());
        self.asset = Some(asset);
        Ok(())
    }

    /// The engine signalled completion, move to the preview view
    pub fn conversion_complete(&mut self) -> Result<()> {
        self.advance(WizardStep::Preview)
    }

    /// Leave the preview for the download view
    pub fn to_download(&mut self) -> Result<()> {
        self.advance(WizardStep::Download)
    }

    /// Drop the asset and return to the upload view
    pub fn restart(&mut self) {
        self.step = WizardStep::Upload;
        self.asset = None;
    }

    /// Name of the derived artifact offered for download
    pub fn download_name(&self) -> Result<String> {
        let asset = self.asset.as_ref().context("no asset uploaded")?;
        Ok(asset.output_name())
    }

    fn advance(&mut self, target: WizardStep) -> Result<()> {
        ensure!(
            self.step.can_transition_to(&target),
            "invalid wizard transition: {} -> {}",
            self.step,
            target
        );
        self.step = target;
        Ok(())
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn asset() -> SourceAsset {
        SourceAsset::new("beach.day.mov", Bytes::from_static(b"frames"))
    }

    #[test]
    fn test_valid_transitions() {
        use WizardStep::*;

        assert!(Upload.can_transition_to(&Processing));
        assert!(Processing.can_transition_to(&Preview));
        assert!(Preview.can_transition_to(&Download));
        assert!(Download.can_transition_to(&Upload));
        assert!(Processing.can_transition_to(&Upload));
        assert!(Preview.can_transition_to(&Preview));
    }

    #[test]
    fn test_invalid_transitions() {
        use WizardStep::*;

        assert!(!Upload.can_transition_to(&Preview));
        assert!(!Upload.can_transition_to(&Download));
        assert!(!Processing.can_transition_to(&Download));
        assert!(!Download.can_transition_to(&Preview));
    }

    #[test]
    fn test_full_walk() {
        let mut wizard = Wizard::new();
        wizard.accept_upload(asset()).unwrap();
        assert_eq!(wizard.step(), WizardStep::Processing);

        wizard.conversion_complete().unwrap();
        wizard.to_download().unwrap();
        assert_eq!(wizard.download_name().unwrap(), "beach_vr180.mp4");

        wizard.restart();
        assert_eq!(wizard.step(), WizardStep::Upload);
        assert!(wizard.asset().is_none());
    }

    #[test]
    fn test_skipping_views_is_rejected() {
        let mut wizard = Wizard::new();
        assert!(wizard.conversion_complete().is_err());
        assert!(wizard.to_download().is_err());
        assert!(wizard.download_name().is_err());
    }
}
