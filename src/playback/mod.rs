//! Synchronized dual-view playback for the preview
//!
//! Two surfaces render the same source asset, one per eye; a single
//! controller broadcasts every play/pause intent to both so their state
//! can never diverge.

mod controller;
mod sink;
mod surface;

pub use controller::SyncedPlayback;
pub use sink::{PlaybackSink, ViewId};
pub use surface::VideoSurface;

use std::sync::Arc;

use crate::asset::SourceAsset;

/// Left/right playback surfaces over one asset, controlled as one player
///
/// Owned by the preview view and torn down with it; it references the
/// asset by name only, never the payload.
pub struct PlaybackPair {
    left: Arc<VideoSurface>,
    right: Arc<VideoSurface>,
    control: SyncedPlayback,
}

impl PlaybackPair {
    /// Bind both eyes to the same source asset
    pub fn bind(asset: &SourceAsset) -> Self {
        let left = Arc::new(VideoSurface::bind(asset, ViewId::Left));
        let right = Arc::new(VideoSurface::bind(asset, ViewId::Right));

        let mut control = SyncedPlayback::new();
        control.attach(left.clone());
        control.attach(right.clone());

        Self {
            left,
            right,
            control,
        }
    }

    pub fn left(&self) -> &Arc<VideoSurface> {
        &self.left
    }

    pub fn right(&self) -> &Arc<VideoSurface> {
        &self.right
    }

    pub fn is_playing(&self) -> bool {
        self.control.is_playing()
    }

    /// Play or pause both eyes in one step
    pub fn toggle(&mut self) -> bool {
        self.control.toggle()
    }

    /// Either view reaching its end pauses the pair
    pub fn on_ended(&mut self, view: ViewId) {
        self.control.on_ended(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_pair_binds_both_eyes_to_one_asset() {
        let asset = SourceAsset::new("clip.mp4", Bytes::new());
        let pair = PlaybackPair::bind(&asset);

        assert_eq!(pair.left().view(), ViewId::Left);
        assert_eq!(pair.right().view(), ViewId::Right);
        assert_eq!(pair.left().asset_name(), pair.right().asset_name());
        assert!(!pair.is_playing());
    }

    #[test]
    fn test_pair_plays_and_ends_in_lockstep() {
        let asset = SourceAsset::new("clip.mp4", Bytes::new());
        let mut pair = PlaybackPair::bind(&asset);

        assert!(pair.toggle());
        assert!(pair.left().is_playing());
        assert!(pair.right().is_playing());

        pair.on_ended(ViewId::Right);
        assert!(!pair.is_playing());
        assert!(!pair.left().is_playing());
        assert!(!pair.right().is_playing());
    }
}
