//! Concrete playback surface
//!
//! Stands in for one rendered video element of the preview. The stereo
//! look is a per-side cosmetic filter applied at render time, so both
//! surfaces reference the same source asset; only the play state and the
//! end-of-stream flag live here.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::asset::SourceAsset;
use crate::playback::sink::{PlaybackSink, ViewId};

/// One eye's rendering surface, bound to a source asset
#[derive(Debug)]
pub struct VideoSurface {
    asset_name: String,
    view: ViewId,
    playing: AtomicBool,
    ended: AtomicBool,
}

impl VideoSurface {
    /// Bind a surface to the asset it renders
    pub fn bind(asset: &SourceAsset, view: ViewId) -> Self {
        Self {
            asset_name: asset.name().to_owned(),
            view,
            playing: AtomicBool::new(false),
            ended: AtomicBool::new(false),
        }
    }

    pub fn view(&self) -> ViewId {
        self.view
    }

    /// Name of the asset this surface renders
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    /// Record that this surface reached its natural end
    pub fn mark_ended(&self) {
        self.ended.store(true, Ordering::SeqCst);
        self.playing.store(false, Ordering::SeqCst);
    }

    /// Whether this surface has reached end of stream
    pub fn ended(&self) -> bool {
        self.ended.load(Ordering::SeqCst)
    }
}

impl PlaybackSink for VideoSurface {
    fn set_playing(&self, playing: bool) {
        if playing {
            // Commanding play after end of stream restarts the surface
            self.ended.store(false, Ordering::SeqCst);
        }
        self.playing.store(playing, Ordering::SeqCst);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_surface_tracks_play_state() {
        let asset = SourceAsset::new("clip.mp4", Bytes::new());
        let surface = VideoSurface::bind(&asset, ViewId::Left);

        assert!(!surface.is_playing());
        surface.set_playing(true);
        assert!(surface.is_playing());
        assert_eq!(surface.asset_name(), "clip.mp4");
    }

    #[test]
    fn test_play_clears_end_of_stream() {
        let asset = SourceAsset::new("clip.mp4", Bytes::new());
        let surface = VideoSurface::bind(&asset, ViewId::Right);

        surface.set_playing(true);
        surface.mark_ended();
        assert!(surface.ended());
        assert!(!surface.is_playing());

        surface.set_playing(true);
        assert!(!surface.ended());
    }
}
